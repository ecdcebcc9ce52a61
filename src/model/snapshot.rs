use serde::Serialize;

/// Returned by size accounting when the tree could not be fully read
pub const SIZE_UNAVAILABLE: i64 = -1;

/// Point-in-time disk usage of an analysed root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeSnapshot {
    /// Bytes of all regular files under the root
    pub total: i64,
    /// Bytes under every metadata directory, nested ones included
    pub metadata: i64,
}

impl SizeSnapshot {
    pub fn new(total: i64, metadata: i64) -> Self {
        Self { total, metadata }
    }

    pub fn is_complete(&self) -> bool {
        self.total != SIZE_UNAVAILABLE && self.metadata != SIZE_UNAVAILABLE
    }
}

/// `before - after`, or `None` when either side is unavailable
pub fn size_delta(before: i64, after: i64) -> Option<i64> {
    if before == SIZE_UNAVAILABLE || after == SIZE_UNAVAILABLE {
        None
    } else {
        Some(before.saturating_sub(after))
    }
}
