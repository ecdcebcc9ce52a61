//! Disk usage accounting
//!
//! Best effort: a read error anywhere in the walk yields `SIZE_UNAVAILABLE`
//! and a warning instead of an error for the caller.

use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

use crate::model::{SizeSnapshot, SIZE_UNAVAILABLE};

/// Sums file sizes under a root
#[derive(Debug, Clone)]
pub struct SizeAccountant {
    marker: String,
}

impl SizeAccountant {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
        }
    }

    /// Take a snapshot of the whole tree and of its metadata directories
    pub fn snapshot(&self, root: &Path) -> SizeSnapshot {
        SizeSnapshot::new(folder_size(root), self.metadata_size(root))
    }

    /// Sum of `folder_size` over every marker directory below `root`,
    /// including markers nested inside other markers
    pub fn metadata_size(&self, root: &Path) -> i64 {
        let mut total: i64 = 0;
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(path = %root.display(), error = %e, "could not measure metadata directories");
                    return SIZE_UNAVAILABLE;
                }
            };
            if entry.file_type().is_dir() && entry.file_name() == self.marker.as_str() {
                let size = folder_size(entry.path());
                if size == SIZE_UNAVAILABLE {
                    return SIZE_UNAVAILABLE;
                }
                total = total.saturating_add(size);
            }
        }
        total
    }
}

/// Recursive sum of regular-file lengths under `path`
///
/// Symbolic links are not followed.
pub fn folder_size(path: &Path) -> i64 {
    let mut total: u64 = 0;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not measure directory size");
                return SIZE_UNAVAILABLE;
            }
        };
        if entry.file_type().is_file() {
            match entry.metadata() {
                Ok(meta) => total = total.saturating_add(meta.len()),
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "could not read file size");
                    return SIZE_UNAVAILABLE;
                }
            }
        }
    }
    i64::try_from(total).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(base: &Path, rel: &str, len: usize) {
        let path = base.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![b'x'; len]).unwrap();
    }

    #[test]
    fn test_folder_size_sums_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.txt", 100);
        write(dir.path(), "sub/b.txt", 250);
        write(dir.path(), "sub/deeper/c.bin", 1000);

        assert_eq!(folder_size(dir.path()), 1350);
        assert_eq!(folder_size(&dir.path().join("sub")), 1250);
    }

    #[test]
    fn test_empty_directory_is_zero() {
        let dir = TempDir::new().unwrap();
        assert_eq!(folder_size(dir.path()), 0);
    }

    #[test]
    fn test_missing_path_is_unavailable() {
        let dir = TempDir::new().unwrap();
        assert_eq!(folder_size(&dir.path().join("nope")), SIZE_UNAVAILABLE);

        let accountant = SizeAccountant::new(".git");
        assert_eq!(accountant.metadata_size(&dir.path().join("nope")), SIZE_UNAVAILABLE);
    }

    #[test]
    fn test_metadata_size_counts_nested_markers() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/.git/objects/pack", 400);
        write(dir.path(), "a/.git/modules/sub/.git/HEAD", 50);
        write(dir.path(), "b/.git/HEAD", 30);
        write(dir.path(), "b/src/main.rs", 1000);

        let accountant = SizeAccountant::new(".git");
        // The nested marker is counted on its own and again inside a/.git
        assert_eq!(accountant.metadata_size(dir.path()), 400 + 50 + 50 + 30);

        let snap = accountant.snapshot(dir.path());
        assert_eq!(snap.total, 1480);
        assert_eq!(snap.metadata, 530);
    }
}
