use serde::Serialize;
use std::fmt;

use super::snapshot::{size_delta, SizeSnapshot, SIZE_UNAVAILABLE};
use crate::util::{format_size, format_timestamp, format_timestamp_rfc3339};

/// Before/after comparison produced at the end of a cleanup run
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningReport {
    pub before: SizeSnapshot,
    pub after: SizeSnapshot,
    pub repositories_cleaned: usize,
    /// Name of the metadata directory the sizes were collected for
    pub marker: String,
    /// Unix timestamp of completion
    pub finished_at: i64,
}

/// JSON shape of a report
#[derive(Debug, Serialize)]
pub struct ReportJson<'a> {
    pub before: SizeSnapshot,
    pub after: SizeSnapshot,
    pub reclaimed_total: Option<i64>,
    pub reclaimed_metadata: Option<i64>,
    pub formatted: FormattedSizes,
    pub repositories_cleaned: usize,
    pub marker: &'a str,
    pub finished_at: String,
}

/// The size strings shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedSizes {
    pub total_before: String,
    pub total_after: String,
    pub total_delta: String,
    pub metadata_before: String,
    pub metadata_after: String,
    pub metadata_delta: String,
}

impl CleaningReport {
    pub fn new(
        before: SizeSnapshot,
        after: SizeSnapshot,
        repositories_cleaned: usize,
        marker: &str,
        finished_at: i64,
    ) -> Self {
        Self {
            before,
            after,
            repositories_cleaned,
            marker: marker.to_string(),
            finished_at,
        }
    }

    /// Bytes reclaimed across the whole root
    pub fn total_delta(&self) -> Option<i64> {
        size_delta(self.before.total, self.after.total)
    }

    /// Bytes reclaimed inside metadata directories only
    pub fn metadata_delta(&self) -> Option<i64> {
        size_delta(self.before.metadata, self.after.metadata)
    }

    pub fn formatted(&self) -> FormattedSizes {
        FormattedSizes {
            total_before: format_known(available(self.before.total)),
            total_after: format_known(available(self.after.total)),
            total_delta: format_known(self.total_delta()),
            metadata_before: format_known(available(self.before.metadata)),
            metadata_after: format_known(available(self.after.metadata)),
            metadata_delta: format_known(self.metadata_delta()),
        }
    }

    pub fn to_json(&self) -> ReportJson<'_> {
        ReportJson {
            before: self.before,
            after: self.after,
            reclaimed_total: self.total_delta(),
            reclaimed_metadata: self.metadata_delta(),
            formatted: self.formatted(),
            repositories_cleaned: self.repositories_cleaned,
            marker: &self.marker,
            finished_at: format_timestamp_rfc3339(self.finished_at),
        }
    }

    pub fn finished_at_display(&self) -> String {
        format_timestamp(self.finished_at)
    }
}

fn available(bytes: i64) -> Option<i64> {
    (bytes != SIZE_UNAVAILABLE).then_some(bytes)
}

fn format_known(bytes: Option<i64>) -> String {
    bytes.map(format_size).unwrap_or_else(|| "n/a".to_string())
}

impl fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sizes = self.formatted();
        writeln!(f, "Size before: {}", sizes.total_before)?;
        writeln!(f, "Size after: {}", sizes.total_after)?;
        writeln!(f, "Delta: {}", sizes.total_delta)?;
        writeln!(f)?;
        writeln!(f, "Size of all {} folders before: {}", self.marker, sizes.metadata_before)?;
        writeln!(f, "Size of all {} folders after: {}", self.marker, sizes.metadata_after)?;
        write!(f, "Delta: {}", sizes.metadata_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_snapshots_give_zero_delta() {
        let snap = SizeSnapshot::new(4096, 2048);
        let report = CleaningReport::new(snap, snap, 0, ".git", 0);

        assert_eq!(report.total_delta(), Some(0));
        assert_eq!(report.metadata_delta(), Some(0));
        assert_eq!(report.formatted().total_delta, "0 B");
        assert_eq!(report.formatted().metadata_delta, "0 B");
    }

    #[test]
    fn test_display_layout() {
        let before = SizeSnapshot::new(3 * 1024 * 1024, 2 * 1024 * 1024);
        let after = SizeSnapshot::new(2 * 1024 * 1024, 1024 * 1024);
        let report = CleaningReport::new(before, after, 2, ".git", 0);

        let text = report.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Size before: 3.0 MB",
                "Size after: 2.0 MB",
                "Delta: 1.0 MB",
                "",
                "Size of all .git folders before: 2.0 MB",
                "Size of all .git folders after: 1.0 MB",
                "Delta: 1.0 MB",
            ]
        );
    }

    #[test]
    fn test_unavailable_sizes_render_as_na() {
        let before = SizeSnapshot::new(SIZE_UNAVAILABLE, 100);
        let after = SizeSnapshot::new(500, 50);
        let report = CleaningReport::new(before, after, 1, ".git", 0);

        let sizes = report.formatted();
        assert_eq!(sizes.total_before, "n/a");
        assert_eq!(sizes.total_delta, "n/a");
        assert_eq!(sizes.metadata_delta, "50 B");
    }

    #[test]
    fn test_json_carries_raw_and_formatted_values() {
        let report = CleaningReport::new(
            SizeSnapshot::new(2048, 1024),
            SizeSnapshot::new(1024, 0),
            1,
            ".git",
            1_700_000_000,
        );
        let value = serde_json::to_value(report.to_json()).unwrap();

        assert_eq!(value["reclaimed_total"], 1024);
        assert_eq!(value["reclaimed_metadata"], 1024);
        assert_eq!(value["formatted"]["total_delta"], "1.0 KB");
        assert_eq!(value["repositories_cleaned"], 1);
        assert!(value["finished_at"].as_str().unwrap().starts_with("2023-"));
    }
}
