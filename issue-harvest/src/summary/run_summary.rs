//! Run summary types.

use crate::extraction::ExtractionSummary;
use crate::migration::MigratedIssue;

/// Which job a run performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Extract,
    Migrate,
}

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Job performed.
    pub mode: RunMode,

    /// Total search matches reported by the remote.
    pub total_matches: u64,

    /// Search pages requested.
    pub pages_requested: u32,

    /// Search pages that failed and were skipped.
    pub pages_skipped: u32,

    /// CSV rows written.
    pub rows_written: usize,

    /// Issues copied to the target repository.
    pub migrated: Vec<MigratedIssue>,

    /// Comments copied across all migrated issues.
    pub comments_copied: usize,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Adds the outcome of an extraction.
    pub fn record_extraction(&mut self, extraction: &ExtractionSummary) {
        self.total_matches = extraction.total_count;
        self.pages_requested += extraction.pages_requested;
        self.pages_skipped += extraction.pages_failed;
        self.rows_written += extraction.rows_written;
    }

    /// Adds a migrated issue.
    pub fn record_migration(&mut self, issue: MigratedIssue) {
        self.comments_copied += issue.comments_copied;
        self.migrated.push(issue);
    }

    /// Returns true if any page was skipped.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.pages_skipped > 0
    }
}

impl From<&ExtractionSummary> for RunSummary {
    fn from(extraction: &ExtractionSummary) -> Self {
        let mut summary = Self::new(RunMode::Extract);
        summary.record_extraction(extraction);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_record_extraction() {
        let summary = RunSummary::from(&ExtractionSummary {
            total_count: 250,
            pages_requested: 3,
            pages_failed: 1,
            rows_written: 150,
        });

        assert_eq!(summary.mode, RunMode::Extract);
        assert_eq!(summary.rows_written, 150);
        assert_eq!(summary.pages_skipped, 1);
        assert!(summary.has_failures());
    }

    #[test]
    fn can_record_migration() {
        let mut summary = RunSummary::new(RunMode::Migrate);
        summary.record_migration(MigratedIssue {
            source_url: "https://github.example.com/mantle/ops/issues/1".to_string(),
            target_number: 12,
            target_url: "https://github.example.com/mantle/dq/issues/12".to_string(),
            comments_copied: 2,
        });

        assert_eq!(summary.migrated.len(), 1);
        assert_eq!(summary.comments_copied, 2);
        assert!(!summary.has_failures());
    }
}
