//! Merge statistics.

use serde::{Deserialize, Serialize};

/// What happened to the records of one or more batches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// New inventory entries
    pub added: usize,
    /// Records folded into an existing entry
    pub merged: usize,
    /// Records carrying an ignore directive
    pub ignored: usize,
    /// Records dropped because their name was already ignored
    pub dropped: usize,
    /// New entries whose license could not be identified
    pub unknown: usize,
}

impl MergeStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records seen
    #[must_use]
    pub const fn records(&self) -> usize {
        self.added + self.merged + self.ignored + self.dropped
    }

    /// Accumulate stats from another batch
    pub fn merge(&mut self, other: &Self) {
        self.added += other.added;
        self.merged += other.merged;
        self.ignored += other.ignored;
        self.dropped += other.dropped;
        self.unknown += other.unknown;
    }

    /// Log a summary of the merge
    pub fn log_summary(&self) {
        tracing::info!(
            "Merged {} records: {} added ({} unknown), {} merged, {} ignored, {} dropped",
            self.records(),
            self.added,
            self.unknown,
            self.merged,
            self.ignored,
            self.dropped
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_and_records() {
        let mut total = MergeStats::new();
        total.merge(&MergeStats {
            added: 2,
            unknown: 1,
            ..MergeStats::default()
        });
        total.merge(&MergeStats {
            merged: 3,
            ignored: 1,
            dropped: 1,
            ..MergeStats::default()
        });
        assert_eq!(total.records(), 7);
        assert_eq!(total.unknown, 1);
    }
}
