//! Run counters and the summary returned by the batch driver.

use chrono::{DateTime, Local};

/// Counters updated after every group.
///
/// `pairs_processed` counts every pair sent, whatever its outcome;
/// `errors_seen` counts only pairs written to the error sink.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub requests_made: u64,
    pub pairs_processed: u64,
    pub errors_seen: u64,
}

impl Counters {
    /// Successful pairs so far.
    pub fn successes(&self) -> u64 {
        self.pairs_processed.saturating_sub(self.errors_seen)
    }
}

/// Snapshot emitted after each group.
#[derive(Debug, Clone)]
pub struct Progress {
    pub timestamp: DateTime<Local>,
    pub requests_made: u64,
    pub pairs_processed: u64,
    pub total_pairs: u64,
    pub errors_seen: u64,
}

impl Progress {
    pub fn pct(&self) -> f64 {
        if self.total_pairs == 0 {
            0.0
        } else {
            (self.pairs_processed as f64 / self.total_pairs as f64) * 100.0
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub groups_processed: usize,
    /// Requests across all quota windows.
    pub total_requests: u64,
    pub pairs_processed: u64,
    pub errors_seen: u64,
    pub quota_waits: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successes_is_coverage_minus_errors() {
        let counters = Counters {
            requests_made: 2,
            pairs_processed: 8,
            errors_seen: 1,
        };
        assert_eq!(counters.successes(), 7);
    }

    #[test]
    fn test_successes_after_partial_group() {
        // failure rows counted before the group's pairs were added
        let counters = Counters {
            requests_made: 1,
            pairs_processed: 0,
            errors_seen: 2,
        };
        assert_eq!(counters.successes(), 0);
    }

    #[test]
    fn test_pct() {
        let mut progress = Progress {
            timestamp: Local::now(),
            requests_made: 1,
            pairs_processed: 6,
            total_pairs: 8,
            errors_seen: 0,
        };
        assert_eq!(progress.pct(), 75.0);

        progress.total_pairs = 0;
        assert_eq!(progress.pct(), 0.0);
    }
}
