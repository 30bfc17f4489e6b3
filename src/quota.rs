//! Daily request quota bookkeeping and the sleep used while waiting it out.

use std::time::Duration;

use async_trait::async_trait;

/// Suspends the run while the quota resets.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Counts requests made in the current quota window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaTracker {
    max_requests: u64,
    requests_made: u64,
}

impl QuotaTracker {
    pub fn new(max_requests: u64) -> Self {
        Self {
            max_requests,
            requests_made: 0,
        }
    }

    pub fn record_request(&mut self) {
        self.requests_made += 1;
    }

    pub fn requests_made(&self) -> u64 {
        self.requests_made
    }

    pub fn max_requests(&self) -> u64 {
        self.max_requests
    }

    /// `true` once the window's ceiling has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.requests_made >= self.max_requests
    }

    /// Starts a new window.
    pub fn reset(&mut self) {
        self.requests_made = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_at_ceiling() {
        let mut quota = QuotaTracker::new(3);
        quota.record_request();
        quota.record_request();
        assert!(!quota.is_exhausted());
        quota.record_request();
        assert!(quota.is_exhausted());
        assert_eq!(quota.requests_made(), 3);
    }

    #[test]
    fn test_reset_starts_new_window() {
        let mut quota = QuotaTracker::new(1);
        quota.record_request();
        assert!(quota.is_exhausted());
        quota.reset();
        assert!(!quota.is_exhausted());
        assert_eq!(quota.requests_made(), 0);
    }
}
