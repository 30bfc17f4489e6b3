//! The quota-aware request loop.
//!
//! [`BatchDriver`] walks the groups in order: encode, call the API, parse,
//! persist, count, report progress, and sleep out the daily quota when the
//! ceiling is reached. Per-pair failures are written as data; every other
//! error aborts the run.

use std::io::Write;
use std::time::Duration;

use chrono::Local;
use tracing::{error, info, warn};

use crate::config::RunConfig;
use crate::error::Result;
use crate::grouper::Group;
use crate::keys::ApiKey;
use crate::output::ResultSink;
use crate::parser::parse_results;
use crate::quota::{QuotaTracker, Sleeper};
use crate::request::{TravelMode, encode_request};
use crate::services::distance_matrix::DistanceMatrixApi;
use crate::stats::{Counters, Progress, RunSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    WaitingForQuota,
    Completed,
    Aborted { cause: String },
}

pub struct BatchDriver<A, S> {
    api: A,
    sleeper: S,
    key: ApiKey,
    mode: TravelMode,
    quota: QuotaTracker,
    quota_wait: Duration,
    counters: Counters,
    state: DriverState,
    total_requests: u64,
    quota_waits: u32,
}

impl<A: DistanceMatrixApi, S: Sleeper> BatchDriver<A, S> {
    pub fn new(
        api: A,
        sleeper: S,
        key: ApiKey,
        mode: TravelMode,
        max_requests_per_day: u64,
        quota_wait: Duration,
    ) -> Self {
        Self {
            api,
            sleeper,
            key,
            mode,
            quota: QuotaTracker::new(max_requests_per_day),
            quota_wait,
            counters: Counters::default(),
            state: DriverState::Idle,
            total_requests: 0,
            quota_waits: 0,
        }
    }

    pub fn from_config(api: A, sleeper: S, key: ApiKey, config: &RunConfig) -> Self {
        Self::new(
            api,
            sleeper,
            key,
            config.mode,
            config.max_requests_per_day,
            config.quota_wait,
        )
    }

    pub fn state(&self) -> &DriverState {
        &self.state
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Processes every group in order, writing rows to `sink`.
    ///
    /// On error the driver moves to [`DriverState::Aborted`], records the
    /// cause and returns it. Groups after the failing one are not attempted.
    #[tracing::instrument(skip_all, fields(groups = groups.len(), mode = %self.mode))]
    pub async fn run<W: Write>(
        &mut self,
        groups: &[Group],
        sink: &mut ResultSink<W>,
    ) -> Result<RunSummary> {
        let total_pairs: u64 = groups.iter().map(|g| g.pair_count() as u64).sum();
        self.state = DriverState::Running;
        info!(
            groups = groups.len(),
            total_pairs,
            max_requests_per_day = self.quota.max_requests(),
            "Starting batch run"
        );

        for (idx, group) in groups.iter().enumerate() {
            if let Err(e) = self.process_group(group, sink).await {
                error!(error = %e, group = idx, "Aborting run");
                self.state = DriverState::Aborted {
                    cause: e.to_string(),
                };
                return Err(e);
            }

            self.report_progress(total_pairs);

            let remaining = groups.len() - idx - 1;
            if self.quota.is_exhausted() && remaining > 0 {
                self.wait_for_quota(remaining).await;
            }
        }

        if self.counters.pairs_processed != total_pairs {
            warn!(
                pairs_processed = self.counters.pairs_processed,
                total_pairs, "Pair count does not match input size"
            );
        }

        self.state = DriverState::Completed;
        let summary = RunSummary {
            groups_processed: groups.len(),
            total_requests: self.total_requests,
            pairs_processed: self.counters.pairs_processed,
            errors_seen: self.counters.errors_seen,
            quota_waits: self.quota_waits,
        };
        info!(
            total_requests = summary.total_requests,
            pairs_processed = summary.pairs_processed,
            errors_seen = summary.errors_seen,
            quota_waits = summary.quota_waits,
            "Batch run complete"
        );
        Ok(summary)
    }

    async fn process_group<W: Write>(
        &mut self,
        group: &Group,
        sink: &mut ResultSink<W>,
    ) -> Result<()> {
        let request = encode_request(group, self.mode, &self.key);

        let response = self.api.query(&request).await;
        self.quota.record_request();
        self.total_requests += 1;
        self.counters.requests_made = self.quota.requests_made();
        let response = response?;

        let parsed = parse_results(group, self.mode, &response, self.counters.requests_made)?;

        for row in &parsed.successes {
            sink.write_success(row)?;
        }
        for row in &parsed.failures {
            sink.write_failure(row)?;
            self.counters.errors_seen += 1;
        }

        self.counters.pairs_processed += group.pair_count() as u64;
        Ok(())
    }

    fn report_progress(&self, total_pairs: u64) {
        let progress = Progress {
            timestamp: Local::now(),
            requests_made: self.counters.requests_made,
            pairs_processed: self.counters.pairs_processed,
            total_pairs,
            errors_seen: self.counters.errors_seen,
        };
        info!(
            requests_made = progress.requests_made,
            pairs_processed = progress.pairs_processed,
            total_pairs = progress.total_pairs,
            errors_seen = progress.errors_seen,
            pct = %format_args!("{:.1}", progress.pct()),
            timestamp = %progress.timestamp.format("%Y-%m-%d %H:%M:%S"),
            "Progress"
        );
    }

    async fn wait_for_quota(&mut self, remaining_groups: usize) {
        self.state = DriverState::WaitingForQuota;
        info!(
            requests_made = self.quota.requests_made(),
            wait_secs = self.quota_wait.as_secs(),
            remaining_groups,
            "Daily quota reached, waiting until it resets"
        );

        self.sleeper.sleep(self.quota_wait).await;

        self.quota.reset();
        self.counters.requests_made = 0;
        self.quota_waits += 1;
        self.state = DriverState::Running;
        info!("Quota window reset, resuming");
    }
}
