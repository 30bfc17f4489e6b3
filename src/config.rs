//! Run parameters and their validation.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, TravelTimeError};
use crate::grouper::BlockSize;
use crate::infra::google::client::DEFAULT_BASE_URL;
use crate::output::WriteMode;
use crate::request::TravelMode;

/// Most elements (origins × destinations) a single request may carry.
pub const MAX_ELEMENTS_PER_REQUEST: usize = 100;

/// Most origins, or destinations, a single request may carry.
pub const MAX_LOCATIONS_PER_SIDE: usize = 25;

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub mode: TravelMode,
    pub block_size: BlockSize,
    /// Requests issued before waiting for the quota to reset. Kept below
    /// `daily_hard_cap` to leave headroom for other use of the same key.
    pub max_requests_per_day: u64,
    pub daily_hard_cap: u64,
    pub quota_wait: Duration,
    pub start_delay: Duration,
    pub output_path: PathBuf,
    pub error_path: PathBuf,
    pub write_mode: WriteMode,
    pub credentials_path: PathBuf,
    pub credentials_section: String,
    pub base_url: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: TravelMode::Walking,
            block_size: BlockSize::default(),
            max_requests_per_day: 2450,
            daily_hard_cap: 2500,
            quota_wait: Duration::from_secs(24 * 60 * 60),
            start_delay: Duration::ZERO,
            output_path: PathBuf::from("output.csv"),
            error_path: PathBuf::from("errorlog.csv"),
            write_mode: WriteMode::Overwrite,
            credentials_path: PathBuf::from("../etc/credentials.txt"),
            credentials_section: "googledistancematrixapi".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl RunConfig {
    /// Checks block sizes against the per-request limits and the daily
    /// ceiling against the hard cap.
    pub fn validate(&self) -> Result<()> {
        let BlockSize {
            origins,
            destinations,
        } = self.block_size;

        if origins == 0 || destinations == 0 {
            return Err(TravelTimeError::config("block sizes must be at least 1"));
        }
        if origins > MAX_LOCATIONS_PER_SIDE || destinations > MAX_LOCATIONS_PER_SIDE {
            return Err(TravelTimeError::config(format!(
                "block sizes must not exceed {MAX_LOCATIONS_PER_SIDE} locations per side"
            )));
        }
        if origins * destinations > MAX_ELEMENTS_PER_REQUEST {
            return Err(TravelTimeError::config(format!(
                "{origins} x {destinations} exceeds {MAX_ELEMENTS_PER_REQUEST} elements per request"
            )));
        }
        if self.max_requests_per_day == 0 {
            return Err(TravelTimeError::config(
                "max requests per day must be at least 1",
            ));
        }
        if self.max_requests_per_day >= self.daily_hard_cap {
            return Err(TravelTimeError::config(format!(
                "max requests per day ({}) must stay below the daily hard cap ({})",
                self.max_requests_per_day, self.daily_hard_cap
            )));
        }
        Ok(())
    }
}
