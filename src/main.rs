//! CLI entry point for the travel-times batch tool.
//!
//! Reads an origins file and a destinations file, splits the cross product
//! into request-sized groups, and collects travel times from the Google Maps
//! Distance Matrix API while staying inside the daily request quota.

use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use travel_times::{
    config::RunConfig,
    driver::BatchDriver,
    grouper::{BlockSize, group_count, group_locations},
    infra::google::{GoogleMatrixClient, client::DEFAULT_BASE_URL},
    keys::resolve_api_key,
    locations::load_locations,
    output::{ResultSink, WriteMode},
    quota::{Sleeper, TokioSleeper},
    request::TravelMode,
};

#[derive(Parser)]
#[command(name = "travel_times")]
#[command(about = "Batch travel-time lookups against the Google Maps Distance Matrix API", long_about = None)]
struct Cli {
    /// File of origins, one postcode or "lat,lon" per line
    #[arg(value_name = "ORIGINS")]
    origins: PathBuf,

    /// File of destinations, one postcode or "lat,lon" per line
    #[arg(value_name = "DESTINATIONS")]
    destinations: PathBuf,

    /// Travel mode
    #[arg(short, long, value_enum, default_value_t = TravelMode::Walking)]
    mode: TravelMode,

    /// CSV file for successful pairs
    #[arg(short, long, default_value = "output.csv")]
    output: PathBuf,

    /// CSV file for failed pairs
    #[arg(short, long, default_value = "errorlog.csv")]
    errors: PathBuf,

    /// Append to the output files instead of overwriting them
    #[arg(long, default_value_t = false)]
    append: bool,

    /// Credential file holding the API key
    #[arg(long, default_value = "../etc/credentials.txt")]
    credentials: PathBuf,

    /// Section of the credential file holding `key`
    #[arg(long, default_value = "googledistancematrixapi")]
    section: String,

    /// Requests to make before waiting for the quota to reset
    #[arg(long, default_value_t = 2450)]
    max_requests_per_day: u64,

    /// The API's daily request limit
    #[arg(long, default_value_t = 2500)]
    daily_hard_cap: u64,

    /// Seconds to wait once the daily ceiling is reached
    #[arg(long, default_value_t = 86_400)]
    quota_wait_secs: u64,

    /// Seconds to wait before the first request (e.g. today's quota is spent)
    #[arg(long, default_value_t = 0)]
    start_delay_secs: u64,

    /// Origins per request
    #[arg(long, default_value_t = 3)]
    origin_block: usize,

    /// Destinations per request
    #[arg(long, default_value_t = 5)]
    destination_block: usize,

    /// Distance-matrix endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            mode: self.mode,
            block_size: BlockSize {
                origins: self.origin_block,
                destinations: self.destination_block,
            },
            max_requests_per_day: self.max_requests_per_day,
            daily_hard_cap: self.daily_hard_cap,
            quota_wait: Duration::from_secs(self.quota_wait_secs),
            start_delay: Duration::from_secs(self.start_delay_secs),
            output_path: self.output.clone(),
            error_path: self.errors.clone(),
            write_mode: if self.append {
                WriteMode::Append
            } else {
                WriteMode::Overwrite
            },
            credentials_path: self.credentials.clone(),
            credentials_section: self.section.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/travel_times.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("travel_times.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = cli.run_config();

    if let Err(e) = run(&cli, &config).await {
        error!(error = %format!("{e:#}"), "Run failed");
        return Err(e);
    }
    Ok(())
}

/// Loads inputs and credentials, then drives every group through the API.
#[tracing::instrument(skip_all, fields(origins = %cli.origins.display(), destinations = %cli.destinations.display()))]
async fn run(cli: &Cli, config: &RunConfig) -> Result<()> {
    config.validate().context("invalid run configuration")?;

    let origins = load_locations(&cli.origins).context("cannot load origins")?;
    let destinations = load_locations(&cli.destinations).context("cannot load destinations")?;

    let key = resolve_api_key(&config.credentials_path, &config.credentials_section)
        .context("cannot load API key")?;

    let groups = group_locations(&origins, &destinations, config.block_size);
    let total_pairs = origins.len() * destinations.len();
    let requests = group_count(origins.len(), destinations.len(), config.block_size) as u64;
    info!(
        origins = origins.len(),
        destinations = destinations.len(),
        total_pairs,
        groups = groups.len(),
        quota_windows = requests.div_ceil(config.max_requests_per_day),
        mode = %config.mode,
        "Planned batch"
    );

    let api = GoogleMatrixClient::new(&config.base_url)?;
    let mut sink = ResultSink::open(&config.output_path, &config.error_path, config.write_mode)
        .context("cannot open output files")?;

    let sleeper = TokioSleeper;
    if !config.start_delay.is_zero() {
        info!(
            delay_secs = config.start_delay.as_secs(),
            "Delaying start until quota is available"
        );
        sleeper.sleep(config.start_delay).await;
    }

    let mut driver = BatchDriver::from_config(api, sleeper, key, config);
    let summary = driver.run(&groups, &mut sink).await?;

    info!(
        output = %config.output_path.display(),
        errors = %config.error_path.display(),
        pairs = summary.pairs_processed,
        failed = summary.errors_seen,
        "Finished"
    );
    Ok(())
}
