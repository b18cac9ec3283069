//! Batch entry point: harvest the archive once and exit.
mod settings;

use std::env;
use std::num::NonZeroU32;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::Context;
use archive_engine::{LogSink, PoliteFetcher, ReqwestFetcher, SqliteStore};
use harvest_logging::{harvest_error, parse_level, LogDestination};
use log::LevelFilter;

const LOG_LEVEL_ENV: &str = "ARCHIVE_HARVESTER_LOG";
const LOG_FILE: &str = "./archive_harvester.log";

fn main() -> ExitCode {
    let level = env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|name| parse_level(&name))
        .unwrap_or(LevelFilter::Info);
    harvest_logging::initialize(LogDestination::Both(Path::new(LOG_FILE)), level);

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            harvest_error!("Harvest aborted: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = settings::load_config()?;
    config.validate().context("invalid configuration")?;

    let rate = NonZeroU32::new(config.requests_per_second)
        .context("requests_per_second must be greater than zero")?;
    let fetcher = PoliteFetcher::new(ReqwestFetcher::new(config.fetch.clone()), rate);

    let store = SqliteStore::open(&config.database_path)
        .with_context(|| format!("opening store at {:?}", config.database_path))?;
    let store = Mutex::new(store);

    let runtime = tokio::runtime::Runtime::new().context("starting the async runtime")?;
    runtime.block_on(archive_engine::run_harvest(
        &config, &fetcher, &store, &LogSink,
    ))?;
    Ok(())
}
