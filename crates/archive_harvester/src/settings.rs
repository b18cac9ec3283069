//! Locating and reading the RON configuration file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use archive_engine::HarvestConfig;
use harvest_logging::harvest_info;

const CONFIG_ENV: &str = "ARCHIVE_HARVESTER_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "archive_harvester.ron";

/// Load the run configuration.
///
/// An explicit `ARCHIVE_HARVESTER_CONFIG` path must exist. Without it,
/// `archive_harvester.ron` in the working directory is read when present
/// and the built-in defaults are used otherwise.
pub(crate) fn load_config() -> anyhow::Result<HarvestConfig> {
    let explicit = env::var_os(CONFIG_ENV).map(PathBuf::from);
    resolve_config(explicit.as_deref(), Path::new(DEFAULT_CONFIG_FILE))
}

fn resolve_config(explicit: Option<&Path>, fallback: &Path) -> anyhow::Result<HarvestConfig> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    if fallback.exists() {
        return read_config(fallback);
    }
    harvest_info!("No {:?} found, using default configuration", fallback);
    Ok(HarvestConfig::default())
}

fn read_config(path: &Path) -> anyhow::Result<HarvestConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading configuration {:?}", path))?;
    let config = parse_config(&text).with_context(|| format!("parsing configuration {:?}", path))?;
    harvest_info!("Loaded configuration from {:?}", path);
    Ok(config)
}

fn parse_config(text: &str) -> anyhow::Result<HarvestConfig> {
    Ok(ron::from_str(text)?)
}
