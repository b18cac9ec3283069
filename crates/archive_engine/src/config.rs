use std::path::PathBuf;

use encoding_rs::Encoding;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::fetch::FetchSettings;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base url {url:?} is invalid: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("base url {0:?} must end with '/'")]
    BaseUrlNotDirectory(String),
    #[error("index page {0:?} cannot be joined to the base url")]
    InvalidIndexPage(String),
    #[error("unknown encoding label {0:?}")]
    UnknownEncoding(String),
    #[error("entry link pattern {pattern:?} is invalid: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("data version must not be empty")]
    EmptyDataVersion,
    #[error("requests_per_second must be greater than zero")]
    ZeroRequestRate,
    #[error("max_concurrent_fetches must be greater than zero")]
    ZeroConcurrency,
}

/// Everything a harvest run needs to know about the site and the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Directory url every entry page lives under.
    pub base_url: String,
    /// Index page name relative to `base_url`.
    pub index_page: String,
    /// Encoding the site serves its pages in.
    pub declared_encoding: String,
    /// Bump to force every entry to be extracted and written again.
    pub data_version: String,
    pub entry_link_pattern: String,
    pub database_path: PathBuf,
    pub requests_per_second: u32,
    /// 1 keeps the run strictly sequential.
    pub max_concurrent_fetches: usize,
    /// Only process the first N index links (the newest entries).
    pub max_entries: Option<usize>,
    pub fetch: FetchSettings,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: "https://apod.nasa.gov/apod/".to_string(),
            index_page: "archivepix.html".to_string(),
            declared_encoding: "windows-1252".to_string(),
            data_version: "1.0.0".to_string(),
            entry_link_pattern: r"ap[0-9]+\.html".to_string(),
            database_path: PathBuf::from("archive.sqlite"),
            requests_per_second: 2,
            max_concurrent_fetches: 1,
            max_entries: None,
            fetch: FetchSettings::default(),
        }
    }
}

impl HarvestConfig {
    /// Check the configuration and compile it into a [`SiteLayout`].
    pub fn validate(&self) -> Result<SiteLayout, ConfigError> {
        if self.data_version.trim().is_empty() {
            return Err(ConfigError::EmptyDataVersion);
        }
        if self.requests_per_second == 0 {
            return Err(ConfigError::ZeroRequestRate);
        }
        if self.max_concurrent_fetches == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        SiteLayout::new(
            &self.base_url,
            &self.index_page,
            &self.declared_encoding,
            &self.entry_link_pattern,
        )
    }
}

/// Parsed and compiled view of the site described by a [`HarvestConfig`].
#[derive(Debug, Clone)]
pub struct SiteLayout {
    pub base: Url,
    pub index_url: Url,
    pub encoding: &'static Encoding,
    pub entry_link: Regex,
    /// Links into the site's `image/` directory.
    pub picture_link: Regex,
}

impl SiteLayout {
    pub fn new(
        base_url: &str,
        index_page: &str,
        encoding_label: &str,
        entry_link_pattern: &str,
    ) -> Result<Self, ConfigError> {
        let base = Url::parse(base_url).map_err(|err| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if !base.path().ends_with('/') {
            return Err(ConfigError::BaseUrlNotDirectory(base_url.to_string()));
        }
        let index_url = base
            .join(index_page)
            .map_err(|_| ConfigError::InvalidIndexPage(index_page.to_string()))?;
        let encoding = Encoding::for_label(encoding_label.trim().as_bytes())
            .ok_or_else(|| ConfigError::UnknownEncoding(encoding_label.to_string()))?;
        let entry_link =
            Regex::new(entry_link_pattern).map_err(|err| ConfigError::InvalidPattern {
                pattern: entry_link_pattern.to_string(),
                reason: err.to_string(),
            })?;
        let picture_pattern = format!("{}image/", regex::escape(base.as_str()));
        let picture_link =
            Regex::new(&picture_pattern).map_err(|err| ConfigError::InvalidPattern {
                pattern: picture_pattern.clone(),
                reason: err.to_string(),
            })?;

        Ok(Self {
            base,
            index_url,
            encoding,
            entry_link,
            picture_link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, HarvestConfig};

    #[test]
    fn defaults_describe_the_picture_archive() {
        let layout = HarvestConfig::default().validate().unwrap();
        assert_eq!(
            layout.index_url.as_str(),
            "https://apod.nasa.gov/apod/archivepix.html"
        );
        assert_eq!(layout.encoding.name(), "windows-1252");
        assert!(layout.entry_link.is_match("ap210101.html"));
        assert!(layout
            .picture_link
            .is_match("https://apod.nasa.gov/apod/image/2101/big.jpg"));
        assert!(!layout
            .picture_link
            .is_match("https://apodxnasa.gov/apod/image/2101/big.jpg"));
    }

    #[test]
    fn rejects_base_without_trailing_slash() {
        let config = HarvestConfig {
            base_url: "https://apod.nasa.gov/apod".to_string(),
            ..HarvestConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::BaseUrlNotDirectory("https://apod.nasa.gov/apod".to_string())
        );
    }

    #[test]
    fn rejects_unknown_encoding_and_zero_limits() {
        let config = HarvestConfig {
            declared_encoding: "klingon".to_string(),
            ..HarvestConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownEncoding(_))
        ));

        let config = HarvestConfig {
            requests_per_second: 0,
            ..HarvestConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroRequestRate)));

        let config = HarvestConfig {
            max_concurrent_fetches: 0,
            ..HarvestConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroConcurrency)));
    }
}
