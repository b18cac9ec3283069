use std::fmt;

use archive_core::{ParseError, PersistReason};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "undecodable body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// What happened to one index link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Persisted(PersistReason),
    SkippedNoMedia,
    SkippedUpToDate,
    FetchFailed(FetchError),
    ParseFailed(ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestEvent {
    IndexLoaded { url: String, links: usize },
    EntryFinished { url: String, outcome: EntryOutcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub links_found: usize,
    pub persisted: usize,
    pub skipped_no_media: usize,
    pub skipped_up_to_date: usize,
    pub fetch_failures: usize,
    pub parse_failures: usize,
}

impl RunSummary {
    pub(crate) fn record(&mut self, outcome: &EntryOutcome) {
        match outcome {
            EntryOutcome::Persisted(_) => self.persisted += 1,
            EntryOutcome::SkippedNoMedia => self.skipped_no_media += 1,
            EntryOutcome::SkippedUpToDate => self.skipped_up_to_date += 1,
            EntryOutcome::FetchFailed(_) => self.fetch_failures += 1,
            EntryOutcome::ParseFailed(_) => self.parse_failures += 1,
        }
    }

    pub fn processed(&self) -> usize {
        self.persisted
            + self.skipped_no_media
            + self.skipped_up_to_date
            + self.fetch_failures
            + self.parse_failures
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "links={} persisted={} no_media={} up_to_date={} fetch_failed={} parse_failed={}",
            self.links_found,
            self.persisted,
            self.skipped_no_media,
            self.skipped_up_to_date,
            self.fetch_failures,
            self.parse_failures
        )
    }
}
