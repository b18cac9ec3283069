//! Archive engine: fetching, parsing, persistence and the harvest run.
mod config;
mod decode;
mod document;
mod extract;
mod fetch;
mod index;
mod pipeline;
mod sink;
mod store;
mod types;

pub use config::{ConfigError, HarvestConfig, SiteLayout};
pub use decode::{decode_page, DecodeError, DecodedHtml};
pub use document::{absolutize_links, fetch_document, FetchedDocument};
pub use extract::{extract_entry, resolve_picture_url, resolve_video_url};
pub use fetch::{FetchSettings, Fetcher, PoliteFetcher, ReqwestFetcher};
pub use index::{entry_url, list_entry_links};
pub use pipeline::{persist_if_needed, run_harvest, HarvestError};
pub use sink::{HarvestSink, LogSink};
pub use store::{EntryStore, SqliteStore, StoreError, DATA_TABLE, VERSIONS_TABLE};
pub use types::{
    EntryOutcome, FailureKind, FetchError, FetchMetadata, FetchOutput, HarvestEvent, RunSummary,
};
