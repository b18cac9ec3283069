use std::sync::{Mutex, MutexGuard};

use archive_core::{ArchiveLink, Entry, GateDecision, VersionGate, VersionRecord};
use futures_util::stream::{self, StreamExt};
use harvest_logging::{harvest_debug, harvest_info};
use thiserror::Error;

use crate::document::fetch_document;
use crate::extract::extract_entry;
use crate::fetch::Fetcher;
use crate::index::{entry_url, list_entry_links};
use crate::sink::HarvestSink;
use crate::store::{EntryStore, StoreError, VERSIONS_TABLE};
use crate::{
    ConfigError, EntryOutcome, FailureKind, FetchError, HarvestConfig, HarvestEvent, RunSummary,
    SiteLayout,
};

/// Failures that end a run. Anything scoped to a single entry is an
/// [`EntryOutcome`] instead.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("archive index {url} is unreachable: {source}")]
    IndexUnreachable {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("store lock poisoned by a panicked worker")]
    StorePoisoned,
}

/// Harvest every entry listed on the archive index.
///
/// Entries are fetched and extracted by up to `max_concurrent_fetches`
/// workers; the version lookup and the write for one url happen under a
/// single store lock.
pub async fn run_harvest<S: EntryStore>(
    config: &HarvestConfig,
    fetcher: &dyn Fetcher,
    store: &Mutex<S>,
    sink: &dyn HarvestSink,
) -> Result<RunSummary, HarvestError> {
    let layout = config.validate()?;
    let store_initialized = lock(store)?.has_table(VERSIONS_TABLE)?;
    let gate = VersionGate::new(config.data_version.clone(), store_initialized);
    harvest_info!(
        "Harvesting {} at data version {} (existing store: {})",
        layout.index_url,
        gate.current_version(),
        store_initialized
    );

    let links = {
        let index = fetch_document(fetcher, &layout.index_url, layout.encoding, None)
            .await
            .map_err(|source| HarvestError::IndexUnreachable {
                url: layout.index_url.to_string(),
                source,
            })?;
        list_entry_links(&index, &layout.entry_link)
    };

    let mut summary = RunSummary {
        links_found: links.len(),
        ..RunSummary::default()
    };
    sink.emit(HarvestEvent::IndexLoaded {
        url: layout.index_url.to_string(),
        links: links.len(),
    });

    let limit = config.max_entries.unwrap_or(links.len());
    let mut outcomes = stream::iter(links.into_iter().take(limit))
        .map(|link| process_link(link, fetcher, store, &layout, &gate))
        .buffer_unordered(config.max_concurrent_fetches);

    while let Some(result) = outcomes.next().await {
        let (url, outcome) = result?;
        summary.record(&outcome);
        sink.emit(HarvestEvent::EntryFinished { url, outcome });
    }

    harvest_info!("Harvest finished: {}", summary);
    Ok(summary)
}

async fn process_link<S: EntryStore>(
    link: ArchiveLink,
    fetcher: &dyn Fetcher,
    store: &Mutex<S>,
    layout: &SiteLayout,
    gate: &VersionGate,
) -> Result<(String, EntryOutcome), HarvestError> {
    let Some(url) = entry_url(&link, &layout.base) else {
        let err = FetchError::new(FailureKind::InvalidUrl, "href cannot be joined to base url");
        return Ok((link.href, EntryOutcome::FetchFailed(err)));
    };
    harvest_debug!("Processing {}", url);

    let entry = {
        let document =
            match fetch_document(fetcher, &url, layout.encoding, Some(&layout.base)).await {
                Ok(document) => document,
                Err(err) => return Ok((url.into(), EntryOutcome::FetchFailed(err))),
            };
        match extract_entry(&document, &link, layout) {
            Ok(entry) => entry,
            Err(err) => return Ok((url.into(), EntryOutcome::ParseFailed(err))),
        }
    };

    let outcome = persist_if_needed(store, gate, &entry)?;
    Ok((entry.url, outcome))
}

/// Gate one entry and write it if needed, holding the store lock across the
/// lookup and the write.
pub fn persist_if_needed<S: EntryStore>(
    store: &Mutex<S>,
    gate: &VersionGate,
    entry: &Entry,
) -> Result<EntryOutcome, HarvestError> {
    let mut guard = lock(store)?;
    let decision = gate.evaluate(entry, |url| guard.data_version(url))?;
    let outcome = match decision {
        GateDecision::SkipNoMedia => EntryOutcome::SkippedNoMedia,
        GateDecision::SkipUpToDate => EntryOutcome::SkippedUpToDate,
        GateDecision::Persist(reason) => {
            let record = VersionRecord::stamp(entry, gate.current_version());
            guard.upsert(entry, &record)?;
            EntryOutcome::Persisted(reason)
        }
    };
    Ok(outcome)
}

fn lock<S>(store: &Mutex<S>) -> Result<MutexGuard<'_, S>, HarvestError> {
    store.lock().map_err(|_| HarvestError::StorePoisoned)
}
