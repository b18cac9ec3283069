use harvest_logging::{harvest_debug, harvest_info, harvest_warn};

use crate::{EntryOutcome, HarvestEvent};

/// Receives run events as entries finish.
pub trait HarvestSink: Send + Sync {
    fn emit(&self, event: HarvestEvent);
}

/// Reports every event through the global logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl HarvestSink for LogSink {
    fn emit(&self, event: HarvestEvent) {
        match event {
            HarvestEvent::IndexLoaded { url, links } => {
                harvest_info!("Index {} lists {} entry links", url, links);
            }
            HarvestEvent::EntryFinished { url, outcome } => match outcome {
                EntryOutcome::Persisted(reason) => {
                    harvest_info!("Saved {} ({:?})", url, reason);
                }
                EntryOutcome::SkippedNoMedia => {
                    harvest_debug!("Skipped {}: no picture or video", url);
                }
                EntryOutcome::SkippedUpToDate => {
                    harvest_debug!("Skipped {}: already captured at this version", url);
                }
                EntryOutcome::FetchFailed(err) => {
                    harvest_warn!("Skipped {}: fetch failed: {}", url, err);
                }
                EntryOutcome::ParseFailed(err) => {
                    harvest_warn!("Skipped {}: {}", url, err);
                }
            },
        }
    }
}
