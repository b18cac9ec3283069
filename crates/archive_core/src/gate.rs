use crate::Entry;

/// Why an entry is being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistReason {
    /// No version table existed when the run started.
    Bootstrap,
    /// The version table exists but has no row for this url.
    NewEntry,
    /// The stored row was captured with another extraction version.
    VersionChanged { previous: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    SkipNoMedia,
    SkipUpToDate,
    Persist(PersistReason),
}

impl GateDecision {
    pub fn should_persist(&self) -> bool {
        matches!(self, GateDecision::Persist(_))
    }
}

/// Decides whether an extracted entry needs to be (re)written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGate {
    current_version: String,
    store_initialized: bool,
}

impl VersionGate {
    /// `store_initialized` is whether the version table existed before the
    /// run wrote anything.
    pub fn new(current_version: impl Into<String>, store_initialized: bool) -> Self {
        Self {
            current_version: current_version.into(),
            store_initialized,
        }
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// Media gate first, then the stored version. `lookup` returns the
    /// stored version for a url and is only called when the entry has media
    /// and the store was initialized.
    pub fn evaluate<E, F>(&self, entry: &Entry, lookup: F) -> Result<GateDecision, E>
    where
        F: FnOnce(&str) -> Result<Option<String>, E>,
    {
        if !entry.has_media() {
            return Ok(GateDecision::SkipNoMedia);
        }
        if !self.store_initialized {
            return Ok(GateDecision::Persist(PersistReason::Bootstrap));
        }

        let decision = match lookup(&entry.url)? {
            None => GateDecision::Persist(PersistReason::NewEntry),
            Some(stored) if stored == self.current_version => GateDecision::SkipUpToDate,
            Some(previous) => GateDecision::Persist(PersistReason::VersionChanged { previous }),
        };
        Ok(decision)
    }
}
