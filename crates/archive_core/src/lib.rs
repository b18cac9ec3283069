//! Archive core: pure extraction heuristics and the version gate.
mod date;
mod entry;
mod error;
mod explanation;
mod gate;

pub use date::{normalize_caption_date, parse_free_form_date, strip_caption_separator};
pub use entry::{ArchiveLink, Entry, VersionRecord};
pub use error::ParseError;
pub use explanation::{collapse_whitespace, extract_explanation};
pub use gate::{GateDecision, PersistReason, VersionGate};
