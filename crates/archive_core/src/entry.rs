/// One link found on the archive index page.
///
/// `caption` holds the text node right before the anchor, which on the
/// archive index is the human-readable publication date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLink {
    pub href: String,
    pub title: String,
    pub caption: Option<String>,
}

/// A harvested entry. `url` is the only identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    pub url: String,
    pub date: String,
    pub title: String,
    pub explanation: String,
    pub picture_url: String,
    pub video_url: String,
}

impl Entry {
    pub fn has_media(&self) -> bool {
        !self.picture_url.is_empty() || !self.video_url.is_empty()
    }
}

/// Extraction-algorithm version an entry was last captured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    pub url: String,
    pub data_version: String,
}

impl VersionRecord {
    pub fn stamp(entry: &Entry, data_version: &str) -> Self {
        Self {
            url: entry.url.clone(),
            data_version: data_version.to_string(),
        }
    }
}
