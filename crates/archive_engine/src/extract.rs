use archive_core::{extract_explanation, normalize_caption_date, ArchiveLink, Entry, ParseError};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::{FetchedDocument, SiteLayout};

pub(crate) static ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));
static IMAGES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img[src]").expect("image selector is valid"));
static FRAMES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("iframe[src]").expect("iframe selector is valid"));

/// Build an [`Entry`] from an entry page and the index link pointing at it.
///
/// The document is expected to have been parsed with absolutized anchors.
pub fn extract_entry(
    document: &FetchedDocument,
    link: &ArchiveLink,
    layout: &SiteLayout,
) -> Result<Entry, ParseError> {
    let date = normalize_caption_date(link.caption.as_deref().unwrap_or_default())?;
    let explanation = extract_explanation(&document.serialized())?;

    Ok(Entry {
        url: document.url().to_string(),
        date,
        title: link.title.trim().to_string(),
        explanation,
        picture_url: resolve_picture_url(document.html(), layout),
        video_url: resolve_video_url(document.html()),
    })
}

/// The full-resolution picture link if there is one, else the inline image,
/// else empty.
pub fn resolve_picture_url(html: &Html, layout: &SiteLayout) -> String {
    let linked = html
        .select(&ANCHORS)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .find(|href| layout.picture_link.is_match(href));
    if let Some(href) = linked {
        return href.to_string();
    }

    let inline = html
        .select(&IMAGES)
        .filter_map(|image| image.value().attr("src"))
        .map(str::trim)
        .find(|src| src.contains("image/"));
    match inline {
        Some(src) => layout
            .base
            .join(src)
            .map(String::from)
            .unwrap_or_else(|_| format!("{}{}", layout.base, src)),
        None => String::new(),
    }
}

/// Source of the first embedded frame, else empty.
pub fn resolve_video_url(html: &Html) -> String {
    html.select(&FRAMES)
        .filter_map(|frame| frame.value().attr("src"))
        .map(str::trim)
        .find(|src| !src.is_empty())
        .unwrap_or_default()
        .to_string()
}
