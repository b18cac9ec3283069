use archive_core::ArchiveLink;
use ego_tree::NodeRef;
use regex::Regex;
use scraper::node::Node;
use scraper::ElementRef;
use url::Url;

use crate::extract::ANCHORS;
use crate::FetchedDocument;

/// Every anchor whose href matches `entry_link`, in document order.
///
/// Duplicates are kept; the store's url key absorbs them.
pub fn list_entry_links(document: &FetchedDocument, entry_link: &Regex) -> Vec<ArchiveLink> {
    document
        .html()
        .select(&ANCHORS)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.trim();
            entry_link.is_match(href).then(|| ArchiveLink {
                href: href.to_string(),
                title: anchor.text().collect::<String>().trim().to_string(),
                caption: preceding_text(anchor),
            })
        })
        .collect()
}

/// Absolute url of the entry page a link points at.
pub fn entry_url(link: &ArchiveLink, base: &Url) -> Option<Url> {
    base.join(&link.href).ok()
}

/// Text of the node immediately before the anchor, if that node is text.
fn preceding_text(anchor: ElementRef<'_>) -> Option<String> {
    let previous: NodeRef<'_, Node> = anchor.prev_sibling()?;
    match previous.value() {
        Node::Text(text) => {
            let text: &str = text;
            Some(text.to_owned())
        }
        _ => None,
    }
}
