use once_cell::sync::Lazy;
use regex::Regex;

use crate::ParseError;

/// A bold or heading element, up to the first closing bold or heading tag.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(?:b|strong|h[1-6])(?:\s[^>]*)?>(.*?)</(?:b|strong|h[1-6])\s*>")
        .expect("marker pattern is valid")
});

/// Passage after the marker, up to the next paragraph-opening tag. Closing
/// tags of enclosing marker elements are skipped first.
static PASSAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)\A\s*(?:</(?:b|strong|h[1-6])\s*>\s*)*(.*?)\s*(?:</p\s*>\s*)?<p(?:\s[^>]*)?>",
    )
    .expect("passage pattern is valid")
});

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Isolate the explanation passage from a serialized entry page.
///
/// The marker is the first bold or heading element whose own text mentions
/// "Explanation". Markup inside the passage (links, emphasis) is kept;
/// whitespace is collapsed.
pub fn extract_explanation(html: &str) -> Result<String, ParseError> {
    let marker_end = MARKER_RE
        .captures_iter(html)
        .find(|captures| {
            captures
                .get(1)
                .is_some_and(|inner| inner.as_str().to_lowercase().contains("explanation"))
        })
        .and_then(|captures| captures.get(0))
        .map(|marker| marker.end())
        .ok_or(ParseError::ExplanationMarkerMissing)?;

    let captures = PASSAGE_RE
        .captures(&html[marker_end..])
        .ok_or(ParseError::ExplanationUnterminated)?;
    let passage = captures.get(1).map_or("", |m| m.as_str());
    Ok(collapse_whitespace(passage))
}

/// Replace every whitespace run, newlines included, with a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}
