use std::borrow::Cow;

use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use scraper::Html;
use url::Url;

use crate::decode::decode_page;
use crate::fetch::Fetcher;
use crate::{FailureKind, FetchError};

static ANCHOR_HREF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(<a\s(?:[^>]*?\s)?href\s*=\s*)(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("anchor href pattern is valid")
});

/// One fetched and parsed page.
///
/// Owns the parsed tree for exactly as long as the page is being processed;
/// every extraction step borrows it.
#[derive(Debug)]
pub struct FetchedDocument {
    url: Url,
    encoding_label: String,
    html: Html,
}

impl FetchedDocument {
    /// Parse markup as-is.
    pub fn parse(url: Url, markup: &str, encoding_label: impl Into<String>) -> Self {
        Self {
            url,
            encoding_label: encoding_label.into(),
            html: Html::parse_document(markup),
        }
    }

    /// Parse markup after rewriting every anchor href to an absolute url
    /// resolved against `base`.
    pub fn parse_absolutized(
        url: Url,
        markup: &str,
        encoding_label: impl Into<String>,
        base: &Url,
    ) -> Self {
        let rewritten = absolutize_links(markup, base);
        Self::parse(url, &rewritten, encoding_label)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn encoding_label(&self) -> &str {
        &self.encoding_label
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// The parsed tree serialized back to markup.
    pub fn serialized(&self) -> String {
        self.html.html()
    }
}

/// Fetch `url`, decode it with the site's declared encoding and parse it.
///
/// With `absolutize_base` set, anchors are made absolute before parsing.
pub async fn fetch_document(
    fetcher: &dyn Fetcher,
    url: &Url,
    declared: &'static Encoding,
    absolutize_base: Option<&Url>,
) -> Result<FetchedDocument, FetchError> {
    let output = fetcher.fetch(url.as_str()).await?;
    let decoded = decode_page(
        &output.bytes,
        Some(declared),
        output.metadata.content_type.as_deref(),
    )
    .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

    let document = match absolutize_base {
        Some(base) => FetchedDocument::parse_absolutized(
            url.clone(),
            &decoded.html,
            decoded.encoding_label,
            base,
        ),
        None => FetchedDocument::parse(url.clone(), &decoded.html, decoded.encoding_label),
    };
    Ok(document)
}

/// Rewrite the href of every `<a>` tag in `markup` to an absolute url.
pub fn absolutize_links<'a>(markup: &'a str, base: &Url) -> Cow<'a, str> {
    ANCHOR_HREF_RE.replace_all(markup, |caps: &Captures<'_>| {
        let raw = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        let resolved = match base.join(raw.trim()) {
            Ok(url) => String::from(url),
            Err(_) => raw.to_string(),
        };
        format!("{}\"{}\"", &caps[1], resolved.replace('"', "&quot;"))
    })
}

#[cfg(test)]
mod tests {
    use super::absolutize_links;
    use url::Url;

    fn base() -> Url {
        Url::parse("https://apod.nasa.gov/apod/").unwrap()
    }

    #[test]
    fn relative_hrefs_become_absolute() {
        let out = absolutize_links(r#"<a href="image/2101/big.jpg">x</a>"#, &base());
        assert_eq!(
            out,
            r#"<a href="https://apod.nasa.gov/apod/image/2101/big.jpg">x</a>"#
        );
    }

    #[test]
    fn handles_single_quoted_unquoted_and_other_attributes() {
        let out = absolutize_links(
            "<A class=x HREF='ap210101.html'>a</A> <a href=lib/about.html>b</a>",
            &base(),
        );
        assert_eq!(
            out,
            "<A class=x HREF=\"https://apod.nasa.gov/apod/ap210101.html\">a</A> \
             <a href=\"https://apod.nasa.gov/apod/lib/about.html\">b</a>"
        );
    }

    #[test]
    fn absolute_hrefs_and_other_tags_are_untouched() {
        let markup = r#"<a href="https://example.com/x">x</a><img src="image/a.jpg"><link href="s.css">"#;
        assert_eq!(absolutize_links(markup, &base()), markup);
    }
}
