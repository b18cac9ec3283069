use archive_core::{extract_explanation, ParseError};
use pretty_assertions::assert_eq;

#[test]
fn passage_spanning_lines_is_flattened() {
    let html = "<html><body><b>Explanation:</b>\n  Some text\n  spanning lines.\n<p></p></body></html>";
    assert_eq!(extract_explanation(html).unwrap(), "Some text spanning lines.");
}

#[test]
fn passage_inside_closed_paragraph() {
    let html = r#"<center><b> Explanation: </b> A dusty
        <a href="https://apod.nasa.gov/apod/ap200101.html">nebula</a>   glows.
        </p><p> <center> Tomorrow's picture </center>"#;
    assert_eq!(
        extract_explanation(html).unwrap(),
        r#"A dusty <a href="https://apod.nasa.gov/apod/ap200101.html">nebula</a> glows."#
    );
}

#[test]
fn heading_marker_is_case_insensitive() {
    let html = "<h3>EXPLANATION</h3>\tStars\t\tand gas.<p class=\"next\">";
    assert_eq!(extract_explanation(html).unwrap(), "Stars and gas.");
}

#[test]
fn first_marker_wins() {
    let html = "<b>Credit</b> someone <b>Explanation:</b> First.<p><b>Explanation:</b> Second.<p>";
    assert_eq!(extract_explanation(html).unwrap(), "First.");
}

#[test]
fn pre_tag_does_not_end_the_passage() {
    let html = "<b>Explanation:</b> Before <pre>code</pre> after.<p>";
    assert_eq!(
        extract_explanation(html).unwrap(),
        "Before <pre>code</pre> after."
    );
}

#[test]
fn missing_marker_is_reported() {
    let html = "<html><body><p>Just a picture.</p><p>Credit</p></body></html>";
    assert_eq!(
        extract_explanation(html),
        Err(ParseError::ExplanationMarkerMissing)
    );
}

#[test]
fn output_never_contains_runs_or_newlines() {
    let html = "<b>Explanation:</b>\r\n\r\n a \n\n\t b  \r\n c \n<p>";
    let text = extract_explanation(html).unwrap();
    assert!(!text.contains('\n'));
    assert!(!text.contains("  "));
    assert_eq!(text, "a b c");
}

#[test]
fn prose_mentioning_explanation_is_not_a_marker() {
    let html = "<b>Title</b> This needs no explanation at all. <b>Tomorrow</b> Body.<p>";
    assert_eq!(
        extract_explanation(html),
        Err(ParseError::ExplanationMarkerMissing)
    );
}

#[test]
fn marker_nested_in_another_bold_element() {
    let html = "<b><strong>Explanation:</strong></b> Nested marker.<p>";
    assert_eq!(extract_explanation(html).unwrap(), "Nested marker.");
}

#[test]
fn marker_without_following_paragraph_is_unterminated() {
    let html = "<b>Explanation:</b> Text that never ends.";
    assert_eq!(
        extract_explanation(html),
        Err(ParseError::ExplanationUnterminated)
    );
}
