use archive_core::{normalize_caption_date, parse_free_form_date, strip_caption_separator, ParseError};
use pretty_assertions::assert_eq;

#[test]
fn index_caption_with_padded_day() {
    assert_eq!(normalize_caption_date("2021 January  1: ").unwrap(), "2021-01-01");
}

#[test]
fn index_caption_with_leading_newline_and_zero_padding() {
    assert_eq!(
        normalize_caption_date("\n1995 June 16:  ").unwrap(),
        "1995-06-16"
    );
}

#[test]
fn supported_layouts_share_one_canonical_form() {
    let inputs = [
        "January 1, 2021",
        "1 January 2021",
        "2021 January 1",
        "Jan 1st 2021",
        "Friday, January 1, 2021",
        "1st of January, 2021",
        "JANUARY 01 2021",
        "2021-01-01",
        "2021/01/01",
        "01/01/2021",
        "1 Jan 21",
    ];
    for input in inputs {
        assert_eq!(
            normalize_caption_date(input).as_deref(),
            Ok("2021-01-01"),
            "input {input:?}"
        );
    }
}

#[test]
fn numeric_dates_are_month_first_unless_impossible() {
    let date = |text: &str| parse_free_form_date(text).map(|d| d.to_string());
    assert_eq!(date("03/04/2021").as_deref(), Some("2021-03-04"));
    assert_eq!(date("25/04/2021").as_deref(), Some("2021-04-25"));
}

#[test]
fn abbreviated_months() {
    assert_eq!(normalize_caption_date("2004 Sept 9:").unwrap(), "2004-09-09");
    assert_eq!(normalize_caption_date("2004 Dec 31:").unwrap(), "2004-12-31");
}

#[test]
fn impossible_date_is_unparseable() {
    assert_eq!(
        normalize_caption_date("2021 February 30: "),
        Err(ParseError::DateUnparseable {
            text: "2021 February 30".to_string()
        })
    );
}

#[test]
fn prose_is_unparseable() {
    assert!(matches!(
        normalize_caption_date("Explanation of the day:"),
        Err(ParseError::DateUnparseable { .. })
    ));
    assert!(normalize_caption_date("").is_err());
    assert!(normalize_caption_date("January 2021").is_err());
}

#[test]
fn separator_is_stripped_once() {
    assert_eq!(strip_caption_separator("2021 January 01:  "), "2021 January 01");
    assert_eq!(strip_caption_separator("2021 January 01"), "2021 January 01");
}
