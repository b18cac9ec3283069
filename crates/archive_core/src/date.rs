//! Free-form publication dates.
//!
//! Index captions look like `2021 January 01:` but the parser is permissive:
//! month names in any position, weekday names, ordinal suffixes and the
//! common numeric layouts are accepted. Output is always `YYYY-MM-DD`.

use chrono::NaiveDate;

use crate::ParseError;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Words that may appear around a date without changing its meaning.
const FILLER: [&str; 9] = ["st", "nd", "rd", "th", "of", "the", "on", "at", "ad"];

/// Turn an index caption into a canonical `YYYY-MM-DD` date.
pub fn normalize_caption_date(caption: &str) -> Result<String, ParseError> {
    let text = strip_caption_separator(caption);
    parse_free_form_date(text)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .ok_or_else(|| ParseError::DateUnparseable {
            text: text.to_string(),
        })
}

/// Drop the `:` separator (and surrounding whitespace) the index places
/// between the date and the entry link.
pub fn strip_caption_separator(caption: &str) -> &str {
    let trimmed = caption.trim_end();
    trimmed.strip_suffix(':').unwrap_or(trimmed).trim()
}

pub fn parse_free_form_date(text: &str) -> Option<NaiveDate> {
    let mut month = None;
    let mut numbers = Vec::new();

    for token in tokenize(text)? {
        match token {
            Token::Number(number) => numbers.push(number),
            Token::Word(word) => {
                let lower = word.to_lowercase();
                if let Some(named) = month_from_name(&lower) {
                    if month.replace(named).is_some() {
                        return None;
                    }
                } else if !is_weekday(&lower) && !FILLER.contains(&lower.as_str()) {
                    return None;
                }
            }
        }
    }

    let (year, month, day) = match (month, numbers.as_slice()) {
        (Some(month), [first, second]) => {
            if first.is_year_like() && !second.is_year_like() {
                (first.as_year(), month, second.value)
            } else {
                (second.as_year(), month, first.value)
            }
        }
        (None, [first, second, third]) => {
            if first.is_year_like() {
                (first.as_year(), second.value, third.value)
            } else if first.value > 12 {
                (third.as_year(), second.value, first.value)
            } else {
                (third.as_year(), first.value, second.value)
            }
        }
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Number {
    value: u32,
    digits: usize,
}

impl Number {
    fn is_year_like(&self) -> bool {
        self.digits >= 3 || self.value > 31
    }

    fn as_year(&self) -> i32 {
        let value = self.value as i32;
        if self.digits > 2 {
            value
        } else if value < 70 {
            2000 + value
        } else {
            1900 + value
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Number(Number),
}

/// Split into runs of ASCII digits and runs of letters; everything else
/// separates tokens. `1st` becomes `1` and `st`.
fn tokenize(text: &str) -> Option<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(|c: char| c.is_ascii_digit() || c.is_alphabetic()) {
        rest = &rest[start..];
        let numeric = rest.starts_with(|c: char| c.is_ascii_digit());
        let end = if numeric {
            rest.find(|c: char| !c.is_ascii_digit())
        } else {
            rest.find(|c: char| !c.is_alphabetic())
        }
        .unwrap_or(rest.len());

        let (run, tail) = rest.split_at(end);
        if numeric {
            tokens.push(Token::Number(Number {
                value: run.parse().ok()?,
                digits: run.len(),
            }));
        } else {
            tokens.push(Token::Word(run));
        }
        rest = tail;
    }

    Some(tokens)
}

fn month_from_name(lower: &str) -> Option<u32> {
    if lower.len() < 3 {
        return None;
    }
    if lower == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|month| month.starts_with(lower))
        .map(|index| index as u32 + 1)
}

fn is_weekday(lower: &str) -> bool {
    lower.len() >= 3 && WEEKDAYS.iter().any(|day| day.starts_with(lower))
}

#[cfg(test)]
mod tests {
    use super::{tokenize, Number, Token};

    #[test]
    fn ordinal_suffix_splits_from_number() {
        let tokens = tokenize("1st").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(Number {
                    value: 1,
                    digits: 1
                }),
                Token::Word("st"),
            ]
        );
    }

    #[test]
    fn two_digit_years_pivot_at_seventy() {
        let year = |value| Number { value, digits: 2 }.as_year();
        assert_eq!(year(95), 1995);
        assert_eq!(year(21), 2021);
        assert_eq!(year(69), 2069);
        assert_eq!(year(70), 1970);
    }

    #[test]
    fn oversized_number_is_not_a_date() {
        assert!(tokenize("99999999999999999999").is_none());
    }
}
