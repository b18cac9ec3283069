use thiserror::Error;

/// An entry page that does not follow the expected layout.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("date text {text:?} could not be parsed")]
    DateUnparseable { text: String },
    #[error("no explanation marker found on page")]
    ExplanationMarkerMissing,
    #[error("explanation marker found but no paragraph follows it")]
    ExplanationUnterminated,
}
