//! Error types for question parsing and interactive input.
//!
//! `ParseError` is fatal: a malformed block aborts the whole load and no
//! partially valid question set reaches the engine. `InputError` is
//! classified so the session loop can decide between re-prompting and
//! ending the session.

use thiserror::Error;

/// Errors raised while parsing a question file.
///
/// `question` fields carry the 1-based ordinal of the block being read
/// when the error was detected.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file ended while an alternative line was expected.
    #[error("question {question}: unexpected end of file while reading alternative {slot}")]
    MissingAlternative { question: usize, slot: usize },

    /// An alternative line did not start with the `"- "` marker.
    #[error(
        "question {question}: invalid format for alternative {slot}, \
         alternatives must start with \"- \" (got \"{line}\")"
    )]
    MalformedAlternative {
        question: usize,
        slot: usize,
        line: String,
    },

    /// An alternative line carried the marker but no text.
    #[error("question {question}: alternative {slot} is empty")]
    EmptyAlternative { question: usize, slot: usize },

    /// The file ended while the correct-alternative line was expected.
    #[error("question {question}: unexpected end of file while reading the correct alternative")]
    MissingCorrectIndex { question: usize },

    /// The correct-alternative line was not an integer in 1..=4.
    #[error("question {question}: invalid correct alternative: \"{line}\"")]
    InvalidCorrectIndex { question: usize, line: String },

    /// The underlying line source failed.
    #[error("failed to read question file")]
    Io(#[from] std::io::Error),
}

/// Errors raised while interpreting one line of interactive input.
#[derive(Debug, Error)]
pub enum InputError {
    /// The line held no parseable number (and no recognized command).
    #[error("input is not a number")]
    NotANumber,

    /// A number was followed by non-whitespace characters.
    #[error("unexpected characters after the number")]
    TrailingInput,

    /// The number was outside 1..=4.
    #[error("answer out of range")]
    OutOfRange,

    /// The input stream reached end-of-input.
    #[error("input stream closed")]
    Closed,

    /// Reading from the input stream failed.
    #[error("failed to read input: {0}")]
    Read(#[from] std::io::Error),
}

impl InputError {
    /// Returns `true` for errors worth re-prompting over. `Closed` and
    /// `Read` come from the stream itself, not the typed line, so
    /// re-prompting cannot help indefinitely.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            InputError::NotANumber | InputError::TrailingInput | InputError::OutOfRange
        )
    }
}
