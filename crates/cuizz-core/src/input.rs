//! Interactive input interpretation.
//!
//! One raw line of user input is classified into a typed [`Action`].
//! Interpretation is pure so the session loop owns all I/O.

use crate::error::InputError;

/// What the player asked for on one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A 1-based answer choice, always in `1..=4`.
    Answer(u8),
    /// Move on without answering or scoring.
    Skip,
    /// End the session immediately.
    Quit,
    /// Reset score and cursor to the first question.
    Restart,
}

/// Classify one line of input (line terminator already stripped).
///
/// Leading spaces and tabs are ignored. With `controls` enabled, a line
/// whose first character is `q`, `s`, or `r` (any case) is a command and
/// the rest of the line is ignored. Anything else must be an integer in
/// `1..=4`, optionally followed by whitespace.
pub fn interpret(line: &str, controls: bool) -> Result<Action, InputError> {
    let rest = line.trim_start_matches([' ', '\t']);

    if controls {
        match rest.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('q') => return Ok(Action::Quit),
            Some('s') => return Ok(Action::Skip),
            Some('r') => return Ok(Action::Restart),
            _ => {}
        }
    }

    let token_end = rest
        .find(|c: char| c.is_whitespace())
        .unwrap_or(rest.len());
    let (token, tail) = rest.split_at(token_end);

    let value: i64 = token.parse().map_err(|_| InputError::NotANumber)?;
    if !tail.trim().is_empty() {
        return Err(InputError::TrailingInput);
    }
    if !(1..=4).contains(&value) {
        return Err(InputError::OutOfRange);
    }

    Ok(Action::Answer(value as u8))
}
