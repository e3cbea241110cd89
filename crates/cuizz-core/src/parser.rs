//! Line-oriented question file parser.
//!
//! A question file is a sequence of blocks: a prompt line, four
//! alternative lines marked with `"- "`, and a correct-index line,
//! separated by optional blank lines. Parsing is all-or-nothing: the
//! first malformed block fails the whole load.

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ParseError;
use crate::model::{QuestionCard, ALTERNATIVE_COUNT};

/// The literal prefix every alternative line must carry.
pub const ALTERNATIVE_MARKER: &str = "- ";

/// Open `path` and parse every question block in it.
pub fn load_questions(path: &Path) -> Result<Vec<QuestionCard>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("could not open file: {}", path.display()))?;

    let questions = parse_questions(std::io::BufReader::new(file))
        .with_context(|| format!("failed to parse questions from {}", path.display()))?;

    tracing::debug!(count = questions.len(), path = %path.display(), "loaded questions");
    Ok(questions)
}

/// Parse question blocks from any line source.
///
/// Returns an empty vector for input with no non-blank lines; callers
/// must handle a zero-question deck.
pub fn parse_questions<R: BufRead>(reader: R) -> Result<Vec<QuestionCard>, ParseError> {
    let mut lines = reader.lines();
    let mut questions = Vec::new();

    while let Some(prompt) = next_prompt(&mut lines)? {
        questions.push(parse_block(&mut lines, prompt, questions.len() + 1)?);
    }

    Ok(questions)
}

/// Parse question blocks from an in-memory string.
pub fn parse_questions_str(content: &str) -> Result<Vec<QuestionCard>, ParseError> {
    parse_questions(content.as_bytes())
}

/// Skip blank lines until a prompt line is found. `None` means the input
/// ended cleanly between blocks.
fn next_prompt<R: BufRead>(
    lines: &mut std::io::Lines<R>,
) -> Result<Option<String>, ParseError> {
    for line in lines {
        let line = line?;
        if !line.is_empty() {
            return Ok(Some(line));
        }
    }
    Ok(None)
}

/// Parse the rest of a block: four alternatives and the correct index.
/// `question` is the 1-based ordinal used in error values.
fn parse_block<R: BufRead>(
    lines: &mut std::io::Lines<R>,
    prompt: String,
    question: usize,
) -> Result<QuestionCard, ParseError> {
    let mut alternatives: [String; ALTERNATIVE_COUNT] = Default::default();

    for (index, alternative) in alternatives.iter_mut().enumerate() {
        let slot = index + 1;
        let line = lines
            .next()
            .ok_or(ParseError::MissingAlternative { question, slot })??;

        let text = line
            .strip_prefix(ALTERNATIVE_MARKER)
            .ok_or_else(|| ParseError::MalformedAlternative {
                question,
                slot,
                line: line.clone(),
            })?;

        if text.is_empty() {
            return Err(ParseError::EmptyAlternative { question, slot });
        }
        *alternative = text.to_string();
    }

    let line = lines
        .next()
        .ok_or(ParseError::MissingCorrectIndex { question })??;

    let correct_index = parse_correct_index(&line).ok_or_else(|| {
        ParseError::InvalidCorrectIndex {
            question,
            line: line.clone(),
        }
    })?;

    Ok(QuestionCard {
        prompt,
        alternatives,
        correct_index,
    })
}

/// Strict parse of a correct-index line: the whitespace-trimmed line must
/// be an integer in 1..=4, with no other content.
fn parse_correct_index(line: &str) -> Option<u8> {
    let value: i64 = line.trim().parse().ok()?;
    (1..=4).contains(&value).then_some(value as u8)
}
