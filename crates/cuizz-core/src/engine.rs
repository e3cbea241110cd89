//! Quiz session state machine and the interactive driver loop.
//!
//! [`QuizSession`] owns the parsed questions and the cursor/score state;
//! [`run_session`] drives it over any `BufRead`/`Write` pair, which is
//! also how the tests script entire sessions.

use std::fmt;
use std::io::{self, BufRead, Write};

use crate::error::InputError;
use crate::input::{self, Action};
use crate::model::QuestionCard;

/// Knobs for one interactive session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Whether q/s/r control commands are recognized.
    pub controls: bool,
    /// Consecutive input-read failures tolerated before the session ends.
    pub max_input_retries: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            controls: true,
            max_input_retries: 3,
        }
    }
}

/// What happened to one answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect {
        /// 1-based index of the alternative that was correct.
        correct_index: u8,
    },
}

/// Final score of a session, always reported against the full deck size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub score: usize,
    pub total: usize,
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You got {}/{} questions correct!",
            self.score, self.total
        )
    }
}

/// The quiz state machine: an immutable question sequence plus a cursor
/// and a score.
#[derive(Debug)]
pub struct QuizSession {
    questions: Vec<QuestionCard>,
    cursor: usize,
    score: usize,
}

impl QuizSession {
    pub fn new(questions: Vec<QuestionCard>) -> Self {
        Self {
            questions,
            cursor: 0,
            score: 0,
        }
    }

    /// The question awaiting an answer, or `None` once the deck is done.
    pub fn current(&self) -> Option<&QuestionCard> {
        self.questions.get(self.cursor)
    }

    /// 0-based index of the next question to present.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.questions.len()
    }

    /// Score `choice` (1-based) against the current question and advance.
    /// Returns `None` if the session is already finished.
    pub fn answer(&mut self, choice: u8) -> Option<Outcome> {
        let correct_index = self.questions.get(self.cursor)?.correct_index;
        self.cursor += 1;

        if choice == correct_index {
            self.score += 1;
            Some(Outcome::Correct)
        } else {
            Some(Outcome::Incorrect { correct_index })
        }
    }

    /// Advance past the current question without scoring it.
    pub fn skip(&mut self) {
        if self.cursor < self.questions.len() {
            self.cursor += 1;
        }
    }

    /// Throw away all progress and start over from the first question.
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.score = 0;
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            score: self.score,
            total: self.questions.len(),
        }
    }
}

/// Run a full interactive session over `input`/`output`.
///
/// Prints each question card, prompts until the line is interpretable,
/// applies the action, and prints the outcome. The final report line is
/// printed on every exit path: deck exhausted, quit, or input stream
/// gone. An empty deck reports `0/0` without ever prompting.
pub fn run_session<R, W>(
    session: &mut QuizSession,
    input: &mut R,
    output: &mut W,
    options: &SessionOptions,
) -> io::Result<SessionReport>
where
    R: BufRead,
    W: Write,
{
    let mut read_failures: u32 = 0;

    'quiz: while let Some(card) = session.current() {
        print_question_card(output, card, session.cursor() + 1)?;

        let action = loop {
            write!(output, "{}", prompt_hint(options.controls))?;
            output.flush()?;

            let mut line = String::new();
            let interpreted = match input.read_line(&mut line) {
                Ok(0) => Err(InputError::Closed),
                Ok(_) => {
                    trim_line_ending(&mut line);
                    input::interpret(&line, options.controls)
                }
                Err(e) => Err(InputError::Read(e)),
            };

            match interpreted {
                Ok(action) => {
                    read_failures = 0;
                    break action;
                }
                Err(err) if err.is_retryable() => {
                    writeln!(
                        output,
                        "{} {}",
                        rejection_reason(&err),
                        expected_hint(options.controls)
                    )?;
                }
                Err(InputError::Closed) => {
                    tracing::warn!("input stream closed, ending the session");
                    writeln!(output)?;
                    break 'quiz;
                }
                Err(err) => {
                    read_failures += 1;
                    if read_failures >= options.max_input_retries {
                        tracing::warn!(%err, "giving up after repeated input failures");
                        writeln!(output)?;
                        break 'quiz;
                    }
                    writeln!(output, "Input error. Please try again.")?;
                }
            }
        };

        match action {
            Action::Quit => {
                writeln!(output, "Quitting early. Progress saved up to this point.")?;
                break;
            }
            Action::Skip => {
                writeln!(output, "Skipped.")?;
                writeln!(output)?;
                session.skip();
            }
            Action::Restart => {
                writeln!(output, "Restarting quiz...")?;
                session.restart();
            }
            Action::Answer(choice) => {
                match session.answer(choice) {
                    Some(Outcome::Correct) => writeln!(output, "You got it correct!")?,
                    Some(Outcome::Incorrect { correct_index }) => {
                        writeln!(output, "Incorrect. The correct answer was {correct_index}")?
                    }
                    None => {}
                }
                writeln!(output)?;
            }
        }
    }

    let report = session.report();
    writeln!(output, "{report}")?;
    Ok(report)
}

fn print_question_card<W: Write>(
    output: &mut W,
    card: &QuestionCard,
    number: usize,
) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "Question {number}:")?;
    writeln!(output, "{}", card.prompt)?;
    writeln!(output)?;
    for (index, alternative) in card.alternatives.iter().enumerate() {
        writeln!(output, "{}. {}", index + 1, alternative)?;
    }
    Ok(())
}

fn prompt_hint(controls: bool) -> &'static str {
    if controls {
        "Your answer (1-4, q=quit, s=skip, r=restart): "
    } else {
        "Your answer (1-4): "
    }
}

fn expected_hint(controls: bool) -> &'static str {
    if controls {
        "Enter 1-4, or q/s/r."
    } else {
        "Enter 1-4."
    }
}

fn rejection_reason(err: &InputError) -> &'static str {
    match err {
        InputError::TrailingInput => "Unexpected characters after the number.",
        InputError::OutOfRange => "Number out of range.",
        _ => "Invalid input.",
    }
}

fn trim_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_questions_str;

    const DECK: &str = "\
What is the capital of France?
- Paris
- Berlin
- Madrid
- Rome
1

2+2?
- 3
- 4
- 5
- 6
2
";

    fn session(deck: &str) -> QuizSession {
        QuizSession::new(parse_questions_str(deck).unwrap())
    }

    fn run(deck: &str, input: &str, options: &SessionOptions) -> (SessionReport, String) {
        let mut quiz = session(deck);
        let mut reader = input.as_bytes();
        let mut output = Vec::new();
        let report = run_session(&mut quiz, &mut reader, &mut output, options).unwrap();
        (report, String::from_utf8(output).unwrap())
    }

    #[test]
    fn answering_scores_matches_only() {
        let mut quiz = session(DECK);
        assert_eq!(quiz.answer(1), Some(Outcome::Correct));
        assert_eq!(
            quiz.answer(4),
            Some(Outcome::Incorrect { correct_index: 2 })
        );
        assert!(quiz.is_finished());
        assert_eq!(quiz.answer(1), None);
        assert_eq!(quiz.report(), SessionReport { score: 1, total: 2 });
    }

    #[test]
    fn skip_advances_without_scoring() {
        let mut quiz = session(DECK);
        quiz.skip();
        assert_eq!(quiz.cursor(), 1);
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn restart_resets_score_and_cursor() {
        let mut quiz = session(DECK);
        quiz.answer(1);
        quiz.restart();
        assert_eq!(quiz.cursor(), 0);
        assert_eq!(quiz.score(), 0);
        assert_eq!(quiz.current().unwrap().prompt, "What is the capital of France?");
    }

    #[test]
    fn full_run_all_correct() {
        let (report, transcript) = run(DECK, "1\n2\n", &SessionOptions::default());
        assert_eq!(report, SessionReport { score: 2, total: 2 });
        assert_eq!(transcript.matches("You got it correct!").count(), 2);
        assert!(transcript.contains("You got 2/2 questions correct!"));
    }

    #[test]
    fn wrong_answer_names_the_correct_index() {
        let (report, transcript) = run(DECK, "2\n2\n", &SessionOptions::default());
        assert_eq!(report.score, 1);
        assert!(transcript.contains("Incorrect. The correct answer was 1"));
    }

    #[test]
    fn quit_reports_against_the_full_total() {
        let (report, transcript) = run(DECK, "1\nq\n", &SessionOptions::default());
        assert_eq!(report, SessionReport { score: 1, total: 2 });
        assert!(transcript.contains("Quitting early. Progress saved up to this point."));
        assert!(transcript.contains("You got 1/2 questions correct!"));
        // The second question was presented but never resolved.
        assert!(transcript.contains("2+2?"));
        assert_eq!(transcript.matches("You got it correct!").count(), 1);
    }

    #[test]
    fn skip_gives_no_correctness_feedback() {
        let (report, transcript) = run(DECK, "s\n2\n", &SessionOptions::default());
        assert_eq!(report.score, 1);
        assert!(transcript.contains("Skipped."));
        assert!(!transcript.contains("The correct answer was 1"));
    }

    #[test]
    fn restart_discards_prior_progress() {
        // Correct answer, restart, then answer both questions again.
        let (report, transcript) = run(DECK, "1\nr\n4\n2\n", &SessionOptions::default());
        assert_eq!(report, SessionReport { score: 1, total: 2 });
        assert!(transcript.contains("Restarting quiz..."));
        // Question 1 was presented twice.
        assert_eq!(
            transcript.matches("What is the capital of France?").count(),
            2
        );
    }

    #[test]
    fn invalid_input_reprompts_without_consuming_the_question() {
        let deck = "2+2?\n- 3\n- 4\n- 5\n- 6\n2\n";
        let (report, transcript) = run(deck, "9\n2\n", &SessionOptions::default());
        assert_eq!(report, SessionReport { score: 1, total: 1 });
        assert!(transcript.contains("Number out of range. Enter 1-4, or q/s/r."));
        assert!(transcript.contains("You got it correct!"));
    }

    #[test]
    fn trailing_garbage_and_non_numbers_get_distinct_hints() {
        let (_, transcript) = run(DECK, "1 oops\nhello\n1\n2\n", &SessionOptions::default());
        assert!(transcript.contains("Unexpected characters after the number."));
        assert!(transcript.contains("Invalid input. Enter 1-4, or q/s/r."));
    }

    #[test]
    fn controls_disabled_rejects_commands() {
        let options = SessionOptions {
            controls: false,
            ..Default::default()
        };
        let (report, transcript) = run(DECK, "q\n1\n2\n", &options);
        assert_eq!(report.score, 2);
        assert!(transcript.contains("Invalid input. Enter 1-4."));
        assert!(transcript.contains("Your answer (1-4): "));
        assert!(!transcript.contains("q=quit"));
    }

    #[test]
    fn empty_deck_reports_zero_of_zero() {
        let (report, transcript) = run("", "", &SessionOptions::default());
        assert_eq!(report, SessionReport { score: 0, total: 0 });
        assert!(transcript.contains("You got 0/0 questions correct!"));
        assert!(!transcript.contains("Question 1:"));
    }

    #[test]
    fn closed_input_stream_ends_the_session_with_a_report() {
        let (report, transcript) = run(DECK, "1\n", &SessionOptions::default());
        assert_eq!(report, SessionReport { score: 1, total: 2 });
        assert!(transcript.contains("You got 1/2 questions correct!"));
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("tty went away"))
        }
    }

    impl io::BufRead for FailingReader {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Err(io::Error::other("tty went away"))
        }
        fn consume(&mut self, _amt: usize) {}
    }

    #[test]
    fn repeated_read_failures_are_capped() {
        let mut quiz = session(DECK);
        let mut output = Vec::new();
        let report = run_session(
            &mut quiz,
            &mut FailingReader,
            &mut output,
            &SessionOptions::default(),
        )
        .unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(report, SessionReport { score: 0, total: 2 });
        assert!(transcript.contains("Input error. Please try again."));
        assert!(transcript.contains("You got 0/2 questions correct!"));
    }
}
