//! Core data model for cuizz.

/// How many alternatives every question carries.
pub const ALTERNATIVE_COUNT: usize = 4;

/// One parsed question block: a prompt, four alternatives, and the
/// 1-based index of the correct alternative.
///
/// Cards only come out of the parser, which guarantees a non-empty
/// prompt, non-empty alternatives, and `correct_index` in `1..=4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCard {
    /// The question text, exactly as it appeared in the file.
    pub prompt: String,
    /// The candidate answers, in file order, marker stripped.
    pub alternatives: [String; ALTERNATIVE_COUNT],
    /// 1-based index of the correct alternative, always in `1..=4`.
    pub correct_index: u8,
}

impl QuestionCard {
    /// Returns `true` if `choice` (1-based) picks the correct alternative.
    pub fn is_correct(&self, choice: u8) -> bool {
        choice == self.correct_index
    }

    /// The text of the correct alternative.
    pub fn correct_alternative(&self) -> &str {
        &self.alternatives[usize::from(self.correct_index) - 1]
    }
}
