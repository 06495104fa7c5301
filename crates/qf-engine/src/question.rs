//! The question model for a built round.
//!
//! A `Question` is identified positionally within its round; there are
//! no persistent IDs. The origin category is only present when the
//! round pooled multiple categories, and the reverse note only when
//! the reverse modifier rewrote the question.

use serde::{Deserialize, Serialize};

/// A single playable question in a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The prompt shown to the player.
    pub prompt: String,
    /// The options in display order. The correct answer is among them.
    pub options: Vec<String>,
    /// The text of the correct option.
    pub answer: String,
    /// Category this question came from (mix-style sourcing only).
    pub category: Option<String>,
    /// For reverse-mode questions, the pre-transform answer text.
    /// Display metadata only; never consulted for scoring.
    pub reverse_note: Option<String>,
}

impl Question {
    /// Create a question with no category tag or reverse note.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            answer: answer.into(),
            category: None,
            reverse_note: None,
        }
    }

    /// Whether the given choice matches the correct option.
    pub fn is_correct(&self, choice: &str) -> bool {
        self.answer == choice
    }

    /// All options that are not the correct answer, in display order.
    pub fn incorrect_options(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| **o != self.answer)
            .map(String::as_str)
            .collect()
    }
}
