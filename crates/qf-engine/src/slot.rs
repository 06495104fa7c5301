//! Per-question answer records.

use serde::{Deserialize, Serialize};

/// What the player did with one question.
///
/// A slot is written at most once per round: once a choice or a
/// timeout is recorded, later writes are ignored by the session.
/// Timed-out is distinct from unanswered so the summary can report
/// expiries separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerSlot {
    /// No answer recorded and the countdown has not expired.
    #[default]
    Unanswered,
    /// The option text the player selected.
    Answered(String),
    /// The countdown expired before any answer.
    TimedOut,
}

impl AnswerSlot {
    /// Whether the slot can still accept a write.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Unanswered)
    }

    /// The selected option, if one was recorded.
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::Answered(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_until_written() {
        assert!(AnswerSlot::Unanswered.is_open());
        assert!(!AnswerSlot::Answered("x".into()).is_open());
        assert!(!AnswerSlot::TimedOut.is_open());
    }

    #[test]
    fn selected_only_for_answers() {
        assert_eq!(AnswerSlot::Answered("Paris".into()).selected(), Some("Paris"));
        assert_eq!(AnswerSlot::TimedOut.selected(), None);
        assert_eq!(AnswerSlot::Unanswered.selected(), None);
    }
}
