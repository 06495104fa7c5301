//! State-change events emitted to the presentation layer.
//!
//! The engine never renders or plays media; it queues these events and
//! the host drains them after each session call
//! ([`QuizSession::drain_events`](crate::session::QuizSession::drain_events)).

use serde::{Deserialize, Serialize};

use crate::question::Question;
use crate::summary::RoundSummary;

/// A state-change notification for the presentation sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizEvent {
    /// A question became the current one and its countdown started.
    QuestionShown {
        /// 0-based index in the round.
        index: usize,
        /// The question to render.
        question: Question,
        /// Effective time limit for this showing, in units.
        time_limit: u32,
    },
    /// One time unit elapsed on the current countdown.
    Tick {
        /// Units remaining.
        remaining: u32,
    },
    /// The current question was resolved by an answer or a timeout.
    AnswerResolved {
        /// Whether the recorded answer was correct (false on timeout).
        correct: bool,
        /// The correct option, for the reveal.
        correct_option: String,
        /// The selected option, or `None` on timeout.
        selected: Option<String>,
    },
    /// The running score changed.
    ScoreChanged {
        /// The new score.
        score: u32,
    },
    /// The 50/50 lifeline hid options; rendering only.
    LifelineApplied {
        /// The incorrect options to hide.
        hidden: Vec<String>,
    },
    /// The round reached its terminal state.
    RoundFinished {
        /// Scoring summary, including the rank tier cue.
        summary: RoundSummary,
    },
}
