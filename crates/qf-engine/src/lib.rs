//! Core engine for Quickfire, a timed single-player trivia quiz.
//!
//! Builds a round's question set from an abstract [`QuestionSource`]
//! (with mix, reverse and sampling transforms), then drives the round
//! as a state machine with a per-question countdown, scoring, game-mode
//! modifiers and a one-time 50/50 lifeline. Presentation is fully
//! external: the session queues [`QuizEvent`]s and never renders.

pub mod builder;
pub mod config;
pub mod error;
pub mod event;
pub mod modifier;
pub mod question;
pub mod session;
pub mod slot;
pub mod source;
pub mod summary;
pub mod timer;

pub use builder::build_round;
pub use config::{CategorySelection, RoundConfig};
pub use error::{SourceError, SourceResult};
pub use event::QuizEvent;
pub use modifier::{Modifier, Modifiers};
pub use question::Question;
pub use session::{QuizSession, SessionPhase};
pub use slot::AnswerSlot;
pub use source::{QuestionSource, RawQuestion, StaticSource};
pub use summary::{RankTier, RoundSummary};
pub use timer::{TimerController, TimerHandle, TimerTick};
