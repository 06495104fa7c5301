//! Error types for the quiz engine.

use thiserror::Error;

/// Result type for question sourcing and round building.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors raised while fetching questions or assembling a round.
///
/// These all mean "the round cannot start"; a session never leaves
/// `Idle` because of them. Invalid operations on a running session are
/// silent no-ops, not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The requested category does not exist in the source.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A category fetch failed in the underlying source.
    #[error("failed to fetch category '{category}': {reason}")]
    Fetch {
        /// The category that was being fetched.
        category: String,
        /// Source-specific description of the failure.
        reason: String,
    },

    /// No requested category yielded a usable question.
    #[error("no usable questions available")]
    NoQuestions,
}
