//! Round scoring summary and rank tiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::slot::AnswerSlot;

/// Rank tier for a finished round, by score ratio.
///
/// Each tier is the identity of a distinct completion cue; the
/// presentation layer decides what to show or play for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankTier {
    /// Score ratio of at least 90%.
    Top,
    /// Score ratio of at least 50%.
    Mid,
    /// Everything below 50%.
    Low,
}

impl RankTier {
    /// Classify a score against a question total.
    pub fn from_score(score: u32, total: usize) -> Self {
        if total == 0 {
            return Self::Low;
        }
        let ratio = f64::from(score) / total as f64;
        if ratio >= 0.9 {
            Self::Top
        } else if ratio >= 0.5 {
            Self::Mid
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for RankTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Mid => write!(f, "mid"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Aggregate result of a finished round.
///
/// `answered` counts explicit choices only; `timed_out` counts
/// expiries. [`attempted`](Self::attempted) is their sum, so both
/// readings of "answered" are available to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Questions in the round.
    pub total: usize,
    /// Slots holding an explicit choice.
    pub answered: usize,
    /// Slots that expired without an answer.
    pub timed_out: usize,
    /// Final score (count of correct choices).
    pub score: u32,
    /// Rank tier for the completion cue.
    pub tier: RankTier,
    /// When the round started.
    pub started_at: DateTime<Utc>,
    /// When the round finished.
    pub finished_at: DateTime<Utc>,
}

impl RoundSummary {
    /// Tally the slots of a finished round.
    pub fn tally(slots: &[AnswerSlot], score: u32, started_at: DateTime<Utc>) -> Self {
        let answered = slots
            .iter()
            .filter(|s| matches!(s, AnswerSlot::Answered(_)))
            .count();
        let timed_out = slots.iter().filter(|s| **s == AnswerSlot::TimedOut).count();
        Self {
            total: slots.len(),
            answered,
            timed_out,
            score,
            tier: RankTier::from_score(score, slots.len()),
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Slots that are no longer open: answered or timed out.
    pub fn attempted(&self) -> usize {
        self.answered + self.timed_out
    }
}
