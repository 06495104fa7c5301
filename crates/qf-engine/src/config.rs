//! Configuration for a quiz round.

use serde::{Deserialize, Serialize};

use crate::modifier::{Modifier, Modifiers};

/// Fewest questions a round may request.
pub const MIN_QUESTIONS: usize = 5;
/// Most questions a round may request.
pub const MAX_QUESTIONS: usize = 30;
/// Floor for the per-question time limit, in time units.
pub const MIN_TIME_LIMIT: u32 = 5;

/// Which categories to draw questions from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategorySelection {
    /// A single named category.
    Single(String),
    /// Pool every category the source knows about.
    Mix,
}

/// Configuration supplied once per round start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Category selection for sourcing.
    pub category: CategorySelection,
    /// Requested question count, clamped to [5, 30].
    pub count: usize,
    /// Per-question base time limit, clamped to >= 5 units.
    pub base_time_limit: u32,
    /// Enabled game-mode modifiers, snapshotted at round start.
    pub modifiers: Modifiers,
    /// RNG seed for reproducible sampling, shuffles and chaos draws.
    pub seed: u64,
}

impl RoundConfig {
    /// Create a config for one category with default count (5),
    /// time limit (20 units), no modifiers, and seed 42.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: CategorySelection::Single(category.into()),
            count: MIN_QUESTIONS,
            base_time_limit: 20,
            modifiers: Modifiers::none(),
            seed: 42,
        }
    }

    /// Create a config that pools every category.
    pub fn mix() -> Self {
        Self {
            category: CategorySelection::Mix,
            ..Self::new("")
        }
    }

    /// Set the question count (clamped to [5, 30]).
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count.clamp(MIN_QUESTIONS, MAX_QUESTIONS);
        self
    }

    /// Set the base time limit (clamped to >= 5 units).
    #[must_use]
    pub fn with_time_limit(mut self, limit: u32) -> Self {
        self.base_time_limit = limit.max(MIN_TIME_LIMIT);
        self
    }

    /// Enable one modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.enable(modifier);
        self
    }

    /// Replace the whole modifier set.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Whether sourcing pools all categories: explicit mix selection,
    /// the mix modifier, or reverse (which needs cross-question
    /// distractors).
    pub fn pools_all_categories(&self) -> bool {
        matches!(self.category, CategorySelection::Mix) || self.modifiers.forces_mix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = RoundConfig::new("Math");
        assert_eq!(cfg.category, CategorySelection::Single("Math".into()));
        assert_eq!(cfg.count, 5);
        assert_eq!(cfg.base_time_limit, 20);
        assert_eq!(cfg.seed, 42);
        assert!(!cfg.pools_all_categories());
    }

    #[test]
    fn count_clamped() {
        assert_eq!(RoundConfig::new("Math").with_count(2).count, 5);
        assert_eq!(RoundConfig::new("Math").with_count(100).count, 30);
        assert_eq!(RoundConfig::new("Math").with_count(12).count, 12);
    }

    #[test]
    fn time_limit_clamped() {
        assert_eq!(RoundConfig::new("Math").with_time_limit(1).base_time_limit, 5);
        assert_eq!(RoundConfig::new("Math").with_time_limit(45).base_time_limit, 45);
    }

    #[test]
    fn mix_selection_pools() {
        assert!(RoundConfig::mix().pools_all_categories());
    }

    #[test]
    fn reverse_modifier_pools_despite_single_category() {
        let cfg = RoundConfig::new("Math").with_modifier(Modifier::Reverse);
        assert!(cfg.pools_all_categories());
    }

    #[test]
    fn sudden_death_does_not_pool() {
        let cfg = RoundConfig::new("Math").with_modifier(Modifier::SuddenDeath);
        assert!(!cfg.pools_all_categories());
    }
}
