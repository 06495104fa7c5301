//! Game-mode modifiers.
//!
//! Modifiers are orthogonal toggles consulted by the builder and the
//! session: sudden-death ends the round on the first wrong answer, mix
//! pools every category before sampling, reverse swaps prompts and
//! answers (and forces mix-style sourcing for distractor variety),
//! chaos randomizes each question's time limit.

use serde::{Deserialize, Serialize};

/// A single game-mode toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    /// End the round immediately on the first wrong (non-timeout) answer.
    SuddenDeath,
    /// Pool questions across all categories before sampling.
    Mix,
    /// Swap prompt and answer, with distractor prompts from the round.
    Reverse,
    /// Draw each question's time limit uniformly from [5, base].
    Chaos,
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuddenDeath => write!(f, "sudden-death"),
            Self::Mix => write!(f, "mix"),
            Self::Reverse => write!(f, "reverse"),
            Self::Chaos => write!(f, "chaos"),
        }
    }
}

/// The set of modifiers enabled for a round.
///
/// Snapshotted into `RoundConfig` at round start; toggling afterwards
/// never affects an in-progress round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    sudden_death: bool,
    mix: bool,
    reverse: bool,
    chaos: bool,
}

impl Modifiers {
    /// The empty modifier set.
    pub fn none() -> Self {
        Self::default()
    }

    /// Enable a modifier, builder-style.
    #[must_use]
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.enable(modifier);
        self
    }

    /// Enable a modifier in place.
    pub fn enable(&mut self, modifier: Modifier) {
        *self.flag_mut(modifier) = true;
    }

    /// Disable a modifier in place.
    pub fn disable(&mut self, modifier: Modifier) {
        *self.flag_mut(modifier) = false;
    }

    /// Whether a modifier is enabled.
    pub fn enabled(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::SuddenDeath => self.sudden_death,
            Modifier::Mix => self.mix,
            Modifier::Reverse => self.reverse,
            Modifier::Chaos => self.chaos,
        }
    }

    /// Whether sourcing must pool all categories.
    ///
    /// Reverse needs cross-question distractors, so it forces mix-style
    /// sourcing even when a single category was selected.
    pub fn forces_mix(&self) -> bool {
        self.mix || self.reverse
    }

    fn flag_mut(&mut self, modifier: Modifier) -> &mut bool {
        match modifier {
            Modifier::SuddenDeath => &mut self.sudden_death,
            Modifier::Mix => &mut self.mix,
            Modifier::Reverse => &mut self.reverse,
            Modifier::Chaos => &mut self.chaos,
        }
    }
}
