//! Per-question countdown control.
//!
//! The controller is a logical countdown: the host calls
//! [`TimerController::tick`] once per elapsed time unit, and the
//! controller reports the remaining time or a single expiry. Handles
//! carry a generation counter so a cancel racing a restart can detect
//! staleness and no-op instead of killing the next question's clock.

use rand::Rng;
use rand::rngs::StdRng;

use crate::config::MIN_TIME_LIMIT;
use crate::modifier::{Modifier, Modifiers};

/// A handle for the countdown started by one `start` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    generation: u64,
}

/// Outcome of advancing the countdown by one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Still counting; this many units remain.
    Running(u32),
    /// The countdown reached zero. Reported exactly once.
    Expired,
}

/// Drives one countdown at a time, generation-counted.
#[derive(Debug, Default)]
pub struct TimerController {
    generation: u64,
    remaining: Option<u32>,
}

impl TimerController {
    /// Create a controller with no countdown running.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a countdown of `limit` units, implicitly cancelling any
    /// countdown started earlier.
    pub fn start(&mut self, limit: u32) -> TimerHandle {
        self.generation += 1;
        self.remaining = Some(limit.max(1));
        TimerHandle {
            generation: self.generation,
        }
    }

    /// Advance by one unit. Returns `None` when nothing is running.
    pub fn tick(&mut self) -> Option<TimerTick> {
        let remaining = self.remaining.as_mut()?;
        *remaining -= 1;
        if *remaining == 0 {
            self.remaining = None;
            Some(TimerTick::Expired)
        } else {
            Some(TimerTick::Running(*remaining))
        }
    }

    /// Stop the countdown belonging to `handle` and suppress its
    /// expiry. A stale handle, or a cancel after expiry, is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) {
        if handle.generation == self.generation {
            self.remaining = None;
        }
    }

    /// Stop whatever countdown is running, if any.
    pub fn cancel_active(&mut self) {
        self.remaining = None;
    }

    /// Units left on the active countdown, if one is running.
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Whether a countdown is currently running.
    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }
}

/// Compute the effective limit for one question.
///
/// With chaos enabled the limit is drawn uniformly from
/// `[MIN_TIME_LIMIT, base]` independently per question; otherwise it
/// is the fixed base limit.
pub fn effective_limit(base: u32, modifiers: Modifiers, rng: &mut StdRng) -> u32 {
    if modifiers.enabled(Modifier::Chaos) {
        rng.random_range(MIN_TIME_LIMIT..=base.max(MIN_TIME_LIMIT))
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn counts_down_and_expires_once() {
        let mut timer = TimerController::new();
        timer.start(3);
        assert_eq!(timer.tick(), Some(TimerTick::Running(2)));
        assert_eq!(timer.tick(), Some(TimerTick::Running(1)));
        assert_eq!(timer.tick(), Some(TimerTick::Expired));
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.tick(), None);
    }

    #[test]
    fn cancel_suppresses_expiry() {
        let mut timer = TimerController::new();
        let handle = timer.start(2);
        timer.cancel(handle);
        assert_eq!(timer.tick(), None);
    }

    #[test]
    fn cancel_after_expiry_is_noop() {
        let mut timer = TimerController::new();
        let handle = timer.start(1);
        assert_eq!(timer.tick(), Some(TimerTick::Expired));
        timer.cancel(handle);
        timer.cancel(handle);
        assert_eq!(timer.tick(), None);
    }

    #[test]
    fn stale_handle_cannot_cancel_new_countdown() {
        let mut timer = TimerController::new();
        let old = timer.start(5);
        timer.start(5);
        timer.cancel(old);
        assert!(timer.is_running());
        assert_eq!(timer.tick(), Some(TimerTick::Running(4)));
    }

    #[test]
    fn restart_replaces_previous_countdown() {
        let mut timer = TimerController::new();
        timer.start(10);
        timer.start(2);
        assert_eq!(timer.tick(), Some(TimerTick::Running(1)));
        assert_eq!(timer.tick(), Some(TimerTick::Expired));
    }

    #[test]
    fn zero_limit_still_runs_one_unit() {
        let mut timer = TimerController::new();
        timer.start(0);
        assert_eq!(timer.tick(), Some(TimerTick::Expired));
    }

    #[test]
    fn fixed_limit_without_chaos() {
        let mut rng = StdRng::seed_from_u64(42);
        let limit = effective_limit(20, Modifiers::none(), &mut rng);
        assert_eq!(limit, 20);
    }

    #[test]
    fn chaos_limit_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let modifiers = Modifiers::none().with(Modifier::Chaos);
        for _ in 0..500 {
            let limit = effective_limit(20, modifiers, &mut rng);
            assert!((5..=20).contains(&limit), "limit out of range: {limit}");
        }
    }

    #[test]
    fn chaos_limit_varies_per_draw() {
        let mut rng = StdRng::seed_from_u64(42);
        let modifiers = Modifiers::none().with(Modifier::Chaos);
        let draws: Vec<u32> = (0..50)
            .map(|_| effective_limit(30, modifiers, &mut rng))
            .collect();
        assert!(draws.iter().any(|d| *d != draws[0]), "chaos draws never varied");
    }
}
