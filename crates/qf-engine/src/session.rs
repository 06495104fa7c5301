//! The quiz round state machine.
//!
//! One `QuizSession` owns all round state: the built question list,
//! per-question answer slots, the running score, the lifeline flag,
//! and the countdown. Phases move `Idle -> InQuestion -> Revealed ->
//! (InQuestion | Finished)`; `Finished` is terminal. The host drives
//! time by calling [`QuizSession::tick`] once per elapsed unit, and
//! all mutating calls are serialized, so an answer that arrives before
//! the host's next tick always beats the expiry.
//!
//! Invalid operations (duplicate answers, advancing from the wrong
//! phase, a second lifeline) are silent no-ops: they only ever come
//! from duplicate or late UI events.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::config::RoundConfig;
use crate::event::QuizEvent;
use crate::modifier::Modifier;
use crate::question::Question;
use crate::slot::AnswerSlot;
use crate::summary::RoundSummary;
use crate::timer::{TimerController, TimerTick, effective_limit};

/// Ticks between a timeout reveal and the automatic advance.
const REVEAL_DELAY: u32 = 1;

/// How many incorrect options the 50/50 lifeline hides.
const LIFELINE_HIDES: usize = 2;

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No round started. Only `start` leaves this phase.
    Idle,
    /// A question is live and its countdown may be running.
    InQuestion,
    /// The current question was resolved; waiting to advance.
    Revealed,
    /// The round is over. Terminal.
    Finished,
}

/// A single round of play.
pub struct QuizSession {
    config: RoundConfig,
    questions: Vec<Question>,
    slots: Vec<AnswerSlot>,
    index: usize,
    score: u32,
    lifeline_used: bool,
    phase: SessionPhase,
    timer: TimerController,
    auto_advance: Option<u32>,
    started_at: DateTime<Utc>,
    summary: Option<RoundSummary>,
    rng: StdRng,
    events: Vec<QuizEvent>,
}

impl QuizSession {
    /// Create an idle session. Modifiers and timing are snapshotted
    /// from the config; later changes to the caller's copy have no
    /// effect on this round.
    pub fn new(config: RoundConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            questions: Vec::new(),
            slots: Vec::new(),
            index: 0,
            score: 0,
            lifeline_used: false,
            phase: SessionPhase::Idle,
            timer: TimerController::new(),
            auto_advance: None,
            started_at: Utc::now(),
            summary: None,
            rng,
            events: Vec::new(),
        }
    }

    /// Begin the round with a built question list.
    ///
    /// Valid only from `Idle` with a non-empty list; otherwise a
    /// no-op. Resets score, slots and the lifeline, shows question 0
    /// and starts its countdown.
    pub fn start(&mut self, questions: Vec<Question>) {
        if self.phase != SessionPhase::Idle || questions.is_empty() {
            return;
        }
        self.slots = vec![AnswerSlot::Unanswered; questions.len()];
        self.questions = questions;
        self.index = 0;
        self.score = 0;
        self.lifeline_used = false;
        self.started_at = Utc::now();
        self.phase = SessionPhase::InQuestion;
        self.show_current();
    }

    /// Record an answer for the current question.
    ///
    /// Valid only while the question is live and its slot open;
    /// otherwise a no-op. Cancels the countdown synchronously, so an
    /// answer always wins over a pending expiry. With sudden-death on,
    /// a wrong answer finishes the round immediately.
    pub fn submit_answer(&mut self, value: &str) {
        if self.phase != SessionPhase::InQuestion || !self.slots[self.index].is_open() {
            return;
        }
        self.timer.cancel_active();
        self.auto_advance = None;

        let correct = self.questions[self.index].is_correct(value);
        let correct_option = self.questions[self.index].answer.clone();
        self.slots[self.index] = AnswerSlot::Answered(value.to_string());

        if correct {
            self.score += 1;
            self.events.push(QuizEvent::ScoreChanged { score: self.score });
        }
        self.events.push(QuizEvent::AnswerResolved {
            correct,
            correct_option,
            selected: Some(value.to_string()),
        });

        if !correct && self.config.modifiers.enabled(Modifier::SuddenDeath) {
            self.finish();
        } else {
            self.phase = SessionPhase::Revealed;
        }
    }

    /// Advance the clock by one time unit.
    ///
    /// While a question is live this drives its countdown; expiry
    /// marks the slot timed-out, reveals the answer, and schedules the
    /// automatic advance one tick later.
    pub fn tick(&mut self) {
        match self.phase {
            SessionPhase::InQuestion => match self.timer.tick() {
                Some(TimerTick::Running(remaining)) => {
                    self.events.push(QuizEvent::Tick { remaining });
                }
                Some(TimerTick::Expired) => self.expire(),
                None => {}
            },
            SessionPhase::Revealed => {
                if let Some(delay) = self.auto_advance {
                    if delay <= 1 {
                        self.auto_advance = None;
                        self.advance();
                    } else {
                        self.auto_advance = Some(delay - 1);
                    }
                }
            }
            SessionPhase::Idle | SessionPhase::Finished => {}
        }
    }

    /// Move to the next question, or finish after the last one.
    ///
    /// Valid from `Revealed`, or while a re-displayed question's slot
    /// is already resolved (the back-navigation case); otherwise a
    /// no-op.
    pub fn advance(&mut self) {
        let resolved_redisplay =
            self.phase == SessionPhase::InQuestion && !self.slots[self.index].is_open();
        if self.phase != SessionPhase::Revealed && !resolved_redisplay {
            return;
        }
        self.timer.cancel_active();
        self.auto_advance = None;
        if self.index + 1 >= self.questions.len() {
            self.finish();
        } else {
            self.index += 1;
            self.phase = SessionPhase::InQuestion;
            self.show_current();
        }
    }

    /// Re-display the previous question.
    ///
    /// Valid when not at index 0 and the round is not over. The slot
    /// keeps whatever was recorded; only the rendering and the
    /// countdown restart.
    pub fn back(&mut self) {
        let navigable =
            matches!(self.phase, SessionPhase::InQuestion | SessionPhase::Revealed);
        if !navigable || self.index == 0 {
            return;
        }
        self.timer.cancel_active();
        self.auto_advance = None;
        self.index -= 1;
        self.phase = SessionPhase::InQuestion;
        self.show_current();
    }

    /// Use the one-per-round 50/50 lifeline on the current question.
    ///
    /// Hides two incorrect options (fewer if fewer exist), chosen
    /// uniformly. Rendering only: the stored option list, slot and
    /// score are untouched. No-op once used, after an answer, or
    /// outside a live question.
    pub fn use_fifty_fifty(&mut self) {
        if self.phase != SessionPhase::InQuestion
            || self.lifeline_used
            || !self.slots[self.index].is_open()
        {
            return;
        }
        let incorrect = self.questions[self.index].incorrect_options();
        let hidden: Vec<String> = incorrect
            .choose_multiple(&mut self.rng, LIFELINE_HIDES)
            .map(|s| (*s).to_string())
            .collect();
        self.lifeline_used = true;
        self.events.push(QuizEvent::LifelineApplied { hidden });
    }

    /// Take all events queued since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<QuizEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Running score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// 0-based index of the current question.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// The current question, once the round has started.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// The answer slot at an index.
    pub fn slot(&self, index: usize) -> Option<&AnswerSlot> {
        self.slots.get(index)
    }

    /// Number of questions in the round.
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Whether the lifeline has been spent.
    pub fn lifeline_used(&self) -> bool {
        self.lifeline_used
    }

    /// Whether the round reached its terminal state.
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    /// Units left on the live countdown, if one is running.
    pub fn time_remaining(&self) -> Option<u32> {
        self.timer.remaining()
    }

    /// The scoring summary, present once finished.
    pub fn summary(&self) -> Option<&RoundSummary> {
        self.summary.as_ref()
    }

    fn show_current(&mut self) {
        let limit = effective_limit(
            self.config.base_time_limit,
            self.config.modifiers,
            &mut self.rng,
        );
        self.timer.start(limit);
        self.events.push(QuizEvent::QuestionShown {
            index: self.index,
            question: self.questions[self.index].clone(),
            time_limit: limit,
        });
    }

    fn expire(&mut self) {
        if self.slots[self.index].is_open() {
            self.slots[self.index] = AnswerSlot::TimedOut;
            self.events.push(QuizEvent::AnswerResolved {
                correct: false,
                correct_option: self.questions[self.index].answer.clone(),
                selected: None,
            });
        }
        self.phase = SessionPhase::Revealed;
        self.auto_advance = Some(REVEAL_DELAY);
    }

    fn finish(&mut self) {
        self.timer.cancel_active();
        self.auto_advance = None;
        self.phase = SessionPhase::Finished;
        let summary = RoundSummary::tally(&self.slots, self.score, self.started_at);
        self.events.push(QuizEvent::RoundFinished {
            summary: summary.clone(),
        });
        self.summary = Some(summary);
    }
}
