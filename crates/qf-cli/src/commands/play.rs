//! The `play` subcommand: run one interactive round.
//!
//! The terminal is the presentation sink. Raw-mode key polling feeds
//! player actions while the session clock ticks on elapsed wall time,
//! one unit per second, regardless of input. Number keys answer, `h`
//! uses the 50/50 lifeline, `b` goes back, `n` advances after a
//! reveal, `q` abandons the round.

use std::io::{Write, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Args;
use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;
use rand::SeedableRng;
use rand::rngs::StdRng;

use qf_engine::{
    Modifier, Modifiers, QuestionSource, QuizEvent, QuizSession, RankTier, RoundConfig,
    build_round,
};

/// Options for one round of play.
#[derive(Args)]
pub struct PlayOpts {
    /// Category to play (defaults to the first in the bank)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Pool questions from every category
    #[arg(long, conflicts_with = "category")]
    pub mix: bool,

    /// Questions per round (clamped to 5-30)
    #[arg(short = 'n', long, default_value_t = 5)]
    pub count: usize,

    /// Seconds per question (clamped to >= 5)
    #[arg(short, long, default_value_t = 20)]
    pub time: u32,

    /// End the round on the first wrong answer
    #[arg(long)]
    pub sudden_death: bool,

    /// Swap prompts and answers, with distractors from the round
    #[arg(long)]
    pub reverse: bool,

    /// Randomize each question's time limit
    #[arg(long)]
    pub chaos: bool,

    /// RNG seed (defaults to a time-derived seed)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Directory containing category JSON files
    #[arg(short, long, default_value = "data")]
    pub data: PathBuf,
}

/// Build a round from the options and play it interactively.
pub fn run(opts: &PlayOpts) -> Result<(), String> {
    let bank = super::open_bank(&opts.data)?;

    let mut modifiers = Modifiers::none();
    if opts.sudden_death {
        modifiers.enable(Modifier::SuddenDeath);
    }
    if opts.mix {
        modifiers.enable(Modifier::Mix);
    }
    if opts.reverse {
        modifiers.enable(Modifier::Reverse);
    }
    if opts.chaos {
        modifiers.enable(Modifier::Chaos);
    }

    let config = if opts.mix {
        RoundConfig::mix()
    } else {
        let category = match &opts.category {
            Some(name) => name.clone(),
            None => bank
                .list_categories()
                .into_iter()
                .next()
                .ok_or_else(|| "no categories in the bank".to_string())?,
        };
        RoundConfig::new(category)
    };
    let config = config
        .with_count(opts.count)
        .with_time_limit(opts.time)
        .with_modifiers(modifiers)
        .with_seed(opts.seed.unwrap_or_else(time_seed));

    let mut rng = StdRng::seed_from_u64(config.seed);
    let questions =
        build_round(&config, &bank, &mut rng).map_err(|e| format!("cannot start round: {e}"))?;

    let mut session = QuizSession::new(config);
    session.start(questions);

    terminal::enable_raw_mode().map_err(|e| e.to_string())?;
    let result = play_loop(&mut session);
    let _ = terminal::disable_raw_mode();
    result
}

/// Seed fallback so unseeded rounds differ run to run.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

fn play_loop(session: &mut QuizSession) -> Result<(), String> {
    let mut renderer = Renderer::new(session.total_questions());
    renderer.render(session.drain_events())?;

    let mut ticker = Ticker::new(Duration::from_secs(1));
    while !session.is_finished() {
        let key_ready = event::poll(ticker.timeout(Instant::now())).map_err(|e| e.to_string())?;
        if key_ready {
            match event::read().map_err(|e| e.to_string())? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
                        renderer.say(&"Round abandoned.".dimmed().to_string())?;
                        return Ok(());
                    }
                    renderer.handle_key(session, key.code);
                }
                _ => {}
            }
        }
        // The clock runs on elapsed wall time, not on poll timeouts,
        // so a stream of key events cannot stall the countdown.
        for _ in 0..ticker.due_ticks(Instant::now()) {
            session.tick();
        }
        renderer.render(session.drain_events())?;
    }

    Ok(())
}

/// Wall-clock tick scheduler for the play loop.
///
/// Accumulates elapsed time across poll iterations and reports how
/// many whole intervals are due, so input activity never delays or
/// drops a tick.
struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: Instant::now() + interval,
        }
    }

    /// How long a poll may block before the next tick is due.
    fn timeout(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Whole intervals elapsed since the last call.
    fn due_ticks(&mut self, now: Instant) -> u32 {
        let mut due = 0;
        while now >= self.next_due {
            self.next_due += self.interval;
            due += 1;
        }
        due
    }
}

/// Renders engine events and maps keys to session operations.
struct Renderer {
    total: usize,
    options: Vec<String>,
    hidden: Vec<String>,
    status_open: bool,
}

impl Renderer {
    fn new(total: usize) -> Self {
        Self {
            total,
            options: Vec::new(),
            hidden: Vec::new(),
            status_open: false,
        }
    }

    fn handle_key(&mut self, session: &mut QuizSession, code: KeyCode) {
        match code {
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                if let Some(option) = self.options.get(index)
                    && !self.hidden.contains(option)
                {
                    let option = option.clone();
                    session.submit_answer(&option);
                }
            }
            KeyCode::Char('h') => session.use_fifty_fifty(),
            KeyCode::Char('b') => session.back(),
            KeyCode::Char('n') | KeyCode::Enter => session.advance(),
            _ => {}
        }
    }

    fn render(&mut self, events: Vec<QuizEvent>) -> Result<(), String> {
        for event in events {
            match event {
                QuizEvent::QuestionShown {
                    index,
                    question,
                    time_limit,
                } => {
                    self.options = question.options.clone();
                    self.hidden.clear();

                    self.say("")?;
                    let header = match &question.category {
                        Some(category) => format!(
                            "Question {}/{} [{category}]",
                            index + 1,
                            self.total
                        ),
                        None => format!("Question {}/{}", index + 1, self.total),
                    };
                    self.say(&header.bold().to_string())?;
                    self.say(&format!("  {}", question.prompt))?;
                    for (i, option) in question.options.iter().enumerate() {
                        self.say(&format!("    {}. {option}", i + 1))?;
                    }
                    self.say(&format!(
                        "  {time_limit}s on the clock — 1-{} answers, h = 50/50, b = back, q = quit",
                        question.options.len()
                    ))?;
                }
                QuizEvent::Tick { remaining } => self.status(remaining)?,
                QuizEvent::AnswerResolved {
                    correct,
                    correct_option,
                    selected,
                } => {
                    let line = if correct {
                        "  Correct!".green().bold().to_string()
                    } else if selected.is_some() {
                        format!("  Wrong — the answer was: {correct_option}")
                            .red()
                            .to_string()
                    } else {
                        format!("  Time's up — the answer was: {correct_option}")
                            .yellow()
                            .to_string()
                    };
                    self.say(&line)?;
                    self.say(&"  n = next".dimmed().to_string())?;
                }
                QuizEvent::ScoreChanged { score } => {
                    self.say(&format!("  Score: {score}"))?;
                }
                QuizEvent::LifelineApplied { hidden } => {
                    self.hidden = hidden.clone();
                    self.say(&format!("  50/50 removes: {}", hidden.join(", ")).dimmed().to_string())?;
                }
                QuizEvent::RoundFinished { summary } => {
                    self.say("")?;
                    self.say(&"=== Round finished ===".bold().to_string())?;
                    self.say(&format!(
                        "  Score: {}/{}  (answered {}, timed out {})",
                        summary.score, summary.total, summary.answered, summary.timed_out
                    ))?;
                    let cue = match summary.tier {
                        RankTier::Top => "Outstanding! Top marks.".green().bold().to_string(),
                        RankTier::Mid => "Nice work.".cyan().to_string(),
                        RankTier::Low => "Better luck next round.".yellow().to_string(),
                    };
                    self.say(&format!("  {cue}"))?;
                }
            }
        }
        Ok(())
    }

    /// Print one line, closing any open countdown status first.
    fn say(&mut self, line: &str) -> Result<(), String> {
        let mut out = stdout();
        if self.status_open {
            write!(out, "\r\n").map_err(|e| e.to_string())?;
            self.status_open = false;
        }
        write!(out, "{line}\r\n").map_err(|e| e.to_string())?;
        out.flush().map_err(|e| e.to_string())
    }

    /// Overwrite the countdown status line in place.
    fn status(&mut self, remaining: u32) -> Result<(), String> {
        let mut out = stdout();
        write!(out, "\r  {remaining:>3}s remaining   ").map_err(|e| e.to_string())?;
        out.flush().map_err(|e| e.to_string())?;
        self.status_open = true;
        Ok(())
    }
}
