//! Scoring engine: per-round point deltas, streaks, multipliers, and
//! one-shot terminal bonuses
//!
//! The normative shape shared by every mini-game:
//!
//! ```text
//! delta = base + difficulty_bonus
//!       + time_bonus(remaining)      // non-increasing in elapsed time
//!       + streak_bonus(streak)       // capped
//! ```
//!
//! scaled by the session multiplier where the variant has one and
//! rounded down. Incorrect or timed-out rounds score exactly zero and
//! reset the streak and multiplier. Scores never go negative.

use super::RoundOutcome;

/// Session-level multiplier escalation (exclusive arena, memory tiers).
///
/// `value(streak) = min(cap, 1 + floor(streak / step) * increment)`,
/// resetting to 1 on any miss (streak 0 yields 1).
#[derive(Debug, Clone, Copy)]
pub struct MultiplierConfig {
    /// Streak milestone size (e.g. every 3 correct).
    pub step: u32,
    /// Multiplier increase per milestone.
    pub increment: f64,
    /// Hard cap (e.g. 1.5 or 3.0).
    pub cap: f64,
}

impl MultiplierConfig {
    /// Multiplier in effect at a given streak length.
    pub fn value(&self, streak: u32) -> f64 {
        let step = self.step.max(1);
        let raw = 1.0 + (streak / step) as f64 * self.increment;
        raw.min(self.cap)
    }
}

/// Per-variant scoring parameters.
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Base points for any correct round.
    pub base: u32,
    /// Flat bonus for the session's difficulty tier.
    pub difficulty_bonus: u32,
    /// Time bonus per whole second left on the authoritative clock.
    pub time_bonus_per_sec: u32,
    /// Cap on the time bonus.
    pub time_bonus_cap: u32,
    /// Streak bonus per prior consecutive correct round.
    pub streak_bonus_step: u32,
    /// Cap on the streak bonus.
    pub streak_bonus_cap: u32,
    /// Session multiplier, where the variant has one.
    pub multiplier: Option<MultiplierConfig>,
}

impl ScoreConfig {
    /// A flat config with no time, streak, or multiplier components.
    pub fn flat(base: u32) -> Self {
        ScoreConfig {
            base,
            difficulty_bonus: 0,
            time_bonus_per_sec: 0,
            time_bonus_cap: 0,
            streak_bonus_step: 0,
            streak_bonus_cap: 0,
            multiplier: None,
        }
    }
}

/// Running score state for one session.
///
/// Mutated only through [`ScoreTracker::record`] and
/// [`ScoreTracker::apply_terminal`]; the final score is the sum of all
/// per-round deltas plus terminal bonuses, applied at most once.
#[derive(Debug, Clone)]
pub struct ScoreTracker {
    config: ScoreConfig,
    /// Accumulated points, non-negative by construction.
    pub score: u32,
    /// Consecutive correct-in-time rounds.
    pub streak: u32,
    /// Best streak seen this session.
    pub best_streak: u32,
    /// Correct-in-time rounds.
    pub correct: u32,
    /// Incorrect (answered wrong) rounds.
    pub incorrect: u32,
    /// Timed-out rounds.
    pub timeouts: u32,
    /// Sum of response times over resolved rounds.
    pub total_response_ms: u64,
    terminal_applied: bool,
}

impl ScoreTracker {
    pub fn new(config: ScoreConfig) -> Self {
        ScoreTracker {
            config,
            score: 0,
            streak: 0,
            best_streak: 0,
            correct: 0,
            incorrect: 0,
            timeouts: 0,
            total_response_ms: 0,
            terminal_applied: false,
        }
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Record a resolved round and return the point delta awarded.
    ///
    /// `remaining_ms` is the time left on the round's authoritative
    /// clock when it resolved; misses and timeouts award zero and reset
    /// the streak.
    pub fn record(&mut self, outcome: RoundOutcome, remaining_ms: u64, response_ms: u64) -> u32 {
        self.total_response_ms += response_ms;
        match outcome {
            RoundOutcome::CorrectInTime => {
                let prior_streak = self.streak;
                self.streak += 1;
                self.best_streak = self.best_streak.max(self.streak);
                self.correct += 1;

                let time_bonus = (self.config.time_bonus_per_sec * (remaining_ms / 1000) as u32)
                    .min(self.config.time_bonus_cap);
                let streak_bonus = (self.config.streak_bonus_step * prior_streak)
                    .min(self.config.streak_bonus_cap);
                let raw = self.config.base + self.config.difficulty_bonus + time_bonus + streak_bonus;

                let delta = match &self.config.multiplier {
                    Some(m) => (raw as f64 * m.value(self.streak)).floor() as u32,
                    None => raw,
                };
                self.score += delta;
                delta
            }
            RoundOutcome::IncorrectInTime | RoundOutcome::TimedOut => {
                self.streak = 0;
                match outcome {
                    RoundOutcome::TimedOut => self.timeouts += 1,
                    _ => self.incorrect += 1,
                }
                0
            }
            RoundOutcome::Pending => 0,
        }
    }

    /// Current multiplier value (1.0 where the variant has none).
    pub fn multiplier(&self) -> f64 {
        match &self.config.multiplier {
            Some(m) => m.value(self.streak),
            None => 1.0,
        }
    }

    /// Add the one-shot terminal bonus (perfect run, speed, win-vs-bot).
    /// Returns false without touching the score if one was already
    /// applied, so re-entering the terminal state cannot double-count.
    pub fn apply_terminal(&mut self, bonus: u32) -> bool {
        if self.terminal_applied {
            return false;
        }
        self.terminal_applied = true;
        self.score += bonus;
        true
    }

    /// Total rounds resolved so far.
    pub fn rounds_played(&self) -> u32 {
        self.correct + self.incorrect + self.timeouts
    }

    /// Mean response time over resolved rounds.
    pub fn average_response_ms(&self) -> u64 {
        let rounds = self.rounds_played() as u64;
        if rounds == 0 {
            0
        } else {
            self.total_response_ms / rounds
        }
    }

    /// A perfect run: at least one round, no misses, no timeouts.
    pub fn is_perfect(&self) -> bool {
        self.correct > 0 && self.incorrect == 0 && self.timeouts == 0
    }
}
