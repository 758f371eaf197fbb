//! Math race: arithmetic drills against a global countdown
//!
//! Operand ranges and the operator set grow with the level, which
//! escalates round-by-round. Division problems are built answer-first
//! (pick divisor and quotient, multiply for the dividend) so quotients
//! are integral by construction rather than by filtering.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::game::{Difficulty, GameId};
use crate::session::scoring::ScoreConfig;
use crate::session::{ClockSpec, GameRules, GameSession, RoundLimit, SessionConfig};

/// Level at which multiplication problems appear.
const MUL_UNLOCK_LEVEL: u32 = 2;
/// Level at which division problems appear.
const DIV_UNLOCK_LEVEL: u32 = 3;
/// Highest generation level; anything above clamps here.
pub const MAX_LEVEL: u32 = 10;
/// Rounds per level step.
const ROUNDS_PER_LEVEL: u32 = 3;
/// Streak milestone that awards bonus clock time.
const TIME_AWARD_STREAK: u32 = 5;
/// Clock bonus per milestone.
const TIME_AWARD_MS: u64 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn symbol(&self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '×',
            Op::Div => '÷',
        }
    }
}

/// One generated arithmetic problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathProblem {
    pub a: i64,
    pub b: i64,
    pub op: Op,
    pub answer: i64,
}

impl MathProblem {
    /// Display form, e.g. `"7 × 8"`.
    pub fn prompt(&self) -> String {
        format!("{} {} {}", self.a, self.op.symbol(), self.b)
    }
}

/// Generate one problem for a level. Out-of-range levels clamp rather
/// than fail; generation always succeeds.
pub fn generate_problem(level: u32, rng: &mut StdRng) -> MathProblem {
    let level = level.clamp(1, MAX_LEVEL);
    let mut ops = vec![Op::Add, Op::Sub];
    if level >= MUL_UNLOCK_LEVEL {
        ops.push(Op::Mul);
    }
    if level >= DIV_UNLOCK_LEVEL {
        ops.push(Op::Div);
    }
    let op = *ops.choose(rng).unwrap_or(&Op::Add);

    let max_operand = 10 * level as i64;
    match op {
        Op::Add => {
            let a = rng.random_range(1..=max_operand);
            let b = rng.random_range(1..=max_operand);
            MathProblem {
                a,
                b,
                op,
                answer: a + b,
            }
        }
        Op::Sub => {
            // Keep results non-negative: larger operand first.
            let x = rng.random_range(1..=max_operand);
            let y = rng.random_range(1..=max_operand);
            let (a, b) = (x.max(y), x.min(y));
            MathProblem {
                a,
                b,
                op,
                answer: a - b,
            }
        }
        Op::Mul => {
            let cap = (2 + level) as i64;
            let a = rng.random_range(2..=cap);
            let b = rng.random_range(2..=cap);
            MathProblem {
                a,
                b,
                op,
                answer: a * b,
            }
        }
        Op::Div => {
            // Answer-first: divisor and quotient drawn, dividend
            // derived, so the quotient is integral by construction.
            let divisor = rng.random_range(2..=(2 + level) as i64);
            let quotient = rng.random_range(1..=(3 * level) as i64);
            MathProblem {
                a: divisor * quotient,
                b: divisor,
                op,
                answer: quotient,
            }
        }
    }
}

/// The player's typed answer.
#[derive(Debug, Clone, Copy)]
pub struct NumberInput {
    pub value: i64,
}

/// Math race rules: level escalates with the round index, streak
/// milestones extend the clock.
pub struct MathRaceRules {
    start_level: u32,
    level: u32,
}

impl MathRaceRules {
    pub fn new(difficulty: Difficulty) -> Self {
        let start_level = match difficulty {
            Difficulty::Easy => 1,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
        };
        MathRaceRules {
            start_level,
            level: start_level,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

impl GameRules for MathRaceRules {
    type Content = MathProblem;
    type Input = NumberInput;

    fn game_id(&self) -> GameId {
        GameId::MathRace
    }

    fn generate(&mut self, round: u32, rng: &mut StdRng) -> MathProblem {
        self.level = (self.start_level + round / ROUNDS_PER_LEVEL).min(MAX_LEVEL);
        generate_problem(self.level, rng)
    }

    fn judge(&mut self, content: &MathProblem, input: &NumberInput, _response_ms: u64) -> bool {
        input.value == content.answer
    }

    fn time_award_ms(&self, streak: u32) -> u64 {
        if streak > 0 && streak % TIME_AWARD_STREAK == 0 {
            TIME_AWARD_MS
        } else {
            0
        }
    }

    fn highest_level(&self) -> Option<u32> {
        Some(self.level)
    }
}

fn session_config(difficulty: Difficulty) -> SessionConfig {
    SessionConfig {
        clock: ClockSpec::SessionCountdown { total_ms: 60_000 },
        rounds: RoundLimit::Endless,
        lives: None,
        reveal_ms: 500,
        start_countdown_ms: 0,
        scoring: ScoreConfig {
            base: 10,
            difficulty_bonus: 5 * difficulty.index() as u32,
            time_bonus_per_sec: 0,
            time_bonus_cap: 0,
            streak_bonus_step: 2,
            streak_bonus_cap: 10,
            multiplier: None,
        },
    }
}

/// Build a ready-to-start math race session.
pub fn session(difficulty: Difficulty) -> GameSession<MathRaceRules> {
    GameSession::new(MathRaceRules::new(difficulty), session_config(difficulty))
}

/// Seeded variant of [`session`], for deterministic tests.
pub fn session_with_seed(difficulty: Difficulty, seed: u64) -> GameSession<MathRaceRules> {
    GameSession::with_seed(
        MathRaceRules::new(difficulty),
        session_config(difficulty),
        seed,
    )
}
