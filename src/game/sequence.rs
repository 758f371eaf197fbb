//! Sequence recall: repeat a growing symbol sequence
//!
//! Each accepted round appends exactly one symbol from a four-symbol
//! alphabet. Level N means sequence length N+2, so level 1 starts at
//! length 3. A single wrong recall ends the session; the result records
//! the level reached, not the one attempted.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::game::{Difficulty, GameId};
use crate::session::scoring::ScoreConfig;
use crate::session::{ClockSpec, GameRules, GameSession, RoundLimit, RoundOutcome, SessionConfig};

/// Size of the symbol alphabet (e.g. four colored pads).
pub const ALPHABET_SIZE: u8 = 4;

/// Sequence length at level 1.
const STARTING_LENGTH: usize = 3;

/// The player's full recall attempt for a round.
#[derive(Debug, Clone)]
pub struct RecallInput {
    pub symbols: Vec<u8>,
}

/// Sequence recall rules. The sequence persists across rounds and only
/// ever grows by one accepted symbol.
pub struct SequenceRules {
    difficulty: Difficulty,
    sequence: Vec<u8>,
    completed_level: u32,
}

impl SequenceRules {
    pub fn new(difficulty: Difficulty) -> Self {
        SequenceRules {
            difficulty,
            sequence: Vec::new(),
            completed_level: 0,
        }
    }

    /// The sequence as of the current round.
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    /// Highest level fully recalled so far.
    pub fn completed_level(&self) -> u32 {
        self.completed_level
    }

    /// Recall time budget per symbol, shrinking with difficulty.
    fn per_symbol_ms(&self) -> u64 {
        match self.difficulty {
            Difficulty::Easy => 2_000,
            Difficulty::Medium => 1_500,
            Difficulty::Hard => 1_000,
        }
    }
}

impl GameRules for SequenceRules {
    type Content = Vec<u8>;
    type Input = RecallInput;

    fn game_id(&self) -> GameId {
        GameId::Sequence
    }

    fn generate(&mut self, round: u32, rng: &mut StdRng) -> Vec<u8> {
        // Round 0 seeds the starting length; every later round appends
        // exactly one symbol.
        let target = STARTING_LENGTH + round as usize;
        while self.sequence.len() < target {
            self.sequence.push(rng.random_range(0..ALPHABET_SIZE));
        }
        self.sequence.clone()
    }

    fn judge(&mut self, content: &Vec<u8>, input: &RecallInput, _response_ms: u64) -> bool {
        input.symbols == *content
    }

    fn round_deadline_ms(&self, round: u32) -> Option<u64> {
        let length = (STARTING_LENGTH + round as usize) as u64;
        Some(length * self.per_symbol_ms())
    }

    fn on_resolved(&mut self, _content: &Vec<u8>, outcome: RoundOutcome, _response_ms: u64) {
        if outcome == RoundOutcome::CorrectInTime {
            // Level N corresponds to length N+2.
            self.completed_level = (self.sequence.len() - STARTING_LENGTH) as u32 + 1;
        }
    }

    fn highest_level(&self) -> Option<u32> {
        Some(self.completed_level)
    }
}

fn session_config(difficulty: Difficulty) -> SessionConfig {
    SessionConfig {
        clock: ClockSpec::PerRound,
        rounds: RoundLimit::Endless,
        // One mistake ends the run.
        lives: Some(1),
        reveal_ms: 700,
        start_countdown_ms: 0,
        scoring: ScoreConfig {
            base: 10,
            difficulty_bonus: 5 * difficulty.index() as u32,
            time_bonus_per_sec: 0,
            time_bonus_cap: 0,
            streak_bonus_step: 5,
            streak_bonus_cap: 50,
            multiplier: None,
        },
    }
}

/// Build a ready-to-start sequence recall session.
pub fn session(difficulty: Difficulty) -> GameSession<SequenceRules> {
    GameSession::new(SequenceRules::new(difficulty), session_config(difficulty))
}

/// Seeded variant of [`session`], for deterministic tests.
pub fn session_with_seed(difficulty: Difficulty, seed: u64) -> GameSession<SequenceRules> {
    GameSession::with_seed(
        SequenceRules::new(difficulty),
        session_config(difficulty),
        seed,
    )
}
