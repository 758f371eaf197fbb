//! Memory match: find all symbol pairs on a shuffled board
//!
//! The board holds N symbols duplicated into 2N cards, laid out with an
//! unbiased shuffle (rand's `shuffle` is Fisher-Yates). One round is
//! one two-card flip; the session runs until every pair is matched.

use std::collections::HashSet;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::game::{Difficulty, GameId};
use crate::session::scoring::{MultiplierConfig, ScoreConfig, ScoreTracker};
use crate::session::{ClockSpec, GameRules, GameSession, RoundLimit, SessionConfig};

/// Symbol alphabet; boards index into this.
pub const SYMBOLS: [char; 12] = ['★', '♥', '♦', '♣', '♠', '☀', '☾', '♪', '⚡', '❄', '✿', '⚓'];

/// Pairs on the board for a tier.
pub fn pairs_for(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 6,
        Difficulty::Medium => 8,
        Difficulty::Hard => 12,
    }
}

/// Generate a flat board layout: each of `pairs` symbols appears exactly
/// twice, positions uniformly shuffled. `pairs` clamps to the symbol
/// alphabet.
pub fn generate_layout(pairs: usize, rng: &mut StdRng) -> Vec<u8> {
    let pairs = pairs.clamp(2, SYMBOLS.len());
    let mut layout: Vec<u8> = (0..pairs as u8).flat_map(|s| [s, s]).collect();
    layout.shuffle(rng);
    layout
}

/// A two-card flip.
#[derive(Debug, Clone, Copy)]
pub struct FlipPair {
    pub first: usize,
    pub second: usize,
}

/// Memory rules: the board is generated once and every round re-presents
/// it; matched positions accumulate until the board clears.
pub struct MemoryRules {
    difficulty: Difficulty,
    layout: Vec<u8>,
    matched: HashSet<usize>,
}

impl MemoryRules {
    pub fn new(difficulty: Difficulty) -> Self {
        MemoryRules {
            difficulty,
            layout: Vec::new(),
            matched: HashSet::new(),
        }
    }

    /// Symbol at a board position, if the board exists and the position
    /// is valid.
    pub fn symbol_at(&self, position: usize) -> Option<char> {
        self.layout
            .get(position)
            .map(|&s| SYMBOLS[s as usize % SYMBOLS.len()])
    }

    /// Positions already matched.
    pub fn matched(&self) -> &HashSet<usize> {
        &self.matched
    }

    pub fn pairs_found(&self) -> usize {
        self.matched.len() / 2
    }
}

impl GameRules for MemoryRules {
    type Content = Vec<u8>;
    type Input = FlipPair;

    fn game_id(&self) -> GameId {
        GameId::Memory
    }

    fn generate(&mut self, round: u32, rng: &mut StdRng) -> Vec<u8> {
        if round == 0 {
            self.layout = generate_layout(pairs_for(self.difficulty), rng);
            self.matched.clear();
        }
        self.layout.clone()
    }

    fn judge(&mut self, _content: &Vec<u8>, input: &FlipPair, _response_ms: u64) -> bool {
        let (a, b) = (input.first, input.second);
        if a == b || a >= self.layout.len() || b >= self.layout.len() {
            return false;
        }
        if self.matched.contains(&a) || self.matched.contains(&b) {
            return false;
        }
        if self.layout[a] == self.layout[b] {
            self.matched.insert(a);
            self.matched.insert(b);
            true
        } else {
            false
        }
    }

    fn is_complete(&self, _tracker: &ScoreTracker) -> bool {
        !self.layout.is_empty() && self.matched.len() == self.layout.len()
    }

    fn terminal_bonus(&self, tracker: &ScoreTracker, _clock_remaining_ms: u64) -> u32 {
        // Perfect run: every flip was a match.
        if self.is_complete(tracker) && tracker.is_perfect() {
            50
        } else {
            0
        }
    }
}

fn session_config(difficulty: Difficulty) -> SessionConfig {
    let multiplier = match difficulty {
        Difficulty::Easy => None,
        Difficulty::Medium => Some(MultiplierConfig {
            step: 2,
            increment: 0.25,
            cap: 1.5,
        }),
        Difficulty::Hard => Some(MultiplierConfig {
            step: 2,
            increment: 0.5,
            cap: 3.0,
        }),
    };
    SessionConfig {
        clock: ClockSpec::Elapsed,
        rounds: RoundLimit::Endless,
        lives: None,
        reveal_ms: 800,
        start_countdown_ms: 0,
        scoring: ScoreConfig {
            base: 15,
            difficulty_bonus: 5 * difficulty.index() as u32,
            time_bonus_per_sec: 0,
            time_bonus_cap: 0,
            streak_bonus_step: 0,
            streak_bonus_cap: 0,
            multiplier,
        },
    }
}

/// Build a ready-to-start memory session.
pub fn session(difficulty: Difficulty) -> GameSession<MemoryRules> {
    GameSession::new(MemoryRules::new(difficulty), session_config(difficulty))
}

/// Seeded variant of [`session`], for deterministic tests.
pub fn session_with_seed(difficulty: Difficulty, seed: u64) -> GameSession<MemoryRules> {
    GameSession::with_seed(
        MemoryRules::new(difficulty),
        session_config(difficulty),
        seed,
    )
}
