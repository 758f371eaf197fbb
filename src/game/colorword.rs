//! Color match: Stroop-style color/word interference
//!
//! Each prompt shows a word naming a color, drawn in an ink that either
//! matches or deliberately mismatches. The mismatch probability grows
//! with level but the match probability never drops below a floor, so
//! "match" stays a live option at every level.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::game::{Difficulty, GameId};
use crate::session::scoring::ScoreConfig;
use crate::session::{ClockSpec, GameRules, GameSession, RoundLimit, SessionConfig};

/// Color vocabulary; prompts index into this.
pub const COLORS: [&str; 6] = ["Red", "Blue", "Green", "Yellow", "Purple", "Orange"];

/// Match probability never drops below this.
const MIN_MATCH_PROBABILITY: f64 = 0.25;

/// Highest generation level; anything above clamps here.
pub const MAX_LEVEL: u32 = 10;

/// Rounds per level step.
const ROUNDS_PER_LEVEL: u32 = 4;

/// One prompt: a color word and the ink it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPrompt {
    /// Index of the color the word names.
    pub word: usize,
    /// Index of the ink color it is drawn in.
    pub ink: usize,
}

impl ColorPrompt {
    pub fn is_match(&self) -> bool {
        self.word == self.ink
    }

    pub fn word_text(&self) -> &'static str {
        COLORS[self.word % COLORS.len()]
    }

    pub fn ink_text(&self) -> &'static str {
        COLORS[self.ink % COLORS.len()]
    }
}

/// Match probability at a level: decreasing, floored.
pub fn match_probability(level: u32) -> f64 {
    let level = level.clamp(1, MAX_LEVEL);
    (0.7 - 0.05 * (level - 1) as f64).max(MIN_MATCH_PROBABILITY)
}

/// Generate one prompt: pick the word, decide the match outcome, then
/// pick the ink accordingly (a mismatching ink is uniform over the
/// other colors).
pub fn generate_prompt(level: u32, rng: &mut StdRng) -> ColorPrompt {
    let word = rng.random_range(0..COLORS.len());
    let matches = rng.random_bool(match_probability(level));
    let ink = if matches {
        word
    } else {
        let other = rng.random_range(0..COLORS.len() - 1);
        if other >= word {
            other + 1
        } else {
            other
        }
    };
    ColorPrompt { word, ink }
}

/// The player's call: does the ink match the word?
#[derive(Debug, Clone, Copy)]
pub struct MatchCall {
    pub says_match: bool,
}

/// Color match rules with round-by-round level escalation and a
/// shrinking per-prompt deadline.
pub struct ColorMatchRules {
    start_level: u32,
    level: u32,
}

impl ColorMatchRules {
    pub fn new(difficulty: Difficulty) -> Self {
        let start_level = 1 + 2 * difficulty.index() as u32;
        ColorMatchRules {
            start_level,
            level: start_level,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

impl GameRules for ColorMatchRules {
    type Content = ColorPrompt;
    type Input = MatchCall;

    fn game_id(&self) -> GameId {
        GameId::ColorMatch
    }

    fn generate(&mut self, round: u32, rng: &mut StdRng) -> ColorPrompt {
        self.level = (self.start_level + round / ROUNDS_PER_LEVEL).min(MAX_LEVEL);
        generate_prompt(self.level, rng)
    }

    fn judge(&mut self, content: &ColorPrompt, input: &MatchCall, _response_ms: u64) -> bool {
        input.says_match == content.is_match()
    }

    fn round_deadline_ms(&self, _round: u32) -> Option<u64> {
        // Prompts get tighter as the level climbs.
        Some((3_000u64.saturating_sub(150 * self.level as u64)).max(1_200))
    }

    fn highest_level(&self) -> Option<u32> {
        Some(self.level)
    }
}

fn session_config(difficulty: Difficulty) -> SessionConfig {
    SessionConfig {
        clock: ClockSpec::SessionCountdown { total_ms: 45_000 },
        rounds: RoundLimit::Endless,
        lives: None,
        reveal_ms: 400,
        start_countdown_ms: 0,
        scoring: ScoreConfig {
            base: 8,
            difficulty_bonus: 4 * difficulty.index() as u32,
            time_bonus_per_sec: 2,
            time_bonus_cap: 4,
            streak_bonus_step: 2,
            streak_bonus_cap: 12,
            multiplier: None,
        },
    }
}

/// Build a ready-to-start color match session.
pub fn session(difficulty: Difficulty) -> GameSession<ColorMatchRules> {
    GameSession::new(ColorMatchRules::new(difficulty), session_config(difficulty))
}

/// Seeded variant of [`session`], for deterministic tests.
pub fn session_with_seed(difficulty: Difficulty, seed: u64) -> GameSession<ColorMatchRules> {
    GameSession::with_seed(
        ColorMatchRules::new(difficulty),
        session_config(difficulty),
        seed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_prompt_indices_in_vocabulary() {
        let mut rng = StdRng::seed_from_u64(61);
        for _ in 0..500 {
            let p = generate_prompt(5, &mut rng);
            assert!(p.word < COLORS.len());
            assert!(p.ink < COLORS.len());
        }
    }

    #[test]
    fn test_mismatch_ink_differs_from_word() {
        let mut rng = StdRng::seed_from_u64(62);
        for _ in 0..500 {
            let p = generate_prompt(MAX_LEVEL, &mut rng);
            if !p.is_match() {
                assert_ne!(p.word, p.ink);
            }
        }
    }

    #[test]
    fn test_match_probability_decreases_but_is_floored() {
        assert!(match_probability(1) > match_probability(5));
        for level in 1..=50 {
            assert!(match_probability(level) >= MIN_MATCH_PROBABILITY);
        }
        assert_eq!(match_probability(50), MIN_MATCH_PROBABILITY);
    }

    #[test]
    fn test_match_rate_tracks_configured_probability() {
        let mut rng = StdRng::seed_from_u64(63);
        let level = 1;
        let trials = 10_000;
        let matches = (0..trials)
            .filter(|_| generate_prompt(level, &mut rng).is_match())
            .count();
        let observed = matches as f64 / trials as f64;
        let expected = match_probability(level);
        assert!(
            (observed - expected).abs() < 0.02,
            "observed match rate {} too far from {}",
            observed,
            expected
        );
    }

    #[test]
    fn test_judge_rewards_correct_call_either_way() {
        let mut rules = ColorMatchRules::new(Difficulty::Easy);
        let matching = ColorPrompt { word: 2, ink: 2 };
        let clashing = ColorPrompt { word: 2, ink: 4 };
        assert!(rules.judge(&matching, &MatchCall { says_match: true }, 500));
        assert!(!rules.judge(&matching, &MatchCall { says_match: false }, 500));
        assert!(rules.judge(&clashing, &MatchCall { says_match: false }, 500));
        assert!(!rules.judge(&clashing, &MatchCall { says_match: true }, 500));
    }

    #[test]
    fn test_deadline_tightens_with_level_but_has_floor() {
        let mut rules = ColorMatchRules::new(Difficulty::Easy);
        let mut rng = StdRng::seed_from_u64(64);
        rules.generate(0, &mut rng);
        let early = rules.round_deadline_ms(0).unwrap();
        rules.generate(40, &mut rng);
        let late = rules.round_deadline_ms(40).unwrap();
        assert!(late < early);
        assert!(late >= 1_200);
    }
}
