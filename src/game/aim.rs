//! Aim trainer: click targets before they expire
//!
//! Targets spawn at uniform positions inside the play area inset by
//! their own radius, with a lifetime from the active tier. The session
//! runs against a global 30-second countdown.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::game::{Difficulty, GameId};
use crate::session::scoring::ScoreConfig;
use crate::session::{ClockSpec, GameRules, GameSession, RoundLimit, SessionConfig};

/// Logical play-area bounds the embedding scales to its canvas.
pub const PLAY_WIDTH: f32 = 800.0;
pub const PLAY_HEIGHT: f32 = 600.0;

/// Target radius per tier.
pub fn radius_for(difficulty: Difficulty) -> f32 {
    match difficulty {
        Difficulty::Easy => 40.0,
        Difficulty::Medium => 28.0,
        Difficulty::Hard => 18.0,
    }
}

/// Target lifetime per tier.
pub fn lifetime_ms_for(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => 1_500,
        Difficulty::Medium => 1_100,
        Difficulty::Hard => 800,
    }
}

/// One spawned target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub lifetime_ms: u64,
}

impl Target {
    /// Whether a click lands inside the target.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.x;
        let dy = y - self.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Generate one target fully inside the play area.
pub fn generate_target(difficulty: Difficulty, rng: &mut StdRng) -> Target {
    let radius = radius_for(difficulty);
    Target {
        x: rng.random_range(radius..=PLAY_WIDTH - radius),
        y: rng.random_range(radius..=PLAY_HEIGHT - radius),
        radius,
        lifetime_ms: lifetime_ms_for(difficulty),
    }
}

/// A click at play-area coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Click {
    pub x: f32,
    pub y: f32,
}

pub struct AimRules {
    difficulty: Difficulty,
}

impl AimRules {
    pub fn new(difficulty: Difficulty) -> Self {
        AimRules { difficulty }
    }
}

impl GameRules for AimRules {
    type Content = Target;
    type Input = Click;

    fn game_id(&self) -> GameId {
        GameId::AimTrainer
    }

    fn generate(&mut self, _round: u32, rng: &mut StdRng) -> Target {
        generate_target(self.difficulty, rng)
    }

    fn judge(&mut self, content: &Target, input: &Click, _response_ms: u64) -> bool {
        content.contains(input.x, input.y)
    }

    fn round_deadline_ms(&self, _round: u32) -> Option<u64> {
        Some(lifetime_ms_for(self.difficulty))
    }
}

fn session_config(difficulty: Difficulty) -> SessionConfig {
    SessionConfig {
        clock: ClockSpec::SessionCountdown { total_ms: 30_000 },
        rounds: RoundLimit::Endless,
        lives: None,
        reveal_ms: 150,
        start_countdown_ms: 0,
        scoring: ScoreConfig {
            base: 5,
            difficulty_bonus: 5 * difficulty.index() as u32,
            time_bonus_per_sec: 0,
            time_bonus_cap: 0,
            streak_bonus_step: 1,
            streak_bonus_cap: 10,
            multiplier: None,
        },
    }
}

/// Build a ready-to-start aim trainer session.
pub fn session(difficulty: Difficulty) -> GameSession<AimRules> {
    GameSession::new(AimRules::new(difficulty), session_config(difficulty))
}

/// Seeded variant of [`session`], for deterministic tests.
pub fn session_with_seed(difficulty: Difficulty, seed: u64) -> GameSession<AimRules> {
    GameSession::with_seed(AimRules::new(difficulty), session_config(difficulty), seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_targets_fit_inside_play_area() {
        let mut rng = StdRng::seed_from_u64(71);
        for difficulty in Difficulty::all() {
            for _ in 0..500 {
                let t = generate_target(*difficulty, &mut rng);
                assert!(t.x - t.radius >= 0.0);
                assert!(t.x + t.radius <= PLAY_WIDTH);
                assert!(t.y - t.radius >= 0.0);
                assert!(t.y + t.radius <= PLAY_HEIGHT);
            }
        }
    }

    #[test]
    fn test_harder_tiers_spawn_smaller_shorter_targets() {
        assert!(radius_for(Difficulty::Hard) < radius_for(Difficulty::Easy));
        assert!(lifetime_ms_for(Difficulty::Hard) < lifetime_ms_for(Difficulty::Easy));
    }

    #[test]
    fn test_click_inside_target_scores() {
        let mut s = session_with_seed(Difficulty::Easy, 72);
        s.start();
        let target = *s.current_content().unwrap();
        let ticket = s.current_ticket().unwrap();
        s.submit(ticket, &Click {
            x: target.x,
            y: target.y,
        });
        assert!(s.score() > 0);
    }

    #[test]
    fn test_click_outside_target_misses() {
        let mut s = session_with_seed(Difficulty::Hard, 73);
        s.start();
        let target = *s.current_content().unwrap();
        let ticket = s.current_ticket().unwrap();
        // A point just past the rim on the x axis.
        s.submit(ticket, &Click {
            x: target.x + target.radius + 1.0,
            y: target.y,
        });
        assert_eq!(s.score(), 0);
        assert_eq!(s.streak(), 0);
    }

    #[test]
    fn test_target_expires_as_timeout() {
        let mut s = session_with_seed(Difficulty::Medium, 74);
        s.start();
        s.advance(lifetime_ms_for(Difficulty::Medium));
        assert_eq!(s.tracker().timeouts, 1);
    }

    #[test]
    fn test_contains_is_inclusive_at_rim() {
        let t = Target {
            x: 100.0,
            y: 100.0,
            radius: 10.0,
            lifetime_ms: 1_000,
        };
        assert!(t.contains(110.0, 100.0));
        assert!(!t.contains(110.1, 100.0));
    }
}
