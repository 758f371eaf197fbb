//! Reaction time: wait for the signal, then press
//!
//! Each round draws a random signal delay plus a response window.
//! Pressing before the signal is a miss (a false start), pressing
//! inside the window scores with a speed-weighted bonus, and letting
//! the window lapse is a timeout.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::game::{Difficulty, GameId};
use crate::session::scoring::ScoreConfig;
use crate::session::{ClockSpec, GameRules, GameSession, RoundLimit, SessionConfig};

/// Signal delay bounds, uniform per round.
const DELAY_MIN_MS: u64 = 1_000;
const DELAY_MAX_MS: u64 = 4_000;

/// Rounds per session.
const ROUNDS: u32 = 5;

/// Response window after the signal, per tier.
pub fn window_ms_for(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => 800,
        Difficulty::Medium => 550,
        Difficulty::Hard => 350,
    }
}

/// One round's timing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionSignal {
    /// Time from round start until the signal fires.
    pub delay_ms: u64,
    /// Window after the signal within which a press counts.
    pub window_ms: u64,
}

/// The player's press. Timing comes from the round clock, so the input
/// itself carries nothing.
#[derive(Debug, Clone, Copy)]
pub struct Press;

pub struct ReactionRules {
    difficulty: Difficulty,
}

impl ReactionRules {
    pub fn new(difficulty: Difficulty) -> Self {
        ReactionRules { difficulty }
    }
}

impl GameRules for ReactionRules {
    type Content = ReactionSignal;
    type Input = Press;

    fn game_id(&self) -> GameId {
        GameId::Reaction
    }

    fn generate(&mut self, _round: u32, rng: &mut StdRng) -> ReactionSignal {
        ReactionSignal {
            delay_ms: rng.random_range(DELAY_MIN_MS..=DELAY_MAX_MS),
            window_ms: window_ms_for(self.difficulty),
        }
    }

    fn judge(&mut self, content: &ReactionSignal, _input: &Press, response_ms: u64) -> bool {
        // A press before the signal is a false start.
        response_ms >= content.delay_ms
            && response_ms <= content.delay_ms + content.window_ms
    }

    fn round_deadline_ms(&self, _round: u32) -> Option<u64> {
        // The deadline is delay + window, but the delay varies per
        // round; judge() enforces the true window while this caps the
        // wait at the worst case.
        Some(DELAY_MAX_MS + window_ms_for(self.difficulty))
    }
}

fn session_config(difficulty: Difficulty) -> SessionConfig {
    SessionConfig {
        clock: ClockSpec::PerRound,
        rounds: RoundLimit::Fixed(ROUNDS),
        lives: None,
        reveal_ms: 900,
        start_countdown_ms: 0,
        scoring: ScoreConfig {
            base: 10,
            difficulty_bonus: 5 * difficulty.index() as u32,
            // The faster the press, the more of the round budget is
            // left, so the time bonus rewards quick reactions.
            time_bonus_per_sec: 5,
            time_bonus_cap: 20,
            streak_bonus_step: 2,
            streak_bonus_cap: 8,
            multiplier: None,
        },
    }
}

/// Build a ready-to-start reaction session.
pub fn session(difficulty: Difficulty) -> GameSession<ReactionRules> {
    GameSession::new(ReactionRules::new(difficulty), session_config(difficulty))
}

/// Seeded variant of [`session`], for deterministic tests.
pub fn session_with_seed(difficulty: Difficulty, seed: u64) -> GameSession<ReactionRules> {
    GameSession::with_seed(
        ReactionRules::new(difficulty),
        session_config(difficulty),
        seed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Phase;
    use rand::SeedableRng;

    #[test]
    fn test_delay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(81);
        let mut rules = ReactionRules::new(Difficulty::Easy);
        for round in 0..200 {
            let signal = rules.generate(round, &mut rng);
            assert!(signal.delay_ms >= DELAY_MIN_MS);
            assert!(signal.delay_ms <= DELAY_MAX_MS);
        }
    }

    #[test]
    fn test_press_inside_window_scores() {
        let mut s = session_with_seed(Difficulty::Easy, 82);
        s.start();
        let signal = *s.current_content().unwrap();
        s.advance(signal.delay_ms + 100);
        let ticket = s.current_ticket().unwrap();
        s.submit(ticket, &Press);
        assert!(s.score() > 0);
        assert_eq!(s.streak(), 1);
    }

    #[test]
    fn test_false_start_is_a_miss() {
        let mut s = session_with_seed(Difficulty::Easy, 83);
        s.start();
        let signal = *s.current_content().unwrap();
        s.advance(signal.delay_ms.saturating_sub(200));
        let ticket = s.current_ticket().unwrap();
        s.submit(ticket, &Press);
        assert_eq!(s.score(), 0);
        assert_eq!(s.streak(), 0);
    }

    #[test]
    fn test_press_after_window_is_a_miss() {
        let mut s = session_with_seed(Difficulty::Hard, 84);
        s.start();
        let signal = *s.current_content().unwrap();
        s.advance(signal.delay_ms + signal.window_ms + 1);
        // Round may have hit its cap deadline already; if not, a late
        // press still fails the window check.
        if s.phase() == Phase::InRound {
            let ticket = s.current_ticket().unwrap();
            s.submit(ticket, &Press);
        }
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_session_is_five_rounds() {
        let mut s = session_with_seed(Difficulty::Medium, 85);
        s.start();
        for _ in 0..ROUNDS {
            let signal = *s.current_content().unwrap();
            s.advance(signal.delay_ms + 50);
            let ticket = s.current_ticket().unwrap();
            s.submit(ticket, &Press);
            s.advance(900);
        }
        assert_eq!(s.phase(), Phase::Finished);
        let result = s.take_result().unwrap();
        assert_eq!(result.rounds_played, ROUNDS);
        assert_eq!(result.correct, ROUNDS);
    }

    #[test]
    fn test_faster_press_earns_at_least_as_much() {
        let mut fast = session_with_seed(Difficulty::Easy, 86);
        let mut slow = session_with_seed(Difficulty::Easy, 86);
        fast.start();
        slow.start();
        let signal = *fast.current_content().unwrap();
        fast.advance(signal.delay_ms + 10);
        slow.advance(signal.delay_ms + 700);
        let t = fast.current_ticket().unwrap();
        fast.submit(t, &Press);
        let t = slow.current_ticket().unwrap();
        slow.submit(t, &Press);
        assert!(fast.score() >= slow.score());
    }
}
