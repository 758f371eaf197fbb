//! Bot opponent simulator for the adversarial trivia games
//!
//! The bot is a reactive but fallible player: per round it draws one
//! `(answer, latency)` pair from its tier's fixed accuracy and latency
//! distributions, with no memory across rounds and no adaptation to the
//! player. Decisions scheduled for later application carry the round's
//! ticket and no-op once the round has moved on.

use rand::rngs::StdRng;
use rand::Rng;

use crate::game::trivia::DealtQuestion;
use crate::game::Difficulty;
use crate::session::{GameRules, GameSession, RoundTicket};

/// Fixed accuracy and latency bounds for one difficulty tier.
#[derive(Debug, Clone, Copy)]
pub struct BotProfile {
    /// Probability the bot answers correctly.
    pub accuracy: f64,
    /// Response latency bounds in milliseconds, inclusive.
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
}

/// Tier table: lenient / moderate / strict, in whole seconds scaled to
/// milliseconds.
const TIERS: [BotProfile; 3] = [
    BotProfile {
        accuracy: 0.5,
        latency_min_ms: 3_000,
        latency_max_ms: 8_000,
    },
    BotProfile {
        accuracy: 0.7,
        latency_min_ms: 2_000,
        latency_max_ms: 6_000,
    },
    BotProfile {
        accuracy: 0.85,
        latency_min_ms: 1_000,
        latency_max_ms: 4_000,
    },
];

impl BotProfile {
    /// Look up the tier for a difficulty.
    pub fn for_difficulty(difficulty: Difficulty) -> BotProfile {
        TIERS[difficulty.index()]
    }
}

/// One round's simulated answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotDecision {
    /// Index of the option the bot picks.
    pub answer_index: usize,
    /// Simulated time before the bot commits to it.
    pub latency_ms: u64,
    /// Whether the drawn answer is the correct one.
    pub correct: bool,
}

/// Draw one decision for a question.
///
/// A correct draw returns the question's correct index; an incorrect
/// draw picks uniformly among the remaining wrong options. Latency is
/// uniform within the tier's bounds.
pub fn decide(question: &DealtQuestion, profile: BotProfile, rng: &mut StdRng) -> BotDecision {
    let correct = rng.random_bool(profile.accuracy.clamp(0.0, 1.0));
    let option_count = question.options.len().max(2);
    let answer_index = if correct {
        question.correct
    } else {
        // Uniform over the wrong options: skip past the correct index.
        let wrong = rng.random_range(0..option_count - 1);
        if wrong >= question.correct {
            wrong + 1
        } else {
            wrong
        }
    };
    let latency_ms = rng.random_range(profile.latency_min_ms..=profile.latency_max_ms);
    BotDecision {
        answer_index,
        latency_ms,
        correct,
    }
}

/// A decision scheduled for later application, bound to one round.
///
/// Embeddings that deliver the bot's answer after its simulated latency
/// (rather than at round start) hold one of these; resolving against a
/// session whose round has already ended yields nothing and has no side
/// effects.
#[derive(Debug, Clone, Copy)]
pub struct PendingDecision {
    pub ticket: RoundTicket,
    decision: BotDecision,
}

impl PendingDecision {
    pub fn new(ticket: RoundTicket, decision: BotDecision) -> Self {
        PendingDecision { ticket, decision }
    }

    /// Take the decision if its round is still live; otherwise drop it.
    pub fn resolve<R: GameRules>(self, session: &GameSession<R>) -> Option<BotDecision> {
        if session.is_current(self.ticket) {
            Some(self.decision)
        } else {
            tracing::debug!("bot decision arrived after its round ended; dropped");
            None
        }
    }
}
