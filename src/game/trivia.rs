//! Trivia games: question pool plus the five quiz variants
//!
//! Speed quiz, rush, battle, ultimate, and exclusive arena all share
//! one rules type parameterized by [`TriviaVariant`]; the per-variant
//! differences are pacing, lives, bots, and scoring, not the loop.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::bot::{self, BotDecision, BotProfile};
use crate::game::{Difficulty, GameId};
use crate::session::scoring::{MultiplierConfig, ScoreConfig, ScoreTracker};
use crate::session::{
    ClockSpec, GameRules, GameSession, Phase, RoundLimit, RoundOutcome, SessionConfig,
};

/// Flat win bonus when the player takes more rounds than the bot.
pub const BATTLE_WIN_BONUS: u32 = 100;

/// A question as stored in a pool: exactly one correct index among four
/// options (data contract, not validated at runtime).
#[derive(Debug, Clone)]
pub struct TriviaQuestion {
    pub prompt: String,
    pub options: [String; 4],
    pub correct: usize,
}

impl TriviaQuestion {
    pub fn new(prompt: &str, options: [&str; 4], correct: usize) -> Self {
        TriviaQuestion {
            prompt: prompt.to_string(),
            options: options.map(|o| o.to_string()),
            correct: correct.min(3),
        }
    }
}

/// A question as presented for one round: option order shuffled, correct
/// index remapped to match.
#[derive(Debug, Clone)]
pub struct DealtQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
}

static GENERAL_POOL: Lazy<Vec<TriviaQuestion>> = Lazy::new(|| {
    vec![
        TriviaQuestion::new(
            "What is the capital of Australia?",
            ["Sydney", "Canberra", "Melbourne", "Perth"],
            1,
        ),
        TriviaQuestion::new(
            "Which planet is known as the Red Planet?",
            ["Venus", "Jupiter", "Mars", "Mercury"],
            2,
        ),
        TriviaQuestion::new(
            "How many continents are there?",
            ["Five", "Six", "Seven", "Eight"],
            2,
        ),
        TriviaQuestion::new(
            "What gas do plants absorb from the atmosphere?",
            ["Oxygen", "Nitrogen", "Hydrogen", "Carbon dioxide"],
            3,
        ),
        TriviaQuestion::new(
            "Which ocean is the largest?",
            ["Atlantic", "Pacific", "Indian", "Arctic"],
            1,
        ),
        TriviaQuestion::new(
            "What is the chemical symbol for gold?",
            ["Au", "Ag", "Go", "Gd"],
            0,
        ),
        TriviaQuestion::new(
            "How many sides does a hexagon have?",
            ["Five", "Six", "Seven", "Eight"],
            1,
        ),
        TriviaQuestion::new(
            "Which instrument has 88 keys?",
            ["Organ", "Accordion", "Piano", "Harpsichord"],
            2,
        ),
        TriviaQuestion::new(
            "What is the largest mammal?",
            ["Elephant", "Blue whale", "Giraffe", "Orca"],
            1,
        ),
        TriviaQuestion::new(
            "In which country would you find the Eiffel Tower?",
            ["Italy", "Belgium", "France", "Spain"],
            2,
        ),
        TriviaQuestion::new(
            "What is the boiling point of water at sea level?",
            ["90°C", "100°C", "110°C", "120°C"],
            1,
        ),
        TriviaQuestion::new(
            "Which language has the most native speakers?",
            ["English", "Hindi", "Spanish", "Mandarin"],
            3,
        ),
    ]
});

static EXPERT_POOL: Lazy<Vec<TriviaQuestion>> = Lazy::new(|| {
    vec![
        TriviaQuestion::new(
            "Which element has the atomic number 79?",
            ["Silver", "Gold", "Platinum", "Mercury"],
            1,
        ),
        TriviaQuestion::new(
            "In what year did the Berlin Wall fall?",
            ["1987", "1989", "1991", "1993"],
            1,
        ),
        TriviaQuestion::new(
            "What is the derivative of sin(x)?",
            ["cos(x)", "-cos(x)", "tan(x)", "-sin(x)"],
            0,
        ),
        TriviaQuestion::new(
            "Which composer wrote the Brandenburg Concertos?",
            ["Mozart", "Beethoven", "Bach", "Handel"],
            2,
        ),
        TriviaQuestion::new(
            "What is the longest river in Asia?",
            ["Mekong", "Ganges", "Yellow River", "Yangtze"],
            3,
        ),
        TriviaQuestion::new(
            "Which particle carries the electromagnetic force?",
            ["Gluon", "Photon", "Boson W", "Neutrino"],
            1,
        ),
        TriviaQuestion::new(
            "Who wrote 'One Hundred Years of Solitude'?",
            ["Borges", "Neruda", "García Márquez", "Vargas Llosa"],
            2,
        ),
        TriviaQuestion::new(
            "What is the capital of Kazakhstan?",
            ["Almaty", "Astana", "Tashkent", "Bishkek"],
            1,
        ),
        TriviaQuestion::new(
            "Which blood type is the universal donor?",
            ["AB+", "A-", "O-", "B+"],
            2,
        ),
        TriviaQuestion::new(
            "How many bones are in the adult human body?",
            ["196", "206", "216", "226"],
            1,
        ),
    ]
});

/// A pool dealt without replacement within a shuffled pass; exhausting
/// the pass reshuffles and continues, so endless modes never run out of
/// content.
#[derive(Debug, Clone)]
pub struct QuestionPool {
    questions: Vec<TriviaQuestion>,
    order: Vec<usize>,
    cursor: usize,
}

impl QuestionPool {
    /// Build a pool from custom questions. An empty list falls back to
    /// the built-in general pool so dealing always succeeds.
    pub fn new(questions: Vec<TriviaQuestion>) -> Self {
        let questions = if questions.is_empty() {
            GENERAL_POOL.clone()
        } else {
            questions
        };
        let order: Vec<usize> = (0..questions.len()).collect();
        let cursor = order.len();
        QuestionPool {
            questions,
            order,
            cursor,
        }
    }

    /// The built-in general-knowledge pool.
    pub fn general() -> Self {
        Self::new(GENERAL_POOL.clone())
    }

    /// The built-in harder pool (ultimate, exclusive).
    pub fn expert() -> Self {
        Self::new(EXPERT_POOL.clone())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Deal the next question of the current pass, reshuffling first if
    /// the pass is exhausted. Option order is shuffled per deal and the
    /// correct index remapped.
    pub fn deal(&mut self, rng: &mut StdRng) -> DealtQuestion {
        if self.cursor >= self.order.len() {
            self.order.shuffle(rng);
            self.cursor = 0;
        }
        let question = &self.questions[self.order[self.cursor]];
        self.cursor += 1;

        let mut positions: Vec<usize> = (0..question.options.len()).collect();
        positions.shuffle(rng);
        let options: Vec<String> = positions
            .iter()
            .map(|&p| question.options[p].clone())
            .collect();
        let correct = positions
            .iter()
            .position(|&p| p == question.correct)
            .unwrap_or(0);

        DealtQuestion {
            prompt: question.prompt.clone(),
            options,
            correct,
        }
    }
}

/// Which of the five trivia games this session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaVariant {
    /// Timed quiz against a global 60-second clock.
    Speed,
    /// Endless survival: three lives, power-ups, per-question deadline.
    Rush,
    /// Ten rounds against a simulated bot opponent.
    Battle,
    /// Twelve harder questions on a tight per-question deadline.
    Ultimate,
    /// Arena mode: harder pool with a streak multiplier.
    Exclusive,
}

impl TriviaVariant {
    pub fn game_id(&self) -> GameId {
        match self {
            TriviaVariant::Speed => GameId::SpeedQuiz,
            TriviaVariant::Rush => GameId::Rush,
            TriviaVariant::Battle => GameId::Battle,
            TriviaVariant::Ultimate => GameId::Ultimate,
            TriviaVariant::Exclusive => GameId::Exclusive,
        }
    }

    fn pool(&self) -> QuestionPool {
        match self {
            TriviaVariant::Ultimate | TriviaVariant::Exclusive => QuestionPool::expert(),
            _ => QuestionPool::general(),
        }
    }

    fn deadline_ms(&self) -> Option<u64> {
        match self {
            TriviaVariant::Speed => None,
            TriviaVariant::Rush => Some(10_000),
            TriviaVariant::Battle => Some(10_000),
            TriviaVariant::Ultimate => Some(8_000),
            TriviaVariant::Exclusive => Some(6_000),
        }
    }

    fn scoring(&self, difficulty: Difficulty) -> ScoreConfig {
        let tier = difficulty.index() as u32;
        match self {
            TriviaVariant::Speed => ScoreConfig {
                base: 10,
                difficulty_bonus: 5 * tier,
                time_bonus_per_sec: 1,
                time_bonus_cap: 10,
                streak_bonus_step: 2,
                streak_bonus_cap: 10,
                multiplier: None,
            },
            TriviaVariant::Rush => ScoreConfig {
                base: 10,
                difficulty_bonus: 5 * tier,
                time_bonus_per_sec: 2,
                time_bonus_cap: 10,
                streak_bonus_step: 2,
                streak_bonus_cap: 20,
                multiplier: None,
            },
            TriviaVariant::Battle => ScoreConfig {
                base: 15,
                difficulty_bonus: 5 * tier,
                time_bonus_per_sec: 1,
                time_bonus_cap: 10,
                streak_bonus_step: 3,
                streak_bonus_cap: 15,
                multiplier: None,
            },
            TriviaVariant::Ultimate => ScoreConfig {
                base: 20,
                difficulty_bonus: 10 * tier,
                time_bonus_per_sec: 2,
                time_bonus_cap: 16,
                streak_bonus_step: 4,
                streak_bonus_cap: 20,
                multiplier: None,
            },
            TriviaVariant::Exclusive => ScoreConfig {
                base: 15,
                difficulty_bonus: 5 * tier,
                time_bonus_per_sec: 2,
                time_bonus_cap: 12,
                streak_bonus_step: 0,
                streak_bonus_cap: 0,
                multiplier: Some(MultiplierConfig {
                    step: 3,
                    increment: 0.5,
                    cap: 3.0,
                }),
            },
        }
    }

    fn session_config(&self, difficulty: Difficulty) -> SessionConfig {
        let scoring = self.scoring(difficulty);
        match self {
            TriviaVariant::Speed => SessionConfig {
                clock: ClockSpec::SessionCountdown { total_ms: 60_000 },
                rounds: RoundLimit::Endless,
                lives: None,
                reveal_ms: 800,
                start_countdown_ms: 0,
                scoring,
            },
            TriviaVariant::Rush => SessionConfig {
                clock: ClockSpec::PerRound,
                rounds: RoundLimit::Endless,
                lives: Some(3),
                reveal_ms: 1_000,
                start_countdown_ms: 0,
                scoring,
            },
            TriviaVariant::Battle => SessionConfig {
                clock: ClockSpec::PerRound,
                rounds: RoundLimit::Fixed(10),
                lives: None,
                reveal_ms: 1_500,
                // Opponent-search screen before the first round.
                start_countdown_ms: 3_000,
                scoring,
            },
            TriviaVariant::Ultimate => SessionConfig {
                clock: ClockSpec::PerRound,
                rounds: RoundLimit::Fixed(12),
                lives: None,
                reveal_ms: 1_000,
                start_countdown_ms: 0,
                scoring,
            },
            TriviaVariant::Exclusive => SessionConfig {
                clock: ClockSpec::PerRound,
                rounds: RoundLimit::Fixed(10),
                lives: None,
                reveal_ms: 800,
                start_countdown_ms: 0,
                scoring,
            },
        }
    }
}

/// Rush power-ups with per-session use counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUp {
    /// Hide two wrong options.
    FiftyFifty,
    /// Gain one life.
    ExtraLife,
    /// Extend the current question's deadline.
    TimeFreeze,
}

/// Extra deadline granted by a time freeze.
pub const TIME_FREEZE_BONUS_MS: u64 = 5_000;

/// One round's presented content: the dealt question plus, in battle,
/// the bot's already-drawn decision for the round.
#[derive(Debug, Clone)]
pub struct TriviaRound {
    pub question: DealtQuestion,
    pub bot: Option<BotDecision>,
}

/// The player's answer: an option index.
#[derive(Debug, Clone, Copy)]
pub struct AnswerInput {
    pub choice: usize,
}

/// Rules policy shared by all five trivia variants.
pub struct TriviaRules {
    variant: TriviaVariant,
    pool: QuestionPool,
    bot: Option<BotProfile>,
    player_round_wins: u32,
    bot_round_wins: u32,
    power_ups: HashMap<PowerUp, u32>,
}

impl TriviaRules {
    pub fn new(variant: TriviaVariant, difficulty: Difficulty) -> Self {
        Self::with_pool(variant, difficulty, variant.pool())
    }

    /// Use a custom question pool (the platform ships themed packs).
    pub fn with_pool(variant: TriviaVariant, difficulty: Difficulty, pool: QuestionPool) -> Self {
        let bot = match variant {
            TriviaVariant::Battle => Some(BotProfile::for_difficulty(difficulty)),
            _ => None,
        };
        let power_ups = match variant {
            TriviaVariant::Rush => HashMap::from([
                (PowerUp::FiftyFifty, 2),
                (PowerUp::ExtraLife, 1),
                (PowerUp::TimeFreeze, 2),
            ]),
            _ => HashMap::new(),
        };
        TriviaRules {
            variant,
            pool,
            bot,
            player_round_wins: 0,
            bot_round_wins: 0,
            power_ups,
        }
    }

    pub fn variant(&self) -> TriviaVariant {
        self.variant
    }

    /// Rounds the player has taken off the bot, and vice versa.
    pub fn round_wins(&self) -> (u32, u32) {
        (self.player_round_wins, self.bot_round_wins)
    }

    /// Remaining uses of a power-up.
    pub fn power_up_remaining(&self, kind: PowerUp) -> u32 {
        self.power_ups.get(&kind).copied().unwrap_or(0)
    }

    /// Consume one use of a power-up. False if none remain.
    pub fn consume_power_up(&mut self, kind: PowerUp) -> bool {
        match self.power_ups.get_mut(&kind) {
            Some(uses) if *uses > 0 => {
                *uses -= 1;
                true
            }
            _ => false,
        }
    }

    /// Fifty-fifty: pick two wrong options to hide. Consumes a use.
    pub fn fifty_fifty<RNG: Rng>(
        &mut self,
        round: &TriviaRound,
        rng: &mut RNG,
    ) -> Option<[usize; 2]> {
        if !self.consume_power_up(PowerUp::FiftyFifty) {
            return None;
        }
        let mut wrong: Vec<usize> = (0..round.question.options.len())
            .filter(|&i| i != round.question.correct)
            .collect();
        wrong.shuffle(rng);
        wrong.truncate(2);
        match (wrong.first(), wrong.get(1)) {
            (Some(&a), Some(&b)) => Some([a, b]),
            _ => None,
        }
    }
}

impl GameRules for TriviaRules {
    type Content = TriviaRound;
    type Input = AnswerInput;

    fn game_id(&self) -> GameId {
        self.variant.game_id()
    }

    fn generate(&mut self, _round: u32, rng: &mut StdRng) -> TriviaRound {
        let question = self.pool.deal(rng);
        let bot = self.bot.map(|profile| bot::decide(&question, profile, rng));
        TriviaRound { question, bot }
    }

    fn judge(&mut self, content: &TriviaRound, input: &AnswerInput, _response_ms: u64) -> bool {
        input.choice == content.question.correct
    }

    fn round_deadline_ms(&self, _round: u32) -> Option<u64> {
        self.variant.deadline_ms()
    }

    fn on_resolved(&mut self, content: &TriviaRound, outcome: RoundOutcome, response_ms: u64) {
        let Some(bot) = content.bot else {
            return;
        };
        let player_correct = outcome == RoundOutcome::CorrectInTime;
        // The round goes to whoever answers correctly; a correct answer
        // from both goes to the faster one.
        if player_correct && (!bot.correct || response_ms < bot.latency_ms) {
            self.player_round_wins += 1;
        } else if bot.correct && (!player_correct || bot.latency_ms < response_ms) {
            self.bot_round_wins += 1;
        }
    }

    fn terminal_bonus(&self, tracker: &ScoreTracker, _clock_remaining_ms: u64) -> u32 {
        match self.variant {
            TriviaVariant::Battle => {
                if self.player_round_wins > self.bot_round_wins {
                    BATTLE_WIN_BONUS
                } else {
                    0
                }
            }
            TriviaVariant::Speed => {
                if tracker.is_perfect() {
                    25
                } else {
                    0
                }
            }
            TriviaVariant::Ultimate => {
                if tracker.is_perfect() {
                    100
                } else {
                    0
                }
            }
            TriviaVariant::Exclusive => {
                if tracker.is_perfect() {
                    150
                } else {
                    0
                }
            }
            TriviaVariant::Rush => 0,
        }
    }
}

/// Build a ready-to-start session for a trivia variant.
pub fn session(variant: TriviaVariant, difficulty: Difficulty) -> GameSession<TriviaRules> {
    GameSession::new(
        TriviaRules::new(variant, difficulty),
        variant.session_config(difficulty),
    )
}

/// Seeded variant of [`session`], for deterministic tests.
pub fn session_with_seed(
    variant: TriviaVariant,
    difficulty: Difficulty,
    seed: u64,
) -> GameSession<TriviaRules> {
    GameSession::with_seed(
        TriviaRules::new(variant, difficulty),
        variant.session_config(difficulty),
        seed,
    )
}

/// Spend a time-freeze power-up on the live round. No round, no spend:
/// invoking this outside `InRound` keeps the use for later.
pub fn use_time_freeze(session: &mut GameSession<TriviaRules>) -> bool {
    if session.phase() != Phase::InRound {
        return false;
    }
    if session.rules_mut().consume_power_up(PowerUp::TimeFreeze) {
        session.extend_round_deadline(TIME_FREEZE_BONUS_MS);
        true
    } else {
        false
    }
}

/// Spend an extra-life power-up.
pub fn use_extra_life(session: &mut GameSession<TriviaRules>) -> bool {
    if session.rules_mut().consume_power_up(PowerUp::ExtraLife) {
        session.add_life();
        true
    } else {
        false
    }
}
