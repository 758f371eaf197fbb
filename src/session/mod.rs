//! Generic game session state machine
//!
//! One play-through of any mini-game is one [`GameSession`]: a finite
//! lifecycle (idle, optional countdown-to-start, a round loop, terminal)
//! driven by a per-variant [`GameRules`] policy. The session record is
//! mutated only by the machine's own transition handlers; every delayed
//! effect (clock expiry, reveal advance, bot decision) carries a
//! [`RoundTicket`] and is silently dropped if the session has moved on.

pub mod clock;
pub mod scoring;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game::GameId;
use crate::report::SessionResult;
use clock::SessionClock;
use scoring::{ScoreConfig, ScoreTracker};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created but not yet started.
    NotStarted,
    /// Counting down to the first round (battle's opponent-search
    /// screen).
    AwaitingStart,
    /// A round is live and accepting input.
    InRound,
    /// Showing feedback between rounds; the clock is frozen.
    RoundResolved,
    /// Terminal. Only a restart or exit leaves this phase.
    Finished,
}

/// How a single round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Pending,
    CorrectInTime,
    IncorrectInTime,
    TimedOut,
}

/// Identity token for one round of one session run.
///
/// Delayed callbacks (bot decisions, scheduled expiries) must present
/// their ticket; a ticket from a finished, abandoned, or merely advanced
/// session no longer matches and the effect is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTicket {
    epoch: u32,
    round: u32,
}

/// Which clock bounds the session as a whole.
#[derive(Debug, Clone, Copy)]
pub enum ClockSpec {
    /// One global countdown over the whole session (speed quiz, math
    /// race, aim trainer).
    SessionCountdown { total_ms: u64 },
    /// Only per-round deadlines apply (battle, rush).
    PerRound,
    /// Count up, no global bound (memory).
    Elapsed,
}

/// When the round loop stops producing rounds.
#[derive(Debug, Clone, Copy)]
pub enum RoundLimit {
    /// A fixed number of rounds (battle, ultimate, exclusive).
    Fixed(u32),
    /// Endless; only lives, the global clock, or the rules' completion
    /// hook terminate (rush, memory, speed).
    Endless,
}

/// Static configuration for one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub clock: ClockSpec,
    pub rounds: RoundLimit,
    /// Lives for survival modes; the session finishes the instant they
    /// reach zero.
    pub lives: Option<u32>,
    /// Feedback delay between a resolution and the next round.
    pub reveal_ms: u64,
    /// Pre-game countdown; zero starts the first round immediately.
    pub start_countdown_ms: u64,
    pub scoring: ScoreConfig,
}

/// Per-variant policy plugged into the generic session machine.
///
/// `generate` must be a pure function of the round index and the random
/// source apart from the rules' own declared state (sequence history,
/// memory board).
pub trait GameRules {
    /// Generator output presented to the player for one round.
    type Content;
    /// The player's answer/action for one round.
    type Input;

    fn game_id(&self) -> GameId;

    /// Produce the content for the given round.
    fn generate(&mut self, round: u32, rng: &mut StdRng) -> Self::Content;

    /// Judge a player input against the round content. `response_ms` is
    /// the time elapsed within the round when the input arrived.
    fn judge(&mut self, content: &Self::Content, input: &Self::Input, response_ms: u64) -> bool;

    /// Time budget for a round, if the variant has per-round deadlines.
    fn round_deadline_ms(&self, _round: u32) -> Option<u64> {
        None
    }

    /// Bonus clock time awarded after a correct answer at the given
    /// streak (math race milestones).
    fn time_award_ms(&self, _streak: u32) -> u64 {
        0
    }

    /// Called once when a round resolves, before the reveal phase.
    fn on_resolved(&mut self, _content: &Self::Content, _outcome: RoundOutcome, _response_ms: u64) {}

    /// Rules-side terminal condition (memory: all pairs matched).
    fn is_complete(&self, _tracker: &ScoreTracker) -> bool {
        false
    }

    /// One-shot bonus added when the session finishes (perfect run,
    /// speed completion, win-vs-bot).
    fn terminal_bonus(&self, _tracker: &ScoreTracker, _clock_remaining_ms: u64) -> u32 {
        0
    }

    /// Highest level reached, for games that escalate round-by-round.
    fn highest_level(&self) -> Option<u32> {
        None
    }
}

/// One live round.
#[derive(Debug)]
struct ActiveRound<C> {
    content: C,
    deadline_ms: Option<u64>,
    elapsed_ms: u64,
    outcome: RoundOutcome,
    ticket: RoundTicket,
}

/// One play-through of one mini-game.
///
/// Time is pushed in by the embedding via [`GameSession::advance`];
/// there are no internal timers, so teardown is just dropping the
/// session (or [`GameSession::abandon`], which also invalidates any
/// tickets still held by scheduled callbacks).
pub struct GameSession<R: GameRules> {
    rules: R,
    config: SessionConfig,
    rng: StdRng,
    phase: Phase,
    epoch: u32,
    round_index: u32,
    clock: SessionClock,
    tracker: ScoreTracker,
    lives: Option<u32>,
    countdown_left_ms: u64,
    reveal_left_ms: u64,
    current: Option<ActiveRound<R::Content>>,
    result: Option<SessionResult>,
}

impl<R: GameRules> GameSession<R> {
    /// Create a session with an OS-seeded random source.
    pub fn new(rules: R, config: SessionConfig) -> Self {
        Self::build(rules, config, StdRng::from_os_rng())
    }

    /// Create a session with a fixed seed (deterministic content, for
    /// testing).
    pub fn with_seed(rules: R, config: SessionConfig, seed: u64) -> Self {
        Self::build(rules, config, StdRng::seed_from_u64(seed))
    }

    fn build(rules: R, config: SessionConfig, rng: StdRng) -> Self {
        let clock = match config.clock {
            ClockSpec::SessionCountdown { total_ms } => SessionClock::countdown(total_ms),
            ClockSpec::PerRound | ClockSpec::Elapsed => SessionClock::count_up(),
        };
        let tracker = ScoreTracker::new(config.scoring.clone());
        let lives = config.lives;
        GameSession {
            rules,
            config,
            rng,
            phase: Phase::NotStarted,
            epoch: 0,
            round_index: 0,
            clock,
            tracker,
            lives,
            countdown_left_ms: 0,
            reveal_left_ms: 0,
            current: None,
            result: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_id(&self) -> GameId {
        self.rules.game_id()
    }

    pub fn score(&self) -> u32 {
        self.tracker.score
    }

    pub fn streak(&self) -> u32 {
        self.tracker.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.tracker.best_streak
    }

    pub fn multiplier(&self) -> f64 {
        self.tracker.multiplier()
    }

    pub fn lives(&self) -> Option<u32> {
        self.lives
    }

    /// Zero-based index of the current (or next) round.
    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn tracker(&self) -> &ScoreTracker {
        &self.tracker
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Mutable access to the rules policy (power-up consumption in
    /// rush).
    pub fn rules_mut(&mut self) -> &mut R {
        &mut self.rules
    }

    /// Remaining global clock budget, zero for unbounded clocks.
    pub fn clock_remaining_ms(&self) -> u64 {
        self.clock.remaining_ms()
    }

    /// Total in-round time so far.
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    /// Content of the live round, if one is active.
    pub fn current_content(&self) -> Option<&R::Content> {
        match self.phase {
            Phase::InRound | Phase::RoundResolved => self.current.as_ref().map(|r| &r.content),
            _ => None,
        }
    }

    /// Ticket identifying the live round.
    pub fn current_ticket(&self) -> Option<RoundTicket> {
        if self.phase == Phase::InRound {
            self.current.as_ref().map(|r| r.ticket)
        } else {
            None
        }
    }

    /// Outcome of the most recently resolved round.
    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.current.as_ref().map(|r| r.outcome)
    }

    /// Time left before the live round's own deadline, if it has one.
    pub fn round_remaining_ms(&self) -> Option<u64> {
        let round = self.current.as_ref()?;
        round.deadline_ms.map(|d| d.saturating_sub(round.elapsed_ms))
    }

    /// Whether a ticket still refers to the live round. Delayed
    /// callbacks check this before applying any effect.
    pub fn is_current(&self, ticket: RoundTicket) -> bool {
        self.phase == Phase::InRound
            && ticket.epoch == self.epoch
            && ticket.round == self.round_index
    }

    /// Start the session. A configured start countdown (battle's
    /// opponent search) runs first; otherwise the first round begins
    /// immediately.
    pub fn start(&mut self) {
        if self.phase != Phase::NotStarted {
            return;
        }
        if self.config.start_countdown_ms > 0 {
            self.countdown_left_ms = self.config.start_countdown_ms;
            self.phase = Phase::AwaitingStart;
        } else {
            self.begin_round();
        }
    }

    /// Submit the player's input for the round identified by `ticket`.
    ///
    /// Exactly one of input or expiry resolves a round: input arriving
    /// for an already-resolved round (or carrying a stale ticket) is
    /// silently ignored. An input processed before the expiry is
    /// delivered wins the tie, uniformly across all variants.
    pub fn submit(&mut self, ticket: RoundTicket, input: &R::Input) -> Option<RoundOutcome> {
        if !self.is_current(ticket) {
            tracing::debug!(game = self.rules.game_id().as_str(), "stale input dropped");
            return None;
        }
        let round = self.current.as_mut()?;
        if round.outcome != RoundOutcome::Pending {
            return None;
        }
        let response_ms = round.elapsed_ms;
        let correct = self.rules.judge(&round.content, input, response_ms);
        let outcome = if correct {
            RoundOutcome::CorrectInTime
        } else {
            RoundOutcome::IncorrectInTime
        };
        self.resolve_current(outcome, response_ms);
        Some(outcome)
    }

    /// Push elapsed time into the session. Drives the start countdown,
    /// the round clock and deadline, and the reveal delay, consuming the
    /// delta across phase boundaries so a large step cannot skip a
    /// resolution. Round N+1 is never generated before round N has
    /// fully resolved and revealed.
    pub fn advance(&mut self, delta_ms: u64) {
        let mut left = delta_ms;
        loop {
            match self.phase {
                Phase::AwaitingStart => {
                    let step = left.min(self.countdown_left_ms);
                    self.countdown_left_ms -= step;
                    left -= step;
                    if self.countdown_left_ms == 0 {
                        self.begin_round();
                    }
                    if left == 0 {
                        break;
                    }
                }
                Phase::InRound => {
                    let (step, deadline_hit) = {
                        let round = match self.current.as_ref() {
                            Some(r) => r,
                            None => break,
                        };
                        let mut step = left;
                        if let Some(d) = round.deadline_ms {
                            step = step.min(d.saturating_sub(round.elapsed_ms));
                        }
                        if matches!(self.config.clock, ClockSpec::SessionCountdown { .. }) {
                            step = step.min(self.clock.remaining_ms());
                        }
                        let hit = round
                            .deadline_ms
                            .is_some_and(|d| round.elapsed_ms + step >= d);
                        (step, hit)
                    };
                    self.clock.advance(step);
                    if let Some(round) = self.current.as_mut() {
                        round.elapsed_ms += step;
                    }
                    left -= step;

                    let clock_out = self.clock.expired();
                    if deadline_hit {
                        let response_ms =
                            self.current.as_ref().map(|r| r.elapsed_ms).unwrap_or(0);
                        self.resolve_current(RoundOutcome::TimedOut, response_ms);
                    }
                    if clock_out {
                        // Global expiry ends the session; a round still
                        // pending at that instant is discarded, not
                        // charged as a timeout.
                        self.finish();
                    } else if !deadline_hit && left > 0 {
                        // No deadline and no global bound consumes the
                        // rest of the delta in one step.
                        self.clock.advance(left);
                        if let Some(round) = self.current.as_mut() {
                            round.elapsed_ms += left;
                        }
                        left = 0;
                    }
                    if left == 0 {
                        break;
                    }
                }
                Phase::RoundResolved => {
                    let step = left.min(self.reveal_left_ms);
                    self.reveal_left_ms -= step;
                    left -= step;
                    if self.reveal_left_ms == 0 {
                        if self.terminal_due() {
                            self.finish();
                        } else {
                            self.round_index += 1;
                            self.begin_round();
                        }
                    }
                    if left == 0 {
                        break;
                    }
                }
                Phase::NotStarted | Phase::Finished => break,
            }
        }
    }

    /// End the session now, applying terminal bonuses and packaging the
    /// result. Idempotent: re-entering the terminal state neither
    /// recomputes nor re-adds bonuses.
    pub fn finish(&mut self) {
        if self.phase == Phase::Finished {
            return;
        }
        self.clock.freeze();
        let bonus = self
            .rules
            .terminal_bonus(&self.tracker, self.clock.remaining_ms());
        self.tracker.apply_terminal(bonus);
        self.phase = Phase::Finished;
        // Outstanding tickets go stale.
        self.epoch += 1;
        self.current = None;
        self.result = Some(SessionResult {
            game_id: self.rules.game_id(),
            score: self.tracker.score,
            rounds_played: self.tracker.rounds_played(),
            correct: self.tracker.correct,
            incorrect: self.tracker.incorrect,
            timeouts: self.tracker.timeouts,
            best_streak: self.tracker.best_streak,
            highest_level: self.rules.highest_level(),
            average_response_ms: self.tracker.average_response_ms(),
            duration_ms: self.clock.elapsed_ms(),
        });
    }

    /// Tear the session down without a result (user navigated away).
    /// All pending tickets go stale; nothing is reported.
    pub fn abandon(&mut self) {
        if self.phase == Phase::Finished {
            return;
        }
        self.epoch += 1;
        self.current = None;
        self.clock.freeze();
        self.phase = Phase::Finished;
    }

    /// Take the final result. Yields at most once per session, which is
    /// what makes the reporter's exactly-once call structural.
    pub fn take_result(&mut self) -> Option<SessionResult> {
        if self.phase == Phase::Finished {
            self.result.take()
        } else {
            None
        }
    }

    /// Grant an extra life (rush power-up).
    pub fn add_life(&mut self) {
        if let Some(lives) = &mut self.lives {
            *lives += 1;
        }
    }

    /// Extend the live round's deadline (rush time-freeze power-up).
    pub fn extend_round_deadline(&mut self, bonus_ms: u64) {
        if self.phase != Phase::InRound {
            return;
        }
        if let Some(round) = self.current.as_mut() {
            if let Some(d) = &mut round.deadline_ms {
                *d += bonus_ms;
            }
        }
    }

    fn begin_round(&mut self) {
        let content = self.rules.generate(self.round_index, &mut self.rng);
        let deadline_ms = self.rules.round_deadline_ms(self.round_index);
        self.current = Some(ActiveRound {
            content,
            deadline_ms,
            elapsed_ms: 0,
            outcome: RoundOutcome::Pending,
            ticket: RoundTicket {
                epoch: self.epoch,
                round: self.round_index,
            },
        });
        self.clock.resume();
        self.phase = Phase::InRound;
    }

    fn resolve_current(&mut self, outcome: RoundOutcome, response_ms: u64) {
        let remaining = self.remaining_for_score();
        let round = match self.current.as_mut() {
            Some(r) => r,
            None => return,
        };
        round.outcome = outcome;
        self.tracker.record(outcome, remaining, response_ms);
        self.rules.on_resolved(&round.content, outcome, response_ms);

        match outcome {
            RoundOutcome::CorrectInTime => {
                let award = self.rules.time_award_ms(self.tracker.streak);
                if award > 0 {
                    self.clock.extend(award);
                }
            }
            RoundOutcome::IncorrectInTime | RoundOutcome::TimedOut => {
                if let Some(lives) = &mut self.lives {
                    *lives = lives.saturating_sub(1);
                    if *lives == 0 {
                        // Losing the last life ends the session
                        // immediately, mid-round.
                        self.finish();
                        return;
                    }
                }
            }
            RoundOutcome::Pending => {}
        }

        self.clock.freeze();
        self.reveal_left_ms = self.config.reveal_ms;
        self.phase = Phase::RoundResolved;
        if self.config.reveal_ms == 0 {
            // No reveal configured: advance the loop state directly.
            if self.terminal_due() {
                self.finish();
            } else {
                self.round_index += 1;
                self.begin_round();
            }
        }
    }

    /// Time left on the round's authoritative clock, for scoring.
    fn remaining_for_score(&self) -> u64 {
        if let Some(round) = self.current.as_ref() {
            if let Some(d) = round.deadline_ms {
                return d.saturating_sub(round.elapsed_ms);
            }
        }
        self.clock.remaining_ms()
    }

    fn terminal_due(&self) -> bool {
        let limit_reached = match self.config.rounds {
            RoundLimit::Fixed(n) => self.round_index + 1 >= n,
            RoundLimit::Endless => false,
        };
        limit_reached || self.clock.expired() || self.rules.is_complete(&self.tracker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameId;

    /// Fixed-answer quiz rules for exercising the machine in isolation:
    /// every round's answer is the round index.
    struct EchoRules {
        deadline_ms: Option<u64>,
    }

    impl GameRules for EchoRules {
        type Content = u32;
        type Input = u32;

        fn game_id(&self) -> GameId {
            GameId::SpeedQuiz
        }

        fn generate(&mut self, round: u32, _rng: &mut StdRng) -> u32 {
            round
        }

        fn judge(&mut self, content: &u32, input: &u32, _response_ms: u64) -> bool {
            content == input
        }

        fn round_deadline_ms(&self, _round: u32) -> Option<u64> {
            self.deadline_ms
        }
    }

    fn quick_config() -> SessionConfig {
        SessionConfig {
            clock: ClockSpec::PerRound,
            rounds: RoundLimit::Fixed(3),
            lives: None,
            reveal_ms: 500,
            start_countdown_ms: 0,
            scoring: ScoreConfig::flat(10),
        }
    }

    fn session(deadline_ms: Option<u64>, config: SessionConfig) -> GameSession<EchoRules> {
        GameSession::with_seed(EchoRules { deadline_ms }, config, 7)
    }

    #[test]
    fn test_lifecycle_not_started_to_finished() {
        let mut s = session(None, quick_config());
        assert_eq!(s.phase(), Phase::NotStarted);
        s.start();
        assert_eq!(s.phase(), Phase::InRound);

        for round in 0..3 {
            let ticket = s.current_ticket().expect("live round");
            assert_eq!(s.submit(ticket, &round), Some(RoundOutcome::CorrectInTime));
            assert_eq!(s.phase(), Phase::RoundResolved);
            s.advance(500);
        }
        assert_eq!(s.phase(), Phase::Finished);
        assert_eq!(s.score(), 30);
    }

    #[test]
    fn test_input_after_resolution_is_ignored() {
        let mut s = session(None, quick_config());
        s.start();
        let ticket = s.current_ticket().unwrap();
        assert!(s.submit(ticket, &0).is_some());
        // Same ticket again: round already resolved.
        assert!(s.submit(ticket, &0).is_none());
        assert_eq!(s.score(), 10);
    }

    #[test]
    fn test_stale_ticket_from_earlier_round_is_ignored() {
        let mut s = session(None, quick_config());
        s.start();
        let old = s.current_ticket().unwrap();
        s.submit(old, &0);
        s.advance(500);
        assert_eq!(s.phase(), Phase::InRound);
        // The old round's ticket must not resolve the new round.
        assert!(s.submit(old, &1).is_none());
        let fresh = s.current_ticket().unwrap();
        assert!(s.submit(fresh, &1).is_some());
    }

    #[test]
    fn test_round_deadline_times_out() {
        let mut s = session(Some(2_000), quick_config());
        s.start();
        s.advance(2_000);
        assert_eq!(s.last_outcome(), Some(RoundOutcome::TimedOut));
        assert_eq!(s.phase(), Phase::RoundResolved);
        assert_eq!(s.score(), 0);
        assert_eq!(s.streak(), 0);
    }

    #[test]
    fn test_input_wins_tie_with_expiry() {
        // Documented tie-break: an input processed before the expiry is
        // delivered wins, so a submit at the deadline tick still scores.
        let mut s = session(Some(2_000), quick_config());
        s.start();
        s.advance(1_999);
        let ticket = s.current_ticket().unwrap();
        assert_eq!(s.submit(ticket, &0), Some(RoundOutcome::CorrectInTime));
        s.advance(1);
        assert_ne!(s.last_outcome(), Some(RoundOutcome::TimedOut));
    }

    #[test]
    fn test_expiry_first_then_input_is_timeout() {
        let mut s = session(Some(2_000), quick_config());
        s.start();
        let ticket = s.current_ticket().unwrap();
        s.advance(2_000);
        assert!(s.submit(ticket, &0).is_none());
        assert_eq!(s.last_outcome(), Some(RoundOutcome::TimedOut));
    }

    #[test]
    fn test_large_advance_does_not_skip_rounds() {
        // 3 rounds x 2s deadline + 0.5s reveal, pushed in one big step:
        // every round must resolve individually.
        let mut s = session(Some(2_000), quick_config());
        s.start();
        s.advance(60_000);
        assert_eq!(s.phase(), Phase::Finished);
        let result = s.take_result().unwrap();
        assert_eq!(result.timeouts, 3);
        assert_eq!(result.rounds_played, 3);
    }

    #[test]
    fn test_session_countdown_expiry_finishes() {
        let mut config = quick_config();
        config.clock = ClockSpec::SessionCountdown { total_ms: 5_000 };
        config.rounds = RoundLimit::Endless;
        let mut s = session(None, config);
        s.start();
        s.advance(5_000);
        assert_eq!(s.phase(), Phase::Finished);
        let result = s.take_result().unwrap();
        // The round still pending when the global clock died is
        // discarded, not charged as a timeout.
        assert_eq!(result.timeouts, 0);
        assert_eq!(result.rounds_played, 0);
    }

    #[test]
    fn test_clock_expiry_mid_round_keeps_resolved_tallies() {
        let mut config = quick_config();
        config.clock = ClockSpec::SessionCountdown { total_ms: 5_000 };
        config.rounds = RoundLimit::Endless;
        let mut s = session(None, config);
        s.start();
        s.advance(1_000);
        let ticket = s.current_ticket().unwrap();
        s.submit(ticket, &0);
        s.advance(500);
        // Clock dies with round 1 pending: the earlier correct round
        // survives in the result, the pending one leaves no trace.
        s.advance(10_000);
        assert_eq!(s.phase(), Phase::Finished);
        let result = s.take_result().unwrap();
        assert_eq!(result.correct, 1);
        assert_eq!(result.timeouts, 0);
        assert_eq!(result.rounds_played, 1);
    }

    #[test]
    fn test_clock_frozen_during_reveal() {
        let mut config = quick_config();
        config.clock = ClockSpec::SessionCountdown { total_ms: 10_000 };
        let mut s = session(None, config);
        s.start();
        s.advance(1_000);
        assert_eq!(s.clock_remaining_ms(), 9_000);
        let ticket = s.current_ticket().unwrap();
        s.submit(ticket, &0);
        // Reveal phase: global clock must not decrement.
        s.advance(400);
        assert_eq!(s.clock_remaining_ms(), 9_000);
        s.advance(100);
        assert_eq!(s.phase(), Phase::InRound);
        s.advance(1_000);
        assert_eq!(s.clock_remaining_ms(), 8_000);
    }

    #[test]
    fn test_lives_exhaustion_finishes_immediately() {
        let mut config = quick_config();
        config.rounds = RoundLimit::Endless;
        config.lives = Some(2);
        let mut s = session(None, config);
        s.start();
        let t = s.current_ticket().unwrap();
        s.submit(t, &99);
        assert_eq!(s.lives(), Some(1));
        assert_eq!(s.phase(), Phase::RoundResolved);
        s.advance(500);
        let t = s.current_ticket().unwrap();
        // Losing the last life skips the reveal and ends the session.
        s.submit(t, &99);
        assert_eq!(s.lives(), Some(0));
        assert_eq!(s.phase(), Phase::Finished);
    }

    #[test]
    fn test_start_countdown_phase() {
        let mut config = quick_config();
        config.start_countdown_ms = 3_000;
        let mut s = session(None, config);
        s.start();
        assert_eq!(s.phase(), Phase::AwaitingStart);
        assert!(s.current_ticket().is_none());
        s.advance(2_999);
        assert_eq!(s.phase(), Phase::AwaitingStart);
        s.advance(1);
        assert_eq!(s.phase(), Phase::InRound);
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut s = session(None, quick_config());
        s.start();
        let t = s.current_ticket().unwrap();
        s.submit(t, &0);
        s.finish();
        let score = s.score();
        s.finish();
        s.finish();
        assert_eq!(s.score(), score);
    }

    #[test]
    fn test_take_result_yields_once() {
        let mut s = session(None, quick_config());
        s.start();
        s.finish();
        assert!(s.take_result().is_some());
        assert!(s.take_result().is_none());
    }

    #[test]
    fn test_take_result_before_finish_is_none() {
        let mut s = session(None, quick_config());
        s.start();
        assert!(s.take_result().is_none());
    }

    #[test]
    fn test_abandon_cancels_tickets_and_yields_no_result() {
        let mut s = session(None, quick_config());
        s.start();
        let ticket = s.current_ticket().unwrap();
        s.abandon();
        assert_eq!(s.phase(), Phase::Finished);
        assert!(!s.is_current(ticket));
        assert!(s.submit(ticket, &0).is_none());
        assert!(s.take_result().is_none());
    }

    #[test]
    fn test_score_equals_sum_of_deltas() {
        let mut s = session(None, quick_config());
        s.start();
        let mut total = 0u32;
        for round in 0..3 {
            let before = s.score();
            let t = s.current_ticket().unwrap();
            s.submit(t, &round);
            total += s.score() - before;
            s.advance(500);
        }
        let result = s.take_result().unwrap();
        assert_eq!(result.score, total);
    }

    #[test]
    fn test_extend_round_deadline() {
        let mut s = session(Some(2_000), quick_config());
        s.start();
        s.advance(1_500);
        s.extend_round_deadline(2_000);
        s.advance(1_000);
        // Without the extension this round would have timed out.
        assert_eq!(s.phase(), Phase::InRound);
        assert_eq!(s.round_remaining_ms(), Some(1_500));
    }
}
