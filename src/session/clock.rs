//! Session clock: countdown or count-up timing for a game session
//!
//! The clock only runs while a round is active. It is frozen during the
//! reveal phase between rounds and can be extended by streak time
//! bonuses (math race).

/// Direction of the session clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
    /// Counts down from a budget; expiry ends the session.
    Countdown,
    /// Counts up without bound; the session ends on other conditions.
    CountUp,
}

/// Millisecond-resolution session timer.
///
/// Clocks start frozen; the session machine resumes them when the first
/// round begins.
#[derive(Debug, Clone)]
pub struct SessionClock {
    kind: ClockKind,
    /// Remaining budget for countdown clocks, unused for count-up.
    remaining_ms: u64,
    /// Total time the clock has run.
    elapsed_ms: u64,
    frozen: bool,
}

impl SessionClock {
    /// A countdown clock with the given total budget.
    pub fn countdown(total_ms: u64) -> Self {
        SessionClock {
            kind: ClockKind::Countdown,
            remaining_ms: total_ms,
            elapsed_ms: 0,
            frozen: true,
        }
    }

    /// A count-up clock (memory game, endless modes without a global
    /// bound).
    pub fn count_up() -> Self {
        SessionClock {
            kind: ClockKind::CountUp,
            remaining_ms: 0,
            elapsed_ms: 0,
            frozen: true,
        }
    }

    pub fn kind(&self) -> ClockKind {
        self.kind
    }

    /// Advance the clock. Frozen clocks do not move. Countdown clocks
    /// saturate at zero.
    pub fn advance(&mut self, delta_ms: u64) {
        if self.frozen {
            return;
        }
        self.elapsed_ms += delta_ms;
        if self.kind == ClockKind::Countdown {
            self.remaining_ms = self.remaining_ms.saturating_sub(delta_ms);
        }
    }

    /// Whether a countdown clock has run out. Count-up clocks never
    /// expire.
    pub fn expired(&self) -> bool {
        self.kind == ClockKind::Countdown && self.remaining_ms == 0
    }

    /// Remaining budget in milliseconds (zero for count-up clocks).
    pub fn remaining_ms(&self) -> u64 {
        match self.kind {
            ClockKind::Countdown => self.remaining_ms,
            ClockKind::CountUp => 0,
        }
    }

    /// Total time the clock has been running.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Award bonus time (streak milestone in the math race).
    pub fn extend(&mut self, bonus_ms: u64) {
        if self.kind == ClockKind::Countdown {
            self.remaining_ms += bonus_ms;
        }
    }

    /// Freeze the clock during the reveal phase.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Resume the clock when a round becomes active.
    pub fn resume(&mut self) {
        self.frozen = false;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_counts_down() {
        let mut clock = SessionClock::countdown(5_000);
        clock.resume();
        clock.advance(1_000);
        assert_eq!(clock.remaining_ms(), 4_000);
        assert_eq!(clock.elapsed_ms(), 1_000);
        assert!(!clock.expired());
    }

    #[test]
    fn test_countdown_does_not_go_negative() {
        let mut clock = SessionClock::countdown(1_000);
        clock.resume();
        clock.advance(5_000);
        assert_eq!(clock.remaining_ms(), 0);
        assert!(clock.expired());
        clock.advance(1_000);
        assert_eq!(clock.remaining_ms(), 0);
    }

    #[test]
    fn test_clock_starts_frozen() {
        let mut clock = SessionClock::countdown(5_000);
        clock.advance(1_000);
        assert_eq!(clock.remaining_ms(), 5_000);
        assert_eq!(clock.elapsed_ms(), 0);
    }

    #[test]
    fn test_freeze_stops_decrement() {
        let mut clock = SessionClock::countdown(5_000);
        clock.resume();
        clock.advance(1_000);
        clock.freeze();
        clock.advance(10_000);
        assert_eq!(clock.remaining_ms(), 4_000);
        clock.resume();
        clock.advance(1_000);
        assert_eq!(clock.remaining_ms(), 3_000);
    }

    #[test]
    fn test_extend_awards_bonus_time() {
        let mut clock = SessionClock::countdown(2_000);
        clock.resume();
        clock.advance(1_500);
        clock.extend(3_000);
        assert_eq!(clock.remaining_ms(), 3_500);
    }

    #[test]
    fn test_count_up_never_expires() {
        let mut clock = SessionClock::count_up();
        clock.resume();
        clock.advance(1_000_000);
        assert!(!clock.expired());
        assert_eq!(clock.elapsed_ms(), 1_000_000);
        assert_eq!(clock.remaining_ms(), 0);
    }
}
