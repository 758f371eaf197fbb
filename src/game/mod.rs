//! Mini-game variants: identifiers, difficulty tiers, and per-game rules

pub mod aim;
pub mod arithmetic;
pub mod colorword;
pub mod memory;
pub mod reaction;
pub mod sequence;
pub mod trivia;

/// Identifier for one of the eleven mini-game variants.
///
/// The `as_str` form is what gets sent to the points service at
/// session end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameId {
    Memory,
    Reaction,
    Sequence,
    MathRace,
    ColorMatch,
    AimTrainer,
    SpeedQuiz,
    Battle,
    Rush,
    Ultimate,
    Exclusive,
}

impl GameId {
    /// Get all game identifiers in dashboard order.
    pub fn all() -> &'static [GameId] {
        &[
            GameId::Memory,
            GameId::Reaction,
            GameId::Sequence,
            GameId::MathRace,
            GameId::ColorMatch,
            GameId::AimTrainer,
            GameId::SpeedQuiz,
            GameId::Battle,
            GameId::Rush,
            GameId::Ultimate,
            GameId::Exclusive,
        ]
    }

    /// Wire identifier used by the points service.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameId::Memory => "memory",
            GameId::Reaction => "reaction",
            GameId::Sequence => "sequence",
            GameId::MathRace => "mathrace",
            GameId::ColorMatch => "colormatch",
            GameId::AimTrainer => "aimtrainer",
            GameId::SpeedQuiz => "speed",
            GameId::Battle => "battle",
            GameId::Rush => "rush",
            GameId::Ultimate => "ultimate",
            GameId::Exclusive => "exclusive",
        }
    }

    /// Human-readable display name.
    pub fn label(&self) -> &'static str {
        match self {
            GameId::Memory => "Memory Match",
            GameId::Reaction => "Reaction Time",
            GameId::Sequence => "Sequence Recall",
            GameId::MathRace => "Math Race",
            GameId::ColorMatch => "Color Match",
            GameId::AimTrainer => "Aim Trainer",
            GameId::SpeedQuiz => "Speed Quiz",
            GameId::Battle => "Quiz Battle",
            GameId::Rush => "Quiz Rush",
            GameId::Ultimate => "Ultimate Quiz",
            GameId::Exclusive => "Exclusive Arena",
        }
    }
}

/// Session difficulty tier, selected at game start.
///
/// The bot opponent's lenient/moderate/strict tiers map onto these
/// one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Get all tiers in ascending order.
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    /// Zero-based tier index (Easy = 0).
    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Map an arbitrary tier index onto a difficulty, clamping
    /// out-of-range values. Generators never fail on bad input.
    pub fn from_index(index: usize) -> Difficulty {
        match index {
            0 => Difficulty::Easy,
            1 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_ids_are_unique() {
        let ids: Vec<&str> = GameId::all().iter().map(|g| g.as_str()).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(ids.len(), 11);
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_difficulty_from_index_clamps() {
        assert_eq!(Difficulty::from_index(0), Difficulty::Easy);
        assert_eq!(Difficulty::from_index(1), Difficulty::Medium);
        assert_eq!(Difficulty::from_index(2), Difficulty::Hard);
        assert_eq!(Difficulty::from_index(99), Difficulty::Hard);
    }

    #[test]
    fn test_difficulty_ordering() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Hard);
    }
}
