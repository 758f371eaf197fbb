//! End-of-session reporting
//!
//! When a session finishes it produces a [`SessionResult`]; reporting
//! submits the earned score to the points service exactly once. The
//! submission is best-effort: a failure is logged and the locally
//! computed score is still what the player sees.

use tracing::{info, warn};

use crate::game::GameId;
use crate::profile::{PointsReceipt, PointsService};

/// Everything a finished session knows about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    pub game_id: GameId,
    pub score: u32,
    pub rounds_played: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub timeouts: u32,
    pub best_streak: u32,
    pub highest_level: Option<u32>,
    pub average_response_ms: u64,
    pub duration_ms: u64,
}

impl SessionResult {
    /// Fraction of rounds answered correctly, 0.0 when none were played.
    pub fn accuracy(&self) -> f64 {
        if self.rounds_played == 0 {
            return 0.0;
        }
        self.correct as f64 / self.rounds_played as f64
    }
}

/// What the results screen shows after reporting.
#[derive(Debug)]
pub struct ReportOutcome {
    /// The score the player earned, from local session state.
    pub final_score: u32,
    /// Updated cumulative counters, when the submission succeeded.
    pub receipt: Option<PointsReceipt>,
}

/// Submit a finished session's score. The local score is authoritative
/// either way; a failed submission only costs the updated totals.
pub fn report_session(result: &SessionResult, service: &dyn PointsService) -> ReportOutcome {
    let game_id = result.game_id.as_str();
    match service.submit_points(result.score, game_id) {
        Ok(receipt) => {
            info!(
                game = game_id,
                score = result.score,
                total = receipt.total_points,
                "points submitted"
            );
            ReportOutcome {
                final_score: result.score,
                receipt: Some(receipt),
            }
        }
        Err(err) => {
            warn!(game = game_id, score = result.score, error = %err, "points submission failed");
            ReportOutcome {
                final_score: result.score,
                receipt: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ProfileSnapshot, ServiceError};
    use std::cell::RefCell;

    struct FakeService {
        fail: bool,
        submissions: RefCell<Vec<(u32, String)>>,
    }

    impl FakeService {
        fn new(fail: bool) -> Self {
            FakeService {
                fail,
                submissions: RefCell::new(Vec::new()),
            }
        }
    }

    impl PointsService for FakeService {
        fn fetch_profile(&self) -> Result<ProfileSnapshot, ServiceError> {
            Ok(ProfileSnapshot::default())
        }

        fn submit_points(
            &self,
            earned: u32,
            game_id: &str,
        ) -> Result<PointsReceipt, ServiceError> {
            self.submissions
                .borrow_mut()
                .push((earned, game_id.to_string()));
            if self.fail {
                return Err(ServiceError::Status(503));
            }
            Ok(PointsReceipt {
                total_points: 1_000 + earned as u64,
                experience: 50,
                level: 3,
            })
        }
    }

    fn sample_result() -> SessionResult {
        SessionResult {
            game_id: GameId::MathRace,
            score: 230,
            rounds_played: 12,
            correct: 10,
            incorrect: 2,
            timeouts: 0,
            best_streak: 7,
            highest_level: Some(4),
            average_response_ms: 1_800,
            duration_ms: 60_000,
        }
    }

    #[test]
    fn test_successful_report_carries_receipt() {
        let service = FakeService::new(false);
        let outcome = report_session(&sample_result(), &service);
        assert_eq!(outcome.final_score, 230);
        let receipt = outcome.receipt.expect("receipt on success");
        assert_eq!(receipt.total_points, 1_230);
        assert_eq!(service.submissions.borrow().len(), 1);
        assert_eq!(service.submissions.borrow()[0], (230, "mathrace".to_string()));
    }

    #[test]
    fn test_failed_report_keeps_local_score() {
        let service = FakeService::new(true);
        let outcome = report_session(&sample_result(), &service);
        assert_eq!(outcome.final_score, 230);
        assert!(outcome.receipt.is_none());
        // submission was attempted once, not retried
        assert_eq!(service.submissions.borrow().len(), 1);
    }

    #[test]
    fn test_accuracy() {
        let result = sample_result();
        assert!((result.accuracy() - 10.0 / 12.0).abs() < 1e-9);

        let empty = SessionResult {
            rounds_played: 0,
            correct: 0,
            ..sample_result()
        };
        assert_eq!(empty.accuracy(), 0.0);
    }
}
