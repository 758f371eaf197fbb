//! Quizcade: the mini-game engine behind the quiz platform's arcade.
//!
//! Every game is a set of [`session::GameRules`] driven by the shared
//! [`session::GameSession`] state machine. Content generation is
//! deterministic given a seed, the scoring model lives in
//! [`session::scoring`], and finished sessions are reported through
//! [`report`] to the [`profile::PointsService`].

pub mod bot;
pub mod game;
pub mod profile;
pub mod report;
pub mod session;

pub use game::{Difficulty, GameId};
pub use report::{report_session, ReportOutcome, SessionResult};
pub use session::{GameSession, Phase, RoundOutcome, RoundTicket};
