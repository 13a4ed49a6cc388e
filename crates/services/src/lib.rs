#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod sessions;
pub mod timer;

pub use quiz_core::Clock;

pub use error::SessionError;
pub use sessions::{
    EndReport, QuizSession, ROUND_SECONDS, SessionOutcome, SessionProgress, SessionState,
    SessionView, SubmitOutcome,
};
pub use timer::{Countdown, TickOutcome, TickToken};
