mod progress;
mod session;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use session::{
    EndReport, QuizSession, ROUND_SECONDS, SessionOutcome, SessionState, SubmitOutcome,
};
pub use view::SessionView;
