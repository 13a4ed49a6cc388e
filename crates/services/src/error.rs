//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::InvalidRangeError;

use crate::sessions::SessionState;

/// Errors emitted by the quiz session engine.
///
/// Range errors are user-recoverable and surfaced transiently by the view;
/// invalid-state errors mark an adapter calling an operation outside its
/// state and are rejected rather than silently ignored.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Range(#[from] InvalidRangeError),

    #[error("{operation} is not valid while the session is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}
