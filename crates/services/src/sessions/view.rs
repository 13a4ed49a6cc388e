use serde::Serialize;

/// Render-ready snapshot of the published session state.
///
/// The adapter reads these fields verbatim and never mutates the session
/// directly; changes flow back in through intents only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// Start invitation, current question, transient error, or game-over
    /// text, depending on state.
    pub prompt: String,
    /// "Score: {n}" while a run is active, empty otherwise.
    pub score: String,
    /// "Best: {n}", or "Session best: {n}" when nothing readable was
    /// persisted; empty during a practice run.
    pub best: String,
    /// "Time left: {n}" during a timed run, empty otherwise.
    pub time_left: String,
    /// Label for the single action button: Start, Submit or Restart.
    pub action: String,
    /// True while a run is active; settings controls should be disabled.
    pub locked: bool,
}
