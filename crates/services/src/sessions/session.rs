use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use quiz_core::Clock;
use quiz_core::model::{Question, QuestionSet, RangeDraft};
use storage::{LoadedScore, ScoreRepository};

use crate::error::SessionError;
use crate::generator;
use crate::timer::{Countdown, TickOutcome};

use super::progress::SessionProgress;
use super::view::SessionView;

/// Seconds a timed round lasts.
pub const ROUND_SECONDS: u32 = 30;

/// Seconds a rejected start stays visible before the view reverts.
const NOTICE_SECONDS: i64 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Running,
    Ended,
}

/// How a finished run came out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    NormalEnd,
    NewHighScore,
}

/// Everything the adapter needs to render the end of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndReport {
    pub outcome: SessionOutcome,
    pub final_score: u32,
    pub high_score: u32,
    /// Set when a new high score could not be persisted. The in-memory high
    /// score updates regardless.
    pub storage_failure: Option<String>,
}

/// Result of submitting one answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The run continues; `correct == false` is the wrong-answer pulse.
    Advanced { correct: bool },
    /// That was the last question; the run ended within the same call.
    Finished { correct: bool, report: EndReport },
}

struct Notice {
    message: String,
    expires_at: DateTime<Utc>,
}

/// The quiz session state machine.
///
/// Owns the question set, cursor, score, countdown and high score; the
/// presentation adapter only sends intents (`start`, `submit`, `end`) and
/// renders the published `view`. All operations run to completion on the
/// caller's thread; the 1-second tick arrives via `pump` from the adapter's
/// event loop.
pub struct QuizSession {
    clock: Clock,
    store: Arc<dyn ScoreRepository>,
    state: SessionState,
    questions: QuestionSet,
    cursor: usize,
    score: u32,
    high_score: LoadedScore,
    practice: bool,
    timer: Countdown,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    notice: Option<Notice>,
    last_report: Option<EndReport>,
}

impl QuizSession {
    /// Create an idle session; the best score is loaded from the store here.
    #[must_use]
    pub fn new(store: Arc<dyn ScoreRepository>) -> Self {
        let high_score = store.load();
        Self {
            clock: Clock::default(),
            store,
            state: SessionState::Idle,
            questions: QuestionSet::default(),
            cursor: 0,
            score: 0,
            high_score,
            practice: false,
            timer: Countdown::new(),
            started_at: None,
            ended_at: None,
            notice: None,
            last_report: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> LoadedScore {
        self.high_score
    }

    #[must_use]
    pub fn practice_mode(&self) -> bool {
        self.practice
    }

    /// True while a run is active; settings controls stay disabled then.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state == SessionState::Running
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.state == SessionState::Running {
            self.questions.get(self.cursor)
        } else {
            None
        }
    }

    /// Seconds left on the countdown, while a timed run is active.
    #[must_use]
    pub fn remaining_seconds(&self) -> Option<u32> {
        self.timer.remaining()
    }

    /// Returns a summary of the current run progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.questions.len(),
            answered: self.cursor,
            remaining: self.questions.len().saturating_sub(self.cursor),
            is_complete: self.state == SessionState::Ended,
        }
    }

    /// Start a run from the given raw settings.
    ///
    /// A fresh question set is generated on every start; finished sets are
    /// never replayed. Outside practice mode the countdown is armed at
    /// `ROUND_SECONDS`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` while a run is already active
    /// (the second start changes nothing). Returns the range error when the
    /// draft fails validation; state is unchanged and the view shows the
    /// error transiently before reverting.
    pub fn start(&mut self, draft: &RangeDraft) -> Result<(), SessionError> {
        if self.state == SessionState::Running {
            return Err(SessionError::InvalidState {
                operation: "start",
                state: self.state,
            });
        }

        let config = match draft.validate() {
            Ok(config) => config,
            Err(err) => {
                self.notice = Some(Notice {
                    message: err.to_string(),
                    expires_at: self.clock.now() + Duration::seconds(NOTICE_SECONDS),
                });
                return Err(err.into());
            }
        };

        let now = self.clock.now();
        self.questions = generator::generate(&config);
        self.cursor = 0;
        self.score = 0;
        self.practice = config.practice();
        self.state = SessionState::Running;
        self.started_at = Some(now);
        self.ended_at = None;
        self.notice = None;
        self.last_report = None;

        if self.practice {
            self.timer.stop();
        } else {
            self.timer.start(ROUND_SECONDS, now);
        }

        debug!(
            min = config.min(),
            max = config.max(),
            mode = ?config.mode(),
            practice = self.practice,
            questions = self.questions.len(),
            "session started"
        );
        Ok(())
    }

    /// Submit an answer for the current question.
    ///
    /// The input is trimmed and compared to the expected answer as an exact
    /// string. The cursor always advances; answering the last question ends
    /// the run within this call.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless a run is active. An idle
    /// session never reinterprets a submit as a start; the adapter chooses
    /// which intent to send.
    pub fn submit(&mut self, raw: &str) -> Result<SubmitOutcome, SessionError> {
        let Some(question) = self.current_question() else {
            return Err(SessionError::InvalidState {
                operation: "submit",
                state: self.state,
            });
        };

        let correct = question.is_correct(raw);
        if correct {
            self.score += 1;
        }
        self.cursor += 1;

        if self.cursor == self.questions.len() {
            let report = self.finish();
            return Ok(SubmitOutcome::Finished { correct, report });
        }
        Ok(SubmitOutcome::Advanced { correct })
    }

    /// End the active run.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless a run is active.
    pub fn end(&mut self) -> Result<EndReport, SessionError> {
        if self.state != SessionState::Running {
            return Err(SessionError::InvalidState {
                operation: "end",
                state: self.state,
            });
        }
        Ok(self.finish())
    }

    /// Drain due timer ticks.
    ///
    /// The adapter's event loop calls this periodically; returns the end
    /// report when the countdown expired the run. Expiry ends the run at
    /// most once, and a stopped timer yields nothing.
    pub fn pump(&mut self) -> Option<EndReport> {
        while self.state == SessionState::Running {
            let Some(token) = self.timer.due_token(self.clock.now()) else {
                return None;
            };
            match self.timer.tick(token) {
                TickOutcome::Ticked { .. } | TickOutcome::Suppressed => {}
                TickOutcome::Expired => return Some(self.finish()),
            }
        }
        None
    }

    /// Advance a fixed clock by `delta`; no effect on the system clock.
    pub fn advance_clock(&mut self, delta: Duration) {
        self.clock.advance(delta);
    }

    fn finish(&mut self) -> EndReport {
        self.timer.stop();
        let now = self.clock.now();

        let mut outcome = SessionOutcome::NormalEnd;
        let mut storage_failure = None;
        if !self.practice && self.score > self.high_score.value {
            outcome = SessionOutcome::NewHighScore;
            match self.store.save(self.score) {
                Ok(()) => self.high_score = LoadedScore::persisted(self.score),
                Err(err) => {
                    warn!(%err, score = self.score, "failed to persist new high score");
                    storage_failure = Some(err.to_string());
                    self.high_score.value = self.score;
                }
            }
        }

        self.state = SessionState::Ended;
        self.cursor = 0;
        self.questions = QuestionSet::default();
        self.ended_at = Some(now);

        let report = EndReport {
            outcome,
            final_score: self.score,
            high_score: self.high_score.value,
            storage_failure,
        };
        debug!(outcome = ?report.outcome, score = report.final_score, "session ended");
        self.last_report = Some(report.clone());
        report
    }

    /// Render-ready snapshot of the published state.
    #[must_use]
    pub fn view(&self) -> SessionView {
        let now = self.clock.now();
        let running = self.state == SessionState::Running;

        let prompt = if let Some(notice) = self.notice.as_ref().filter(|n| now < n.expires_at) {
            notice.message.clone()
        } else {
            match self.state {
                SessionState::Idle => "Press the button to start!".to_string(),
                SessionState::Running => self
                    .current_question()
                    .map(|q| q.prompt().to_string())
                    .unwrap_or_default(),
                SessionState::Ended => match self.last_report.as_ref().map(|r| r.outcome) {
                    Some(SessionOutcome::NewHighScore) => {
                        "Game Over!\nNew High Score!".to_string()
                    }
                    _ => "Game Over!".to_string(),
                },
            }
        };

        let score = if running {
            format!("Score: {}", self.score)
        } else {
            String::new()
        };

        let best = if running && self.practice {
            String::new()
        } else if self.high_score.is_session_only() {
            format!("Session best: {}", self.high_score.value)
        } else {
            format!("Best: {}", self.high_score.value)
        };

        let time_left = match self.remaining_seconds() {
            Some(secs) if running => format!("Time left: {secs}"),
            _ => String::new(),
        };

        let action = match self.state {
            SessionState::Idle => "Start",
            SessionState::Running => "Submit",
            SessionState::Ended => "Restart",
        };

        SessionView {
            prompt,
            score,
            best,
            time_left,
            action: action.to_string(),
            locked: self.is_locked(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("state", &self.state)
            .field("questions_len", &self.questions.len())
            .field("cursor", &self.cursor)
            .field("score", &self.score)
            .field("high_score", &self.high_score)
            .field("practice", &self.practice)
            .field("started_at", &self.started_at)
            .field("ended_at", &self.ended_at)
            .finish_non_exhaustive()
    }
}
