use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors surfaced by score store adapters.
///
/// Reads never fail: missing or unreadable storage degrades to a
/// session-only score of 0 instead (see `LoadedScore`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("write failed: {0}")]
    Write(String),
}

/// Where a loaded best score came from.
///
/// `SessionOnly` marks the degraded case: nothing readable was persisted, so
/// the value is only meaningful for the current process lifetime. The
/// presentation layer labels it "Session best" instead of "Best".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreSource {
    Persisted,
    SessionOnly,
}

/// A best score together with its provenance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadedScore {
    pub value: u32,
    pub source: ScoreSource,
}

impl LoadedScore {
    #[must_use]
    pub fn persisted(value: u32) -> Self {
        Self {
            value,
            source: ScoreSource::Persisted,
        }
    }

    #[must_use]
    pub fn session_only(value: u32) -> Self {
        Self {
            value,
            source: ScoreSource::SessionOnly,
        }
    }

    #[must_use]
    pub fn is_session_only(&self) -> bool {
        self.source == ScoreSource::SessionOnly
    }
}

/// Repository contract for the persisted best score.
pub trait ScoreRepository: Send + Sync {
    /// Read the persisted best score.
    ///
    /// Absent or unreadable storage yields `LoadedScore::session_only(0)`.
    fn load(&self) -> LoadedScore;

    /// Overwrite the persisted best score.
    ///
    /// Callers only save a value that beat the previous best.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the value cannot be stored.
    fn save(&self, value: u32) -> Result<(), StorageError>;
}

/// In-memory score store for testing and prototyping.
///
/// Writes can be made to fail so callers can exercise their degraded path.
#[derive(Clone, Default)]
pub struct InMemoryScoreStore {
    score: Arc<Mutex<Option<u32>>>,
    fail_writes: bool,
}

impl InMemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the store with a persisted score.
    #[must_use]
    pub fn with_score(value: u32) -> Self {
        Self {
            score: Arc::new(Mutex::new(Some(value))),
            fail_writes: false,
        }
    }

    /// Make every subsequent `save` fail.
    #[must_use]
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl ScoreRepository for InMemoryScoreStore {
    fn load(&self) -> LoadedScore {
        match self.score.lock() {
            Ok(guard) => match *guard {
                Some(value) => LoadedScore::persisted(value),
                None => LoadedScore::session_only(0),
            },
            Err(_) => LoadedScore::session_only(0),
        }
    }

    fn save(&self, value: u32) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write("writes disabled".to_string()));
        }
        let mut guard = self
            .score
            .lock()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        *guard = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_session_only_zero() {
        let store = InMemoryScoreStore::new();
        let loaded = store.load();
        assert_eq!(loaded.value, 0);
        assert!(loaded.is_session_only());
    }

    #[test]
    fn round_trips_saved_score() {
        let store = InMemoryScoreStore::new();
        store.save(17).unwrap();
        assert_eq!(store.load(), LoadedScore::persisted(17));
    }

    #[test]
    fn seeded_store_loads_as_persisted() {
        let store = InMemoryScoreStore::with_score(9);
        assert_eq!(store.load(), LoadedScore::persisted(9));
    }

    #[test]
    fn failing_store_rejects_writes_but_still_loads() {
        let store = InMemoryScoreStore::with_score(3).with_failing_writes();
        assert!(matches!(store.save(4), Err(StorageError::Write(_))));
        assert_eq!(store.load(), LoadedScore::persisted(3));
    }
}
