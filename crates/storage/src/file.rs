use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::repository::{LoadedScore, ScoreRepository, StorageError};

/// File-backed score store.
///
/// The persisted format is the decimal-text representation of a single
/// non-negative integer. A missing file is the normal first-run state and
/// loads as a session-only 0; unparseable contents degrade the same way.
#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ScoreRepository for FileScoreStore {
    fn load(&self) -> LoadedScore {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "no readable high score file");
                return LoadedScore::session_only(0);
            }
        };

        match text.trim().parse::<u32>() {
            Ok(value) => LoadedScore::persisted(value),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "high score file is corrupt");
                LoadedScore::session_only(0)
            }
        }
    }

    fn save(&self, value: u32) -> Result<(), StorageError> {
        fs::write(&self.path, value.to_string()).map_err(|e| StorageError::Write(e.to_string()))
    }
}
