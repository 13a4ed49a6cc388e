#![forbid(unsafe_code)]

pub mod file;
pub mod repository;

pub use file::FileScoreStore;
pub use repository::{InMemoryScoreStore, LoadedScore, ScoreRepository, ScoreSource, StorageError};
