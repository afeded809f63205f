//! High-score persistence.
//!
//! Loading never fails: a missing or unreadable record counts as a best score
//! of 0. Save failures are logged and otherwise ignored so a read-only disk
//! never interrupts play.

use crate::constants::HIGH_SCORE_KEY;
use crate::utils::persistence::{self, PersistenceError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Somewhere the best score survives between runs.
pub trait HighScoreStore {
    fn load_high_score(&self) -> u32;
    fn save_high_score(&mut self, score: u32);
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Box<T> {
    fn load_high_score(&self) -> u32 {
        (**self).load_high_score()
    }

    fn save_high_score(&mut self, score: u32) {
        (**self).save_high_score(score)
    }
}

/// On-disk form of the high score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u32,
    pub achieved_at: DateTime<Utc>,
}

/// JSON file store, one record per file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data directory.
    pub fn in_data_dir() -> Result<Self, PersistenceError> {
        let path = persistence::data_file_path(&format!("{}.json", HIGH_SCORE_KEY))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_record(&self) -> Result<HighScoreRecord, PersistenceError> {
        persistence::read_json(&self.path)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load_high_score(&self) -> u32 {
        match self.load_record() {
            Ok(record) => record.score,
            Err(PersistenceError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no high score recorded yet");
                0
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable high score");
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u32) {
        let record = HighScoreRecord {
            score,
            achieved_at: Utc::now(),
        };
        if let Err(e) = persistence::write_json(&self.path, &record) {
            tracing::warn!(error = %e, score, "failed to save high score");
        }
    }
}

/// In-memory store. Used when no data directory is available, and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: u32,
    saves: usize,
}

impl MemoryStore {
    pub fn with_score(score: u32) -> Self {
        Self { score, saves: 0 }
    }

    /// Number of `save_high_score` calls seen.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> u32 {
        self.score
    }

    fn save_high_score(&mut self, score: u32) {
        self.score = score;
        self.saves += 1;
    }
}
