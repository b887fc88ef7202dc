//! High-score persistence.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ScoreStoreError;

pub trait ScoreStore {
    /// The persisted high score, or 0 when absent or unreadable.
    fn load_high_score(&self) -> u32;

    fn save_high_score(&mut self, value: u32) -> Result<(), ScoreStoreError>;
}

/// A single decimal integer in a text file.
#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.invaders_score`, or the working directory without `HOME`.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".invaders_score")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load_high_score(&self) -> u32 {
        let score = fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0);
        debug!(path = %self.path.display(), score, "loaded high score");
        score
    }

    fn save_high_score(&mut self, value: u32) -> Result<(), ScoreStoreError> {
        fs::write(&self.path, value.to_string()).map_err(|source| ScoreStoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
