//! Error types.
//!
//! The taxonomy is narrow: a corrupt high score is absorbed as 0 and a
//! failed save is logged, while missing assets and a lost render surface
//! are fatal.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce the frames of a named animation.  Fatal at startup.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("unknown asset: {0}")]
    Missing(String),

    #[error("cannot read asset {name} from {path}: {source}")]
    Unreadable {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("asset {0} has no frames")]
    Empty(String),
}

#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("failed to write high score to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loop-level failures.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to load assets: {0}")]
    Asset(#[from] AssetError),

    #[error("render surface lost: {0}")]
    Surface(#[from] io::Error),

    #[error("input channel closed")]
    InputClosed,
}
