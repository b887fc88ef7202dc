//! Score keeping.
//!
//! The scoreboard outlives every session reset: the current score survives
//! level completion and is zeroed only by a restart, while the high score
//! never decreases and is written through the [`ScoreStore`] whenever a
//! game ends with a new best.

use tracing::{info, warn};

use crate::score_store::ScoreStore;

pub struct Scoreboard {
    score: u32,
    high_score: u32,
    award: u32,
    store: Box<dyn ScoreStore>,
}

impl Scoreboard {
    /// Loads the persisted high score once.
    pub fn new(store: Box<dyn ScoreStore>, award: u32) -> Self {
        let high_score = store.load_high_score();
        Self {
            score: 0,
            high_score,
            award,
            store,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The persisted best, not counting the game in progress.
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// The best score including the game in progress.
    pub fn best(&self) -> u32 {
        self.high_score.max(self.score)
    }

    pub fn increase_score(&mut self) {
        self.score += self.award;
    }

    /// Start a fresh game, banking the old score first if it was a new best.
    pub fn reset_score(&mut self) {
        self.save_high_score();
        self.score = 0;
    }

    /// Promote and persist the current score if it beats the high score.
    /// Returns whether it did.  A failed write is logged, not propagated.
    pub fn save_high_score(&mut self) -> bool {
        if self.score <= self.high_score {
            return false;
        }
        self.high_score = self.score;
        info!(high_score = self.high_score, "new high score");
        if let Err(err) = self.store.save_high_score(self.high_score) {
            warn!(%err, "could not persist high score");
        }
        true
    }

    /// HUD text.
    pub fn status_text(&self) -> String {
        if self.best() > 0 {
            format!("Score:{:>6}  Hi:{:>6}", self.score, self.best())
        } else {
            format!("Score:{:>6}", self.score)
        }
    }
}
