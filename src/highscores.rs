//! Best score across runs
//!
//! A single integer persisted under `"highScore"`. It only ever goes up.

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::KeyValueStore;

/// Persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Load the stored high score; missing or unreadable values read as 0
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let best = store.get_int(HIGH_SCORE_KEY).unwrap_or(0);
        log::info!("High score: {}", best);
        Self { best }
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run. Persists and returns true only when `score`
    /// beats the best so far.
    pub fn submit<S: KeyValueStore + ?Sized>(&mut self, score: u64, store: &mut S) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        store.set_int(HIGH_SCORE_KEY, score);
        log::info!("New high score: {}", score);
        true
    }
}
