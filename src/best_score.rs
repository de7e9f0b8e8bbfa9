//! Best score record
//!
//! The only persisted gameplay value. Stored as a one-field JSON object.

use serde::{Deserialize, Serialize};

/// Highest score reached on this installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScore {
    #[serde(rename = "best_score")]
    pub score: u32,
}

impl BestScore {
    pub fn new(score: u32) -> Self {
        Self { score }
    }

    /// Raise the record to `score` if it is higher. Returns true on a new best.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.score {
            self.score = score;
            true
        } else {
            false
        }
    }
}
