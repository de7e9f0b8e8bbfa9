//! Score and difficulty
//!
//! `GameSession` owns the score, the best score and the derived speed
//! multiplier. It never touches storage; callers persist the best score when
//! `increment` reports a new record.

use serde::{Deserialize, Serialize};

use crate::best_score::BestScore;

/// Speed multiplier for a score: `1 + score * step`, unclamped
#[inline]
pub fn speed_for(score: u32, step: f32) -> f32 {
    1.0 + score as f32 * step
}

/// Result of a score change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreChange {
    pub score: u32,
    pub best_score: u32,
    pub speed: f32,
    pub new_best: bool,
}

/// Per-process scoring state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    score: u32,
    best: BestScore,
    speed: f32,
    speed_step: f32,
}

impl GameSession {
    pub fn new(best_score: u32, speed_step: f32) -> Self {
        Self {
            score: 0,
            best: BestScore::new(best_score),
            speed: 1.0,
            speed_step,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best.score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// One more obstacle passed
    pub fn increment(&mut self) -> ScoreChange {
        self.score += 1;
        let new_best = self.best.record(self.score);
        self.speed = speed_for(self.score, self.speed_step);
        self.change(new_best)
    }

    /// Back to zero for a new game; the best score is kept
    pub fn reset(&mut self) -> ScoreChange {
        self.score = 0;
        self.speed = speed_for(0, self.speed_step);
        self.change(false)
    }

    fn change(&self, new_best: bool) -> ScoreChange {
        ScoreChange {
            score: self.score,
            best_score: self.best.score,
            speed: self.speed,
            new_best,
        }
    }
}
