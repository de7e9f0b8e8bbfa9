//! Per-entity motion descriptors
//!
//! Replaces declarative move/wait/repeat action chains with plain data
//! evaluated every tick: `position = lerp(start, end, elapsed / duration)`.
//! `elapsed` advances by `dt * speed`, so the speed multiplier scales every
//! scrolling entity uniformly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What happens when a motion reaches its end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    /// Jump back to the start and repeat forever
    Loop,
    /// Stop at the end; the owner is removed
    Once,
}

/// Straight-line motion between two points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Motion {
    pub start: Vec2,
    pub end: Vec2,
    /// Seconds from start to end at speed 1.0
    pub duration: f32,
    /// Scaled seconds travelled so far
    pub elapsed: f32,
    /// Multiplier applied to time
    pub speed: f32,
    pub kind: MotionKind,
}

impl Motion {
    pub fn looping(start: Vec2, end: Vec2, duration: f32) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: 0.0,
            speed: 1.0,
            kind: MotionKind::Loop,
        }
    }

    pub fn once(start: Vec2, end: Vec2, duration: f32) -> Self {
        Self {
            kind: MotionKind::Once,
            ..Self::looping(start, end, duration)
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Fraction of the path covered, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn position(&self) -> Vec2 {
        self.start.lerp(self.end, self.progress())
    }

    /// Advance by `dt` seconds of scene time and return the new position
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        self.elapsed += dt * self.speed;
        if self.kind == MotionKind::Loop && self.duration > 0.0 && self.elapsed >= self.duration {
            self.elapsed = self.elapsed.rem_euclid(self.duration);
        }
        self.position()
    }

    pub fn is_finished(&self) -> bool {
        self.kind == MotionKind::Once && self.elapsed >= self.duration
    }
}
