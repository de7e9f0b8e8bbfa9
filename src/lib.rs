//! Wrist Flap - A tap-to-flap arcade game for small wearable displays
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, physics, spawning, game state)
//! - `game`: Fixed-timestep driver tying the simulation to a score store
//! - `persistence`: Best score save/load
//! - `platform`: Presentation boundary (HUD, feedback cues)
//! - `tuning`: Data-driven game balance

pub mod best_score;
pub mod error;
pub mod feedback;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use error::{ConfigError, Error, StoreError};
pub use feedback::FeedbackCue;
pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz matches the watch display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Scene dimensions in points (44mm watch face)
    pub const SCENE_WIDTH: f32 = 184.0;
    pub const SCENE_HEIGHT: f32 = 224.0;
    /// Height of the grass strip the player must not touch
    pub const GROUND_HEIGHT: f32 = 28.0;

    /// Seconds between obstacle pair spawns
    pub const SPAWN_INTERVAL: f32 = 4.0;
    /// Seconds for a pipe to cross from the right edge to fully off the left edge
    pub const PIPE_CROSSING_DURATION: f32 = 10.0;
    /// Speed multiplier gained per point scored
    pub const SPEED_STEP: f32 = 0.3;
    /// Delay before the world pauses behind the idle overlay after first load
    pub const STARTUP_PAUSE_DELAY: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 11.0;
    /// Fixed horizontal position as a fraction of scene width
    pub const PLAYER_X_FRACTION: f32 = 0.3;
    /// Gravity (points/s², negative = down)
    pub const GRAVITY: f32 = -420.0;
    /// Upward velocity added by one flap (points/s)
    pub const FLAP_IMPULSE: f32 = 150.0;
    /// Angular velocity added by one flap (radians/s)
    pub const FLAP_ANGULAR_IMPULSE: f32 = 2.4;
    /// Vertical speed cap in either direction
    pub const MAX_VERTICAL_SPEED: f32 = 260.0;
    /// Seconds each of the 3 flap frames stays on screen
    pub const FLAP_FRAME_TIME: f32 = 0.08;

    /// Pipe texture dimensions
    pub const PIPE_WIDTH: f32 = 36.0;
    pub const PIPE_HEIGHT: f32 = 200.0;
    /// Pipe collision body relative to texture bounds
    pub const PIPE_BODY_INSET: [f32; 2] = [0.8, 0.99];
    /// Barrier width and its horizontal offset behind the pipe centre
    pub const BARRIER_WIDTH: f32 = 4.0;
    pub const BARRIER_OFFSET_X: f32 = PIPE_WIDTH * 1.25;
    /// Largest vertical drift of a gap from the playfield centre
    pub const MAX_GAP_OFFSET: f32 = 36.0;
    /// Vertical gap between the two pipes of a pair
    pub const GAP_MIN: f32 = 70.0;
    pub const GAP_MAX: f32 = 90.0;
}

