//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a JSON file can
//! retune the game without a rebuild. Missing fields fall back to `consts`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Gameplay balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scene ===
    pub scene_width: f32,
    pub scene_height: f32,
    pub ground_height: f32,

    // === Timing ===
    /// Seconds between obstacle pair spawns
    pub spawn_interval: f32,
    /// Seconds for a pipe to cross the scene at speed 1.0
    pub pipe_crossing_duration: f32,
    /// Speed multiplier gained per point
    pub speed_step: f32,
    /// Delay before the idle scene freezes after first load
    pub startup_pause_delay: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_x_fraction: f32,
    pub gravity: f32,
    pub flap_impulse: f32,
    pub flap_angular_impulse: f32,
    pub max_vertical_speed: f32,
    pub flap_frame_time: f32,

    // === Obstacles ===
    pub pipe_width: f32,
    pub pipe_height: f32,
    pub pipe_body_inset: [f32; 2],
    pub barrier_width: f32,
    pub barrier_offset_x: f32,
    pub max_gap_offset: f32,
    pub gap_min: f32,
    pub gap_max: f32,

    /// Run seed for reproducible obstacle layouts
    pub seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scene_width: SCENE_WIDTH,
            scene_height: SCENE_HEIGHT,
            ground_height: GROUND_HEIGHT,

            spawn_interval: SPAWN_INTERVAL,
            pipe_crossing_duration: PIPE_CROSSING_DURATION,
            speed_step: SPEED_STEP,
            startup_pause_delay: STARTUP_PAUSE_DELAY,

            player_radius: PLAYER_RADIUS,
            player_x_fraction: PLAYER_X_FRACTION,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            flap_angular_impulse: FLAP_ANGULAR_IMPULSE,
            max_vertical_speed: MAX_VERTICAL_SPEED,
            flap_frame_time: FLAP_FRAME_TIME,

            pipe_width: PIPE_WIDTH,
            pipe_height: PIPE_HEIGHT,
            pipe_body_inset: PIPE_BODY_INSET,
            barrier_width: BARRIER_WIDTH,
            barrier_offset_x: BARRIER_OFFSET_X,
            max_gap_offset: MAX_GAP_OFFSET,
            gap_min: GAP_MIN,
            gap_max: GAP_MAX,

            seed: 0x5eed_f1a9,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("scene_width", self.scene_width),
            ("scene_height", self.scene_height),
            ("spawn_interval", self.spawn_interval),
            ("pipe_crossing_duration", self.pipe_crossing_duration),
            ("player_radius", self.player_radius),
            ("max_vertical_speed", self.max_vertical_speed),
            ("flap_frame_time", self.flap_frame_time),
            ("pipe_width", self.pipe_width),
            ("pipe_height", self.pipe_height),
            ("barrier_width", self.barrier_width),
            ("gap_min", self.gap_min),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field,
                    message: format!("{value} (must be > 0)"),
                });
            }
        }

        if self.speed_step < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "speed_step",
                message: format!("{} (must be >= 0)", self.speed_step),
            });
        }
        if self.gap_max < self.gap_min {
            return Err(ConfigError::InvalidValue {
                field: "gap_max",
                message: format!("{} is below gap_min {}", self.gap_max, self.gap_min),
            });
        }
        if self.max_gap_offset < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "max_gap_offset",
                message: format!("{} (must be >= 0)", self.max_gap_offset),
            });
        }
        if !(0.0..=1.0).contains(&self.player_x_fraction) {
            return Err(ConfigError::InvalidValue {
                field: "player_x_fraction",
                message: format!("{} (must be within 0..=1)", self.player_x_fraction),
            });
        }
        if self.ground_height < 0.0 || self.ground_height >= self.scene_height {
            return Err(ConfigError::InvalidValue {
                field: "ground_height",
                message: format!(
                    "{} (must be within 0..{})",
                    self.ground_height, self.scene_height
                ),
            });
        }
        Ok(())
    }

    /// Fixed x coordinate of the player
    pub fn player_x(&self) -> f32 {
        self.scene_width * self.player_x_fraction
    }

    /// Vertical centre of the space above the grass
    pub fn playfield_center_y(&self) -> f32 {
        self.ground_height + (self.scene_height - self.ground_height) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "spawn_interval": 2.5 }"#).unwrap();
        assert!((tuning.spawn_interval - 2.5).abs() < f32::EPSILON);
        assert!((tuning.pipe_crossing_duration - PIPE_CROSSING_DURATION).abs() < f32::EPSILON);
        assert_eq!(tuning.seed, Tuning::default().seed);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let tuning = Tuning {
            spawn_interval: 0.0,
            ..Default::default()
        };
        match tuning.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "spawn_interval"),
            other => panic!("expected invalid spawn_interval, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_inverted_gap_range() {
        let tuning = Tuning {
            gap_min: 90.0,
            gap_max: 60.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::InvalidValue { field: "gap_max", .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("wrist-flap-no-such-tuning.json");
        assert!(matches!(Tuning::load(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_playfield_center_sits_above_ground() {
        let tuning = Tuning::default();
        let center = tuning.playfield_center_y();
        assert!(center > tuning.ground_height);
        assert!(center < tuning.scene_height);
        assert!((tuning.player_x() - SCENE_WIDTH * PLAYER_X_FRACTION).abs() < 1e-4);
    }
}
