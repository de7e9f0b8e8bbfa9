//! Player preferences
//!
//! Persisted separately from the best score. Only affects how feedback is
//! presented, never the simulation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play haptic patterns for feedback cues
    pub haptics: bool,
    /// Play tones for feedback cues
    pub sound: bool,
    /// Tone volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            haptics: true,
            sound: true,
            volume: 0.8,
        }
    }
}

impl Settings {
    /// Volume actually used for tones (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&json)?;
        if !(0.0..=1.0).contains(&settings.volume) {
            return Err(ConfigError::InvalidValue {
                field: "volume",
                message: format!("{} is outside 0.0 - 1.0", settings.volume),
            });
        }
        Ok(settings)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::load_from(path.as_ref()) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.as_ref().display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({})", e);
                Self::default()
            }
        }
    }
}
