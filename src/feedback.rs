//! Feedback cues
//!
//! Each phase transition and each pass plays exactly one cue. The cue names a
//! haptic pattern and a short procedural tone so a device layer can play
//! either without any asset files.

use serde::{Deserialize, Serialize};

/// Cue emitted by the game controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackCue {
    /// A run began
    Start,
    /// Player hit a pipe or the grass
    Failure,
    /// Player passed a pair of pipes
    Success,
}

/// A single oscillator beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_ms: u32,
    /// Relative loudness (0.0 - 1.0) before the user's volume
    pub volume: f32,
}

impl FeedbackCue {
    pub const ALL: [FeedbackCue; 3] = [FeedbackCue::Start, FeedbackCue::Failure, FeedbackCue::Success];

    /// Name of the device haptic pattern
    pub fn haptic_name(&self) -> &'static str {
        match self {
            FeedbackCue::Start => "start",
            FeedbackCue::Failure => "failure",
            FeedbackCue::Success => "success",
        }
    }

    /// Tone for devices without haptics
    pub fn tone(&self) -> Tone {
        match self {
            // Launch - quick rising chirp
            FeedbackCue::Start => Tone {
                frequency_hz: 600.0,
                duration_ms: 150,
                volume: 0.3,
            },
            // Game over - low thud
            FeedbackCue::Failure => Tone {
                frequency_hz: 200.0,
                duration_ms: 400,
                volume: 0.4,
            },
            // Pickup - happy ding
            FeedbackCue::Success => Tone {
                frequency_hz: 1000.0,
                duration_ms: 120,
                volume: 0.25,
            },
        }
    }
}

impl Tone {
    /// Scale by a user volume, clamped to 0.0 - 1.0
    pub fn scaled(self, volume: f32) -> Self {
        Self {
            volume: self.volume * volume.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn is_audible(&self) -> bool {
        self.volume > 0.0 && self.duration_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_are_distinct() {
        let names: std::collections::HashSet<_> =
            FeedbackCue::ALL.iter().map(|c| c.haptic_name()).collect();
        assert_eq!(names.len(), FeedbackCue::ALL.len());
    }

    #[test]
    fn test_tone_scaling() {
        let tone = FeedbackCue::Success.tone();
        assert!(tone.is_audible());
        assert!(!tone.scaled(0.0).is_audible());
        assert_eq!(tone.scaled(2.0).volume, tone.volume);
        assert!((tone.scaled(0.5).volume - tone.volume * 0.5).abs() < 1e-6);
    }
}
