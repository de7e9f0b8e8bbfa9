//! Presentation boundary
//!
//! The game never draws or plays anything itself. A `Presenter` receives the
//! HUD state and feedback cues; a device backend turns them into pixels,
//! vibration and sound.

use crate::feedback::FeedbackCue;
use crate::settings::Settings;

/// What the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudState {
    pub score: u32,
    pub best_score: u32,
    /// "Tap to start" overlay, visible while idle or failed
    pub show_tap_overlay: bool,
}

/// Device output
pub trait Presenter {
    fn present_cue(&mut self, cue: FeedbackCue);

    fn present_hud(&mut self, hud: &HudState);
}

/// Headless presenter that writes everything to the log
#[derive(Debug, Clone, Default)]
pub struct LogPresenter {
    settings: Settings,
    last_hud: Option<HudState>,
    /// Cues actually played
    pub cues_played: u32,
}

impl LogPresenter {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            last_hud: None,
            cues_played: 0,
        }
    }

    pub fn last_hud(&self) -> Option<&HudState> {
        self.last_hud.as_ref()
    }
}

impl Presenter for LogPresenter {
    fn present_cue(&mut self, cue: FeedbackCue) {
        let mut played = false;
        if self.settings.haptics {
            log::info!("Haptic: {}", cue.haptic_name());
            played = true;
        }
        let tone = cue.tone().scaled(self.settings.effective_volume());
        if tone.is_audible() {
            log::info!(
                "Tone: {:.0} Hz for {} ms at {:.2}",
                tone.frequency_hz,
                tone.duration_ms,
                tone.volume
            );
            played = true;
        }
        if played {
            self.cues_played += 1;
        }
    }

    fn present_hud(&mut self, hud: &HudState) {
        // Only log changes
        if self.last_hud.as_ref() == Some(hud) {
            return;
        }
        log::debug!(
            "HUD: score {} best {}{}",
            hud.score,
            hud.best_score,
            if hud.show_tap_overlay { " [tap to start]" } else { "" }
        );
        self.last_hud = Some(*hud);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_presenter_plays_nothing() {
        let mut presenter = LogPresenter::new(Settings {
            haptics: false,
            sound: false,
            volume: 1.0,
        });
        presenter.present_cue(FeedbackCue::Success);
        assert_eq!(presenter.cues_played, 0);
    }

    #[test]
    fn test_presenter_remembers_hud() {
        let mut presenter = LogPresenter::new(Settings::default());
        let hud = HudState {
            score: 2,
            best_score: 5,
            show_tap_overlay: false,
        };
        presenter.present_hud(&hud);
        presenter.present_cue(FeedbackCue::Start);
        assert_eq!(presenter.last_hud(), Some(&hud));
        assert_eq!(presenter.cues_played, 1);
    }
}
