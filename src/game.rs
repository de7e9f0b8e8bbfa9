//! Frame-driven game wrapper
//!
//! `Game` owns the simulation state and the best score store. The host calls
//! `tap` on input and `update` once per frame with the wall-clock delta; the
//! simulation itself always advances in fixed `SIM_DT` steps.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::persistence::ScoreStore;
use crate::platform::{HudState, Presenter};
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Longest frame delta accepted before the simulation starts dropping time
const MAX_FRAME_DT: f32 = 0.1;

/// Game instance holding all state
pub struct Game<S: ScoreStore> {
    state: GameState,
    store: S,
    accumulator: f32,
    input: TickInput,
    /// Best score known to be on disk
    saved_best: u32,
    /// Events since the last drain
    events: Vec<GameEvent>,
}

impl<S: ScoreStore> Game<S> {
    /// Build the idle scene with the stored best score
    ///
    /// A store that fails to load starts from 0 and play continues.
    pub fn new(tuning: Tuning, store: S) -> Self {
        let best = match store.load_best() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Failed to load best score, starting from 0: {}", e);
                0
            }
        };
        Self {
            state: GameState::new(tuning, best),
            store,
            accumulator: 0.0,
            input: TickInput::default(),
            saved_best: best,
            events: Vec::new(),
        }
    }

    /// Register a tap; consumed by the next simulation step
    pub fn tap(&mut self) {
        self.input.tap = true;
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.input.autopilot != enabled {
            log::info!("Autopilot: {}", enabled);
        }
        self.input.autopilot = enabled;
    }

    /// Run simulation ticks for `dt` seconds of wall-clock time
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.tap = false;
        }

        self.events.extend(self.state.drain_events());
        self.persist_best();
    }

    /// Save the best score if it moved past what is on disk
    fn persist_best(&mut self) {
        let best = self.state.session.best_score();
        if best <= self.saved_best {
            return;
        }
        match self.store.save_best(best) {
            Ok(()) => self.saved_best = best,
            Err(e) => log::warn!("Failed to save best score {}: {}", best, e),
        }
    }

    pub fn hud(&self) -> HudState {
        HudState {
            score: self.state.session.score(),
            best_score: self.state.session.best_score(),
            show_tap_overlay: self.state.shows_tap_overlay(),
        }
    }

    /// Take all events since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand pending cues and the HUD to a presenter
    pub fn present(&mut self, presenter: &mut impl Presenter) {
        for event in self.drain_events() {
            if let GameEvent::Feedback(cue) = event {
                presenter.present_cue(cue);
            }
        }
        presenter.present_hud(&self.hud());
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
