//! Game state and core simulation types
//!
//! Everything the fixed-timestep tick mutates lives in `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Arena, EntityId, PLAYER_FLAP_TEXTURES, PLAYER_IDLE_TEXTURE};
use super::physics::PhysicsWorld;
use super::schedule::{ScheduledAction, Scheduler};
use super::session::GameSession;
use super::spawner::Spawner;
use crate::feedback::FeedbackCue;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Fresh scene behind the "tap to start" overlay
    Idle,
    /// Active gameplay
    Playing,
    /// Player hit a pipe or the grass; score stays on screen until the next tap
    Failed,
}

/// Inputs to the phase state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    Tap,
    FallDetected,
    OvercomeDetected,
}

/// Things the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// One feedback cue per phase transition or pass
    Feedback(FeedbackCue),
    /// Score or best score changed
    ScoreChanged { score: u32, best_score: u32 },
    /// Score beat the stored best; should be persisted
    NewBestScore(u32),
    /// Player flapped
    Flapped,
}

/// Queue of flap animations on the player sprite
#[derive(Debug, Clone, Default)]
pub struct FlapAnimation {
    /// Animations waiting behind the current one
    queued: u32,
    /// Frame index within the running animation
    frame: Option<usize>,
    frame_timer: f32,
}

impl FlapAnimation {
    /// Queue one 3-frame flap
    pub fn push(&mut self) {
        if self.frame.is_none() {
            self.frame = Some(0);
            self.frame_timer = 0.0;
        } else {
            self.queued += 1;
        }
    }

    /// Advance and return the texture to show
    pub fn advance(&mut self, dt: f32, frame_time: f32) -> &'static str {
        if let Some(frame) = self.frame {
            self.frame_timer += dt;
            if self.frame_timer >= frame_time {
                self.frame_timer -= frame_time;
                let next = frame + 1;
                if next < PLAYER_FLAP_TEXTURES.len() {
                    self.frame = Some(next);
                } else if self.queued > 0 {
                    self.queued -= 1;
                    self.frame = Some(0);
                } else {
                    self.frame = None;
                    self.frame_timer = 0.0;
                }
            }
        }
        self.texture()
    }

    pub fn texture(&self) -> &'static str {
        match self.frame {
            Some(frame) => PLAYER_FLAP_TEXTURES[frame],
            None => PLAYER_IDLE_TEXTURE,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.frame.is_some()
    }

    /// Animations still to play, including the running one
    pub fn pending(&self) -> u32 {
        self.queued + u32::from(self.frame.is_some())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub session: GameSession,
    pub arena: Arena,
    pub scheduler: Scheduler,
    pub physics: PhysicsWorld,
    pub spawner: Spawner,
    pub rng: Pcg32,
    /// Handle to the live player entity
    pub player: Option<EntityId>,
    pub flap: FlapAnimation,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build the idle scene. The world runs briefly, then pauses behind the overlay.
    pub fn new(tuning: Tuning, best_score: u32) -> Self {
        let physics = PhysicsWorld::new(
            Vec2::new(0.0, tuning.gravity),
            tuning.max_vertical_speed,
            tuning.scene_height,
        );
        let mut state = Self {
            session: GameSession::new(best_score, tuning.speed_step),
            rng: Pcg32::seed_from_u64(tuning.seed),
            phase: GamePhase::Idle,
            arena: Arena::new(),
            scheduler: Scheduler::new(),
            physics,
            spawner: Spawner::new(),
            player: None,
            flap: FlapAnimation::default(),
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        };

        state.populate_scene();
        state
            .scheduler
            .run_after(ScheduledAction::PauseWorld, state.tuning.startup_pause_delay);
        state
    }

    /// Spawn background and player at the current speed
    pub(crate) fn populate_scene(&mut self) {
        let speed = self.session.speed();
        self.spawner
            .spawn_background(&mut self.arena, &self.tuning, speed);
        self.player = Some(self.spawner.spawn_player(&mut self.arena, &self.tuning));
    }

    /// Whether gameplay is live
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Whether the "tap to start" overlay should be visible
    pub fn shows_tap_overlay(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Current player position, if a player exists
    pub fn player_pos(&self) -> Option<Vec2> {
        self.player
            .and_then(|id| self.arena.get(id))
            .map(|e| e.pos)
    }

    /// Take all events since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
