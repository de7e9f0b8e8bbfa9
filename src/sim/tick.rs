//! Fixed timestep simulation tick
//!
//! Core game loop: taps drive the phase state machine, timers spawn
//! obstacles, motions scroll the scene, and physics contacts are classified
//! into falls and passes.

use glam::Vec2;

use super::collision::classify_contact;
use super::entity::EntityKind;
use super::schedule::ScheduledAction;
use super::session::ScoreChange;
use super::spawner::{ObstaclePair, apply_speed};
use super::state::{GameEvent, GamePhase, GameState, StateEvent};
use crate::feedback::FeedbackCue;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap/click this tick
    pub tap: bool,
    /// Demo mode - autopilot taps for the player
    pub autopilot: bool,
}

/// Feed one event to the phase state machine
pub fn transition(state: &mut GameState, event: StateEvent) {
    match (state.phase, event) {
        (GamePhase::Idle | GamePhase::Failed, StateEvent::Tap) => start(state),
        (GamePhase::Playing, StateEvent::Tap) => flap(state),
        (GamePhase::Playing, StateEvent::FallDetected) => fail(state),
        (GamePhase::Playing, StateEvent::OvercomeDetected) => {
            increment_score(state);
            state.events.push(GameEvent::Feedback(FeedbackCue::Success));
        }
        (phase, event) => {
            log::trace!("Ignoring {:?} while {:?}", event, phase);
        }
    }
}

fn start(state: &mut GameState) {
    reload(state);
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Feedback(FeedbackCue::Start));
    log::info!("Game started (best {})", state.session.best_score());
}

fn fail(state: &mut GameState) {
    state.phase = GamePhase::Failed;
    state.physics.pause();
    state.events.push(GameEvent::Feedback(FeedbackCue::Failure));
    log::info!(
        "Game over: score {} (best {})",
        state.session.score(),
        state.session.best_score()
    );
}

/// Tear the scene down and rebuild it for a new run
///
/// Every timer and entity goes before anything is re-scheduled, so repeated
/// restarts never leave overlapping spawn loops.
pub fn reload(state: &mut GameState) {
    state.scheduler.clear();
    state.arena.clear();
    state.physics.reset_contacts();
    state.flap.clear();
    state.spawner.reset();
    state.player = None;

    let change = state.session.reset();
    push_score_changed(state, change);

    state.populate_scene();
    state
        .scheduler
        .repeat_forever(ScheduledAction::SpawnObstacles, state.tuning.spawn_interval);
    state.physics.resume();
}

/// Queue a flap animation and kick the player upward. Ignored unless playing.
pub fn flap(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let Some(player) = state.player.and_then(|id| state.arena.get_mut(id)) else {
        return;
    };
    if let Some(body) = player.body.as_mut() {
        body.apply_impulse(
            Vec2::new(0.0, state.tuning.flap_impulse),
            state.tuning.flap_angular_impulse,
        );
    }
    state.flap.push();
    state.events.push(GameEvent::Flapped);
}

/// One more obstacle passed: bump score, re-speed every scrolling entity
pub fn increment_score(state: &mut GameState) -> ScoreChange {
    let change = state.session.increment();
    apply_speed(&mut state.arena, change.speed);
    push_score_changed(state, change);
    if change.new_best {
        state.events.push(GameEvent::NewBestScore(change.best_score));
        log::info!("New best score: {}", change.best_score);
    }
    change
}

fn push_score_changed(state: &mut GameState, change: ScoreChange) {
    state.events.push(GameEvent::ScoreChanged {
        score: change.score,
        best_score: change.best_score,
    });
}

/// Spawn one obstacle pair at the current speed
pub fn spawn_obstacles(state: &mut GameState) -> ObstaclePair {
    let speed = state.session.speed();
    state
        .spawner
        .spawn_obstacles(&mut state.arena, &state.tuning, speed, &mut state.rng)
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let tap = input.tap || (input.autopilot && autopilot_wants_tap(state));
    if tap {
        transition(state, StateEvent::Tap);
    }

    // Pausing the world freezes timers, motions, physics and animation together
    if state.physics.is_paused() {
        return;
    }

    state.time_ticks += 1;

    for action in state.scheduler.advance(dt) {
        match action {
            ScheduledAction::SpawnObstacles => {
                spawn_obstacles(state);
            }
            ScheduledAction::PauseWorld => {
                log::debug!("Startup pause");
                state.physics.pause();
            }
        }
    }
    if state.physics.is_paused() {
        return;
    }

    advance_motions(state, dt);

    let contacts = state.physics.step(&mut state.arena, dt);
    for contact in contacts {
        let Some((event, other)) = classify_contact(&contact) else {
            continue;
        };
        log::debug!(
            "Contact {:?} with {} {}",
            event,
            state.arena.get(other).map_or("entity", |e| e.kind.tag()),
            other
        );

        if event == StateEvent::OvercomeDetected {
            if state.phase != GamePhase::Playing {
                continue;
            }
            // A barrier counts once; its body goes with the first report
            match state.arena.get_mut(other) {
                Some(barrier) if barrier.body.is_some() => barrier.body = None,
                _ => continue,
            }
        }
        transition(state, event);
    }

    let texture = state.flap.advance(dt, state.tuning.flap_frame_time);
    if let Some(player) = state.player.and_then(|id| state.arena.get_mut(id)) {
        if player.texture != texture {
            player.texture = texture.to_string();
        }
    }
}

/// Move every entity with a motion and drop the ones that finished
fn advance_motions(state: &mut GameState, dt: f32) {
    let mut finished = false;
    for entity in state.arena.iter_mut() {
        if let Some(motion) = entity.motion.as_mut() {
            entity.pos = motion.advance(dt);
            finished |= motion.is_finished();
        }
    }
    if finished {
        state
            .arena
            .retain(|e| !e.motion.as_ref().is_some_and(|m| m.is_finished()));
    }
}

/// Demo controller: start runs, and flap whenever the player sinks below
/// the next gap while falling
fn autopilot_wants_tap(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Idle | GamePhase::Failed => true,
        GamePhase::Playing => {
            let Some(player) = state.player.and_then(|id| state.arena.get(id)) else {
                return false;
            };
            let velocity = player.body.as_ref().map_or(0.0, |b| b.velocity.y);
            let left_edge = player.pos.x - state.tuning.player_radius;

            let target = state
                .arena
                .iter()
                .filter(|e| e.kind == EntityKind::Barrier && e.body.is_some())
                .filter(|e| e.pos.x + e.size.x / 2.0 >= left_edge)
                .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
                .map_or(state.tuning.playfield_center_y(), |barrier| barrier.pos.y);

            player.pos.y < target - 6.0 && velocity < -10.0
        }
    }
}
