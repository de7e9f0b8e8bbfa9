//! Entity spawning: background tiles, the player and obstacle pairs

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Body, category};
use super::entity::{
    Arena, BackgroundLayer, Entity, EntityId, EntityKind, OBSTACLE_Z, PLAYER_IDLE_TEXTURE,
    PLAYER_Z,
};
use super::motion::Motion;
use crate::tuning::Tuning;

/// Tiles per background layer
pub const TILES_PER_LAYER: usize = 3;

/// Pipe artwork variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipeVariant {
    Green,
    Red,
}

impl PipeVariant {
    pub const ALL: [PipeVariant; 2] = [PipeVariant::Green, PipeVariant::Red];

    pub fn texture(&self) -> &'static str {
        match self {
            PipeVariant::Green => "pipe_green",
            PipeVariant::Red => "pipe_red",
        }
    }
}

/// Entities created by one obstacle spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstaclePair {
    pub top: EntityId,
    pub bottom: EntityId,
    pub barrier: EntityId,
    pub variant: PipeVariant,
    /// Vertical drift of the gap centre from the playfield centre
    pub offset: f32,
    /// Vertical distance between the two pipes
    pub gap: f32,
}

/// Spawn state that carries over between obstacle spawns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Sign of the next gap offset
    next_offset_positive: bool,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            next_offset_positive: true,
        }
    }

    /// Start the offset pattern over from +
    pub fn reset(&mut self) {
        self.next_offset_positive = true;
    }

    /// Spawn every background layer as a strip of looping tiles
    pub fn spawn_background(&self, arena: &mut Arena, tuning: &Tuning, speed: f32) {
        let tile_width = tuning.scene_height;
        for layer in BackgroundLayer::ALL {
            let is_ground = layer == BackgroundLayer::Grass;
            let tile_height = if is_ground {
                tuning.ground_height
            } else {
                tuning.scene_height
            };
            let size = Vec2::new(tile_width, tile_height);

            for i in 0..TILES_PER_LAYER {
                let start = Vec2::new(tile_width / 2.0 + i as f32 * tile_width, tile_height / 2.0);
                let end = start - Vec2::new(tile_width, 0.0);
                let motion =
                    Motion::looping(start, end, layer.scroll_duration()).with_speed(speed);

                let mut tile = Entity::new(EntityKind::Background(layer), start, size, layer.name())
                    .with_z(layer.z_order())
                    .with_motion(motion);
                if is_ground {
                    tile = tile.with_body(
                        Body::rect(size)
                            .category(category::GRASS)
                            .reports_contact_with(category::BIRD),
                    );
                }
                arena.insert(tile);
            }
        }
        log::debug!(
            "Spawned {} background tiles",
            BackgroundLayer::ALL.len() * TILES_PER_LAYER
        );
    }

    /// Spawn the player, removing any previous one first
    pub fn spawn_player(&self, arena: &mut Arena, tuning: &Tuning) -> EntityId {
        arena.retain(|e| e.kind != EntityKind::Player);

        let radius = tuning.player_radius;
        let pos = Vec2::new(tuning.player_x(), tuning.playfield_center_y());
        let body = Body::circle(radius)
            .category(category::BIRD)
            .collides_with(category::PIPE | category::GRASS)
            .reports_contact_with(category::PIPE | category::GRASS | category::PIPE_BARRIER)
            .dynamic(true, true, true);

        arena.insert(
            Entity::new(
                EntityKind::Player,
                pos,
                Vec2::splat(radius * 2.0),
                PLAYER_IDLE_TEXTURE,
            )
            .with_z(PLAYER_Z)
            .with_body(body),
        )
    }

    /// Spawn a top pipe, a flipped bottom pipe and the barrier between them
    pub fn spawn_obstacles<R: Rng>(
        &mut self,
        arena: &mut Arena,
        tuning: &Tuning,
        speed: f32,
        rng: &mut R,
    ) -> ObstaclePair {
        let variant = PipeVariant::ALL[rng.random_range(0..PipeVariant::ALL.len())];

        let magnitude = rng.random_range(0.0..=tuning.max_gap_offset);
        let offset = if self.next_offset_positive {
            magnitude
        } else {
            -magnitude
        };
        self.next_offset_positive = !self.next_offset_positive;

        let gap = rng.random_range(tuning.gap_min..=tuning.gap_max);
        let gap_center = tuning.playfield_center_y() + offset;

        let pipe_size = Vec2::new(tuning.pipe_width, tuning.pipe_height);
        let [inset_w, inset_h] = tuning.pipe_body_inset;
        let body_size = pipe_size * Vec2::new(inset_w, inset_h);
        let start_x = tuning.scene_width + tuning.pipe_width / 2.0;
        let end_x = -tuning.pipe_width / 2.0;
        let duration = tuning.pipe_crossing_duration;

        let pipe = |y: f32, rotation: f32| {
            let motion = Motion::once(Vec2::new(start_x, y), Vec2::new(end_x, y), duration)
                .with_speed(speed);
            Entity::new(EntityKind::Pipe, Vec2::new(start_x, y), pipe_size, variant.texture())
                .with_z(OBSTACLE_Z)
                .with_rotation(rotation)
                .with_motion(motion)
                .with_body(
                    Body::rect(body_size)
                        .category(category::PIPE)
                        .collides_with(category::BIRD)
                        .reports_contact_with(category::BIRD),
                )
        };

        let top_y = gap_center + gap / 2.0 + tuning.pipe_height / 2.0;
        let bottom_y = gap_center - gap / 2.0 - tuning.pipe_height / 2.0;
        let top = arena.insert(pipe(top_y, 0.0));
        let bottom = arena.insert(pipe(bottom_y, PI));

        let barrier_size = Vec2::new(tuning.barrier_width, gap);
        let barrier_start = Vec2::new(start_x + tuning.barrier_offset_x, gap_center);
        let barrier_end = Vec2::new(end_x + tuning.barrier_offset_x, gap_center);
        let barrier = arena.insert(
            Entity::new(EntityKind::Barrier, barrier_start, barrier_size, "")
                .with_z(OBSTACLE_Z)
                .with_motion(Motion::once(barrier_start, barrier_end, duration).with_speed(speed))
                .with_body(
                    Body::rect(barrier_size)
                        .category(category::PIPE_BARRIER)
                        .reports_contact_with(category::BIRD),
                )
                .hidden(),
        );

        log::debug!(
            "Spawned {:?} pipes: offset={:.1} gap={:.1} speed={:.2}",
            variant,
            offset,
            gap,
            speed
        );

        ObstaclePair {
            top,
            bottom,
            barrier,
            variant,
            offset,
            gap,
        }
    }
}

/// Set the speed of every live scrolling entity
pub fn apply_speed(arena: &mut Arena, speed: f32) {
    for entity in arena.iter_mut() {
        if !entity.kind.scrolls() {
            continue;
        }
        if let Some(motion) = entity.motion.as_mut() {
            motion.speed = speed;
        }
    }
}
