//! Minimal physics world
//!
//! Integrates dynamic bodies under gravity, pushes them out of solid bodies
//! they collide with, and reports begin-contact events. Only dynamic vs
//! non-dynamic pairs are tested; this scene has a single dynamic body.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Shape, overlap};
use super::entity::{Arena, EntityId};

/// Two bodies started touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: EntityId,
    pub b: EntityId,
    pub category_a: u32,
    pub category_b: u32,
}

/// Static snapshot of a non-dynamic body for the narrow phase
struct Obstacle {
    id: EntityId,
    pos: Vec2,
    shape: Shape,
    body: Body,
}

/// Simulation parameters and contact bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsWorld {
    pub gravity: Vec2,
    /// Vertical speed cap for dynamic bodies
    pub max_vertical_speed: f32,
    /// Dynamic bodies are kept below this height
    pub ceiling: f32,
    paused: bool,
    /// Pairs touching at the end of the last step (lower id first)
    #[serde(skip)]
    touching: HashSet<(EntityId, EntityId)>,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2, max_vertical_speed: f32, ceiling: f32) -> Self {
        Self {
            gravity,
            max_vertical_speed,
            ceiling,
            paused: false,
            touching: HashSet::new(),
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Forget contact history (after the scene is cleared)
    pub fn reset_contacts(&mut self) {
        self.touching.clear();
    }

    /// Advance dynamic bodies by `dt` and return contacts that began this step
    pub fn step(&mut self, arena: &mut Arena, dt: f32) -> Vec<Contact> {
        if self.paused {
            return Vec::new();
        }

        let obstacles: Vec<Obstacle> = arena
            .iter()
            .filter_map(|e| {
                let body = e.body.as_ref()?;
                (!body.dynamic).then(|| Obstacle {
                    id: e.id,
                    pos: e.pos,
                    shape: body.shape,
                    body: body.clone(),
                })
            })
            .collect();

        let mut contacts = Vec::new();
        let mut touching = HashSet::new();

        for entity in arena.iter_mut() {
            let id = entity.id;
            let Some(body) = entity.body.as_mut() else {
                continue;
            };
            if !body.dynamic {
                continue;
            }

            // Integrate
            if body.affected_by_gravity {
                body.velocity += self.gravity * dt;
            }
            if body.lock_x {
                body.velocity.x = 0.0;
            }
            body.velocity.y = body
                .velocity
                .y
                .clamp(-self.max_vertical_speed, self.max_vertical_speed);
            entity.pos += body.velocity * dt;
            if body.allows_rotation {
                entity.rotation += body.angular_velocity * dt;
            }

            let radius = match body.shape {
                Shape::Circle { radius } => radius,
                Shape::Rect { half_extents } => half_extents.y,
            };
            if entity.pos.y + radius > self.ceiling {
                entity.pos.y = self.ceiling - radius;
                body.velocity.y = body.velocity.y.min(0.0);
            }

            // Narrow phase against every non-dynamic body, in id order
            for obstacle in &obstacles {
                let Some(hit) = overlap(entity.pos, &body.shape, obstacle.pos, &obstacle.shape)
                else {
                    continue;
                };

                if body.is_pushed_by(&obstacle.body) {
                    // Pinned bodies only ever move vertically
                    let normal = if body.lock_x {
                        Vec2::new(0.0, hit.normal.y)
                    } else {
                        hit.normal
                    };
                    entity.pos += normal * hit.depth;
                    let into = body.velocity.dot(normal);
                    if into < 0.0 {
                        body.velocity -= normal * into;
                    }
                }

                if body.reports_contact(&obstacle.body) {
                    let key = (id.min(obstacle.id), id.max(obstacle.id));
                    touching.insert(key);
                    if !self.touching.contains(&key) {
                        contacts.push(Contact {
                            a: id,
                            b: obstacle.id,
                            category_a: body.category,
                            category_b: obstacle.body.category,
                        });
                    }
                }
            }
        }

        self.touching = touching;
        contacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::category;
    use crate::sim::entity::{Entity, EntityKind};

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(Vec2::new(0.0, -400.0), 300.0, 200.0)
    }

    fn bird_at(arena: &mut Arena, y: f32) -> EntityId {
        arena.insert(
            Entity::new(EntityKind::Player, Vec2::new(50.0, y), Vec2::splat(20.0), "bird")
                .with_body(
                    Body::circle(10.0)
                        .category(category::BIRD)
                        .collides_with(category::GRASS)
                        .reports_contact_with(category::GRASS | category::PIPE_BARRIER)
                        .dynamic(true, true, true),
                ),
        )
    }

    fn ground(arena: &mut Arena) -> EntityId {
        arena.insert(
            Entity::new(
                EntityKind::Pipe,
                Vec2::new(100.0, 10.0),
                Vec2::new(200.0, 20.0),
                "grass",
            )
            .with_body(Body::rect(Vec2::new(200.0, 20.0)).category(category::GRASS)),
        )
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut arena = Arena::new();
        let bird = bird_at(&mut arena, 100.0);
        let mut world = world();
        world.step(&mut arena, 0.1);
        let body = arena.get(bird).unwrap().body.as_ref().unwrap();
        assert!(body.velocity.y < 0.0);
        assert!(arena.get(bird).unwrap().pos.y < 100.0);
    }

    #[test]
    fn test_paused_world_is_frozen() {
        let mut arena = Arena::new();
        let bird = bird_at(&mut arena, 100.0);
        let mut world = world();
        world.pause();
        assert!(world.step(&mut arena, 0.1).is_empty());
        assert_eq!(arena.get(bird).unwrap().pos.y, 100.0);
        world.resume();
        world.step(&mut arena, 0.1);
        assert!(arena.get(bird).unwrap().pos.y < 100.0);
    }

    #[test]
    fn test_ground_contact_begins_once() {
        let mut arena = Arena::new();
        let bird = bird_at(&mut arena, 29.0);
        let grass = ground(&mut arena);
        let mut world = world();

        let contacts = world.step(&mut arena, 1.0 / 60.0);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].a, bird);
        assert_eq!(contacts[0].b, grass);
        assert_eq!(contacts[0].category_b, category::GRASS);

        // Still resting on the ground: no new contact
        for _ in 0..10 {
            assert!(world.step(&mut arena, 1.0 / 60.0).is_empty());
        }
        // Pushed out, never sinks through
        assert!(arena.get(bird).unwrap().pos.y >= 29.0);
    }

    #[test]
    fn test_horizontal_lock_and_ceiling() {
        let mut arena = Arena::new();
        let bird = bird_at(&mut arena, 185.0);
        arena
            .get_mut(bird)
            .unwrap()
            .body
            .as_mut()
            .unwrap()
            .velocity = Vec2::new(40.0, 250.0);
        let mut world = world();
        world.step(&mut arena, 0.1);
        let e = arena.get(bird).unwrap();
        assert_eq!(e.pos.x, 50.0);
        assert!(e.pos.y <= 190.0 + 1e-4);
    }

    #[test]
    fn test_side_hit_keeps_pinned_x() {
        let mut arena = Arena::new();
        let bird = arena.insert(
            Entity::new(EntityKind::Player, Vec2::new(50.0, 100.0), Vec2::splat(20.0), "bird")
                .with_body(
                    Body::circle(10.0)
                        .category(category::BIRD)
                        .collides_with(category::PIPE)
                        .reports_contact_with(category::PIPE)
                        .dynamic(false, true, true),
                ),
        );
        // Pipe face overlaps the bird's right side by 3 points
        let pipe = arena.insert(
            Entity::new(
                EntityKind::Pipe,
                Vec2::new(72.0, 100.0),
                Vec2::new(30.0, 200.0),
                "pipe_green",
            )
            .with_body(Body::rect(Vec2::new(30.0, 200.0)).category(category::PIPE)),
        );
        let mut world = world();

        let contacts = world.step(&mut arena, 1.0 / 60.0);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].b, pipe);
        assert_eq!(arena.get(bird).unwrap().pos.x, 50.0);
    }
}
