//! Rigid bodies and collision geometry
//!
//! Bodies carry three bitmasks, as in most 2D engines:
//! - `category`: what this body is
//! - `collision_mask`: categories that physically push this body
//! - `contact_mask`: categories that produce a contact report

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Category bits
pub mod category {
    pub const NONE: u32 = 0;
    pub const BIRD: u32 = 1 << 0;
    pub const PIPE: u32 = 1 << 1;
    pub const PIPE_BARRIER: u32 = 1 << 2;
    pub const GRASS: u32 = 1 << 3;
}

/// A single named category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Bird,
    Pipe,
    PipeBarrier,
    Grass,
}

impl Category {
    pub fn bits(&self) -> u32 {
        match self {
            Category::Bird => category::BIRD,
            Category::Pipe => category::PIPE,
            Category::PipeBarrier => category::PIPE_BARRIER,
            Category::Grass => category::GRASS,
        }
    }

    /// Exact match on a single category bit; `NONE` and mixed masks give `None`
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            category::BIRD => Some(Category::Bird),
            category::PIPE => Some(Category::Pipe),
            category::PIPE_BARRIER => Some(Category::PipeBarrier),
            category::GRASS => Some(Category::Grass),
            _ => None,
        }
    }
}

/// Body shape, centred on the entity position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { half_extents: Vec2 },
}

/// A rigid body attached to an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub shape: Shape,
    pub category: u32,
    pub collision_mask: u32,
    pub contact_mask: u32,
    /// Moved by the physics world (gravity, impulses, pushes)
    pub dynamic: bool,
    pub affected_by_gravity: bool,
    pub allows_rotation: bool,
    /// Horizontal velocity is held at zero
    pub lock_x: bool,
    pub velocity: Vec2,
    pub angular_velocity: f32,
}

impl Body {
    fn with_shape(shape: Shape) -> Self {
        Self {
            shape,
            category: category::NONE,
            collision_mask: category::NONE,
            contact_mask: category::NONE,
            dynamic: false,
            affected_by_gravity: false,
            allows_rotation: false,
            lock_x: false,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
        }
    }

    /// Static circle
    pub fn circle(radius: f32) -> Self {
        Self::with_shape(Shape::Circle { radius })
    }

    /// Static axis-aligned rectangle of the given full size
    pub fn rect(size: Vec2) -> Self {
        Self::with_shape(Shape::Rect {
            half_extents: size / 2.0,
        })
    }

    pub fn category(mut self, bits: u32) -> Self {
        self.category = bits;
        self
    }

    pub fn collides_with(mut self, bits: u32) -> Self {
        self.collision_mask = bits;
        self
    }

    pub fn reports_contact_with(mut self, bits: u32) -> Self {
        self.contact_mask = bits;
        self
    }

    /// Make the body simulated: gravity, rotation and horizontal pinning
    pub fn dynamic(mut self, gravity: bool, rotation: bool, lock_x: bool) -> Self {
        self.dynamic = true;
        self.affected_by_gravity = gravity;
        self.allows_rotation = rotation;
        self.lock_x = lock_x;
        self
    }

    /// Whether `other` physically pushes this body
    pub fn is_pushed_by(&self, other: &Body) -> bool {
        self.collision_mask & other.category != 0
    }

    /// Whether touching `other` produces a contact report
    pub fn reports_contact(&self, other: &Body) -> bool {
        self.contact_mask & other.category != 0 || other.contact_mask & self.category != 0
    }

    /// Add an instantaneous change in linear and angular velocity
    pub fn apply_impulse(&mut self, linear: Vec2, angular: f32) {
        self.velocity += linear;
        if self.allows_rotation {
            self.angular_velocity += angular;
        }
    }
}

/// Overlap between two shapes
#[derive(Debug, Clone, Copy)]
pub struct Penetration {
    /// Direction to push the first shape out of the second
    pub normal: Vec2,
    pub depth: f32,
}

/// Test two positioned shapes for overlap
pub fn overlap(a_pos: Vec2, a: &Shape, b_pos: Vec2, b: &Shape) -> Option<Penetration> {
    match (a, b) {
        (Shape::Circle { radius }, Shape::Rect { half_extents }) => {
            circle_rect(a_pos, *radius, b_pos, *half_extents)
        }
        (Shape::Rect { half_extents }, Shape::Circle { radius }) => {
            circle_rect(b_pos, *radius, a_pos, *half_extents).map(|p| Penetration {
                normal: -p.normal,
                depth: p.depth,
            })
        }
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            let delta = a_pos - b_pos;
            let dist = delta.length();
            let depth = ra + rb - dist;
            (depth > 0.0).then(|| Penetration {
                normal: if dist > f32::EPSILON { delta / dist } else { Vec2::Y },
                depth,
            })
        }
        (Shape::Rect { half_extents: ha }, Shape::Rect { half_extents: hb }) => {
            let delta = a_pos - b_pos;
            let overlap = *ha + *hb - delta.abs();
            if overlap.x <= 0.0 || overlap.y <= 0.0 {
                return None;
            }
            Some(if overlap.x < overlap.y {
                Penetration {
                    normal: Vec2::new(delta.x.signum(), 0.0),
                    depth: overlap.x,
                }
            } else {
                Penetration {
                    normal: Vec2::new(0.0, delta.y.signum()),
                    depth: overlap.y,
                }
            })
        }
    }
}

/// Circle vs axis-aligned rectangle. Normal points from the rect toward the circle.
fn circle_rect(center: Vec2, radius: f32, rect_pos: Vec2, half: Vec2) -> Option<Penetration> {
    let local = center - rect_pos;
    let closest = local.clamp(-half, half);

    if closest == local {
        // Centre inside the rect: push out through the nearest face
        let to_face = half - local.abs();
        return Some(if to_face.x < to_face.y {
            Penetration {
                normal: Vec2::new(local.x.signum(), 0.0),
                depth: to_face.x + radius,
            }
        } else {
            Penetration {
                normal: Vec2::new(0.0, local.y.signum()),
                depth: to_face.y + radius,
            }
        });
    }

    let delta = local - closest;
    let dist = delta.length();
    if dist >= radius {
        return None;
    }
    Some(Penetration {
        normal: delta / dist,
        depth: radius - dist,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_rejects_none_and_mixed() {
        for c in [
            Category::Bird,
            Category::Pipe,
            Category::PipeBarrier,
            Category::Grass,
        ] {
            assert_eq!(Category::from_bits(c.bits()), Some(c));
        }
        assert_eq!(Category::from_bits(category::NONE), None);
        assert_eq!(Category::from_bits(category::PIPE | category::GRASS), None);
    }

    #[test]
    fn test_contact_masks_are_either_way() {
        let bird = Body::circle(5.0)
            .category(category::BIRD)
            .reports_contact_with(category::PIPE);
        let pipe = Body::rect(Vec2::ONE).category(category::PIPE);
        assert!(bird.reports_contact(&pipe));
        assert!(pipe.reports_contact(&bird));

        let barrier = Body::rect(Vec2::ONE).category(category::PIPE_BARRIER);
        assert!(!bird.reports_contact(&barrier));
    }

    #[test]
    fn test_circle_resting_on_rect_top() {
        // Ground rect spanning y in [0, 20]; circle centre at y=25, radius 10
        let hit = overlap(
            Vec2::new(0.0, 25.0),
            &Shape::Circle { radius: 10.0 },
            Vec2::new(0.0, 10.0),
            &Shape::Rect {
                half_extents: Vec2::new(50.0, 10.0),
            },
        )
        .unwrap();
        assert!((hit.normal - Vec2::Y).length() < 1e-5);
        assert!((hit.depth - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_clear_of_rect() {
        let hit = overlap(
            Vec2::new(0.0, 31.0),
            &Shape::Circle { radius: 10.0 },
            Vec2::new(0.0, 10.0),
            &Shape::Rect {
                half_extents: Vec2::new(50.0, 10.0),
            },
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_circle_centre_inside_rect() {
        let hit = overlap(
            Vec2::new(8.0, 0.0),
            &Shape::Circle { radius: 2.0 },
            Vec2::ZERO,
            &Shape::Rect {
                half_extents: Vec2::new(10.0, 20.0),
            },
        )
        .unwrap();
        assert!((hit.normal - Vec2::X).length() < 1e-5);
        assert!((hit.depth - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_rect_circle_normal_flips() {
        let rect = Shape::Rect {
            half_extents: Vec2::new(5.0, 5.0),
        };
        let circle = Shape::Circle { radius: 3.0 };
        let hit = overlap(Vec2::ZERO, &rect, Vec2::new(0.0, 7.0), &circle).unwrap();
        assert!(hit.normal.y < 0.0);
    }

    #[test]
    fn test_impulse_respects_rotation_lock() {
        let mut body = Body::circle(1.0).dynamic(true, false, true);
        body.apply_impulse(Vec2::new(0.0, 10.0), 3.0);
        assert!((body.velocity.y - 10.0).abs() < f32::EPSILON);
        assert_eq!(body.angular_velocity, 0.0);
    }
}
