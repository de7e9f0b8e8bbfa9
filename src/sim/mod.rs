//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, storage or platform dependencies

pub mod body;
pub mod collision;
pub mod entity;
pub mod motion;
pub mod physics;
pub mod schedule;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use body::{Body, Category, Shape, category};
pub use collision::{classify, classify_contact};
pub use entity::{Arena, BackgroundLayer, Entity, EntityId, EntityKind};
pub use motion::{Motion, MotionKind};
pub use physics::{Contact, PhysicsWorld};
pub use schedule::{ScheduledAction, Scheduler};
pub use session::{GameSession, ScoreChange, speed_for};
pub use spawner::{ObstaclePair, PipeVariant, Spawner, apply_speed};
pub use state::{FlapAnimation, GameEvent, GamePhase, GameState, StateEvent};
pub use tick::{TickInput, flap, increment_score, reload, tick, transition};
