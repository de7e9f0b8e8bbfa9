//! Scene entities and the arena that owns them
//!
//! Entities are addressed by `EntityId`s that are never reused, so a stale
//! handle (e.g. to a removed player) simply fails to resolve.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::motion::Motion;

/// Stable entity handle
pub type EntityId = u32;

/// Texture shown while the player is not flapping
pub const PLAYER_IDLE_TEXTURE: &str = "bird";
/// Flap animation frames, played in order
pub const PLAYER_FLAP_TEXTURES: [&str; 3] = ["bird_flap_1", "bird_flap_2", "bird_flap_3"];

/// Scrolling background layers, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackgroundLayer {
    Sky,
    Clouds,
    Hills,
    Grass,
}

impl BackgroundLayer {
    pub const ALL: [BackgroundLayer; 4] = [
        BackgroundLayer::Sky,
        BackgroundLayer::Clouds,
        BackgroundLayer::Hills,
        BackgroundLayer::Grass,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BackgroundLayer::Sky => "sky",
            BackgroundLayer::Clouds => "clouds",
            BackgroundLayer::Hills => "hills",
            BackgroundLayer::Grass => "grass",
        }
    }

    /// Stacking order (higher draws on top). Grass covers the pipe bases.
    pub fn z_order(&self) -> i32 {
        match self {
            BackgroundLayer::Sky => -40,
            BackgroundLayer::Clouds => -30,
            BackgroundLayer::Hills => -20,
            BackgroundLayer::Grass => 10,
        }
    }

    /// Seconds to scroll one tile width at speed 1.0 (nearer = faster)
    pub fn scroll_duration(&self) -> f32 {
        match self {
            BackgroundLayer::Sky => 40.0,
            BackgroundLayer::Clouds => 24.0,
            BackgroundLayer::Hills => 14.0,
            BackgroundLayer::Grass => 6.0,
        }
    }
}

/// Z order of pipes and barriers
pub const OBSTACLE_Z: i32 = 0;
/// Z order of the player
pub const PLAYER_Z: i32 = 20;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Background(BackgroundLayer),
    Player,
    Pipe,
    /// Invisible pass detector between two pipes
    Barrier,
}

impl EntityKind {
    /// Scene-graph style name
    pub fn tag(&self) -> &'static str {
        match self {
            EntityKind::Background(layer) => layer.name(),
            EntityKind::Player => "bird",
            EntityKind::Pipe => "pipe",
            EntityKind::Barrier => "pipe_barrier",
        }
    }

    /// Whether the speed multiplier applies to this entity
    pub fn scrolls(&self) -> bool {
        !matches!(self, EntityKind::Player)
    }
}

/// A scene entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Centre position (origin bottom-left, y up)
    pub pos: Vec2,
    pub size: Vec2,
    pub z: i32,
    /// Rotation in radians
    pub rotation: f32,
    pub texture: String,
    pub visible: bool,
    pub body: Option<Body>,
    pub motion: Option<Motion>,
}

impl Entity {
    /// New visible entity without body or motion; the arena assigns the id
    pub fn new(kind: EntityKind, pos: Vec2, size: Vec2, texture: impl Into<String>) -> Self {
        Self {
            id: 0,
            kind,
            pos,
            size,
            z: 0,
            rotation: 0.0,
            texture: texture.into(),
            visible: true,
            body: None,
            motion: None,
        }
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.pos = motion.position();
        self.motion = Some(motion);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Current scroll speed, if this entity moves on its own
    pub fn speed(&self) -> Option<f32> {
        self.motion.as_ref().map(|m| m.speed)
    }
}

/// Owner of all live entities, kept sorted by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Arena {
    entities: Vec<Entity>,
    next_id: EntityId,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Take ownership of an entity and return its id
    pub fn insert(&mut self, mut entity: Entity) -> EntityId {
        // Default-constructed arenas start at 0; id 0 is never handed out
        self.next_id = self.next_id.max(1);
        let id = self.next_id;
        self.next_id += 1;
        entity.id = id;
        self.entities.push(entity);
        id
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let i = self.index_of(id)?;
        Some(&self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let i = self.index_of(id)?;
        Some(&mut self.entities[i])
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let i = self.index_of(id)?;
        Some(self.entities.remove(i))
    }

    /// Keep only entities matching the predicate
    pub fn retain(&mut self, f: impl FnMut(&Entity) -> bool) {
        self.entities.retain(f);
    }

    /// Remove every entity. Ids keep counting up.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of live entities of the given kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// Ids of live entities of the given kind, in id order
    pub fn ids_of(&self, kind: EntityKind) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe() -> Entity {
        Entity::new(EntityKind::Pipe, Vec2::ZERO, Vec2::new(10.0, 10.0), "pipe_green")
    }

    #[test]
    fn test_ids_are_stable_and_not_reused() {
        let mut arena = Arena::new();
        let a = arena.insert(pipe());
        let b = arena.insert(pipe());
        assert_ne!(a, b);

        arena.remove(a);
        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(b).map(|e| e.id), Some(b));

        arena.clear();
        let c = arena.insert(pipe());
        assert!(c > b);
    }

    #[test]
    fn test_default_arena_never_hands_out_zero() {
        let mut arena = Arena::default();
        assert_eq!(arena.insert(pipe()), 1);
    }

    #[test]
    fn test_count_by_kind() {
        let mut arena = Arena::new();
        arena.insert(pipe());
        arena.insert(pipe());
        arena.insert(Entity::new(
            EntityKind::Barrier,
            Vec2::ZERO,
            Vec2::ONE,
            "",
        ));
        assert_eq!(arena.count(EntityKind::Pipe), 2);
        assert_eq!(arena.count(EntityKind::Barrier), 1);
        assert_eq!(arena.ids_of(EntityKind::Pipe).len(), 2);
    }

    #[test]
    fn test_only_player_ignores_speed() {
        assert!(!EntityKind::Player.scrolls());
        assert!(EntityKind::Pipe.scrolls());
        assert!(EntityKind::Barrier.scrolls());
        assert!(EntityKind::Background(BackgroundLayer::Grass).scrolls());
    }

    #[test]
    fn test_tags() {
        assert_eq!(EntityKind::Player.tag(), "bird");
        assert_eq!(EntityKind::Barrier.tag(), "pipe_barrier");
        assert_eq!(
            EntityKind::Background(BackgroundLayer::Grass).tag(),
            BackgroundLayer::Grass.name()
        );
    }
}
