use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Axis-aligned rectangle in world units. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Strict overlap test. Shapes must interpenetrate by more than `tolerance`
    /// on both axes, so rectangles that merely touch do not count.
    pub fn overlaps(&self, other: &Rect, tolerance: f32) -> bool {
        self.left() < other.right() - tolerance
            && self.right() > other.left() + tolerance
            && self.top() < other.bottom() - tolerance
            && self.bottom() > other.top() + tolerance
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// Extents of the playable area, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelBounds {
    pub width: f32,
    pub height: f32,
}

impl LevelBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Kinds of game events reported to the host after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EventKind {
    PlayerJumped = 1,
    PlayerLanded = 2,
    PlayerHit = 3,
    PlayerRespawned = 4,
    EnemyEliminated = 5,
    ProjectileFired = 6,
    PlatformTriggered = 7,
    LevelComplete = 8,
}

/// A game event communicated from the simulation to the host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: EventKind, a: f32, b: f32, c: f32) -> Self {
        Self {
            kind: kind as u32 as f32,
            a,
            b,
            c,
        }
    }

    /// Event located at a world position (payload `a`, `b`).
    pub fn at(kind: EventKind, pos: Vec2) -> Self {
        Self::new(kind, pos.x, pos.y, 0.0)
    }

    /// Event about a specific entity (payload `c` carries the id).
    pub fn for_entity(kind: EventKind, id: EntityId, pos: Vec2) -> Self {
        Self::new(kind, pos.x, pos.y, id.0 as f32)
    }

    pub fn is(&self, kind: EventKind) -> bool {
        self.kind == kind as u32 as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b, 0.01));
        let c = Rect::new(9.5, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&c, 0.01));
    }

    #[test]
    fn tolerance_filters_float_adjacency() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.995, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b, 0.01));
        assert!(a.overlaps(&b, 0.0));
    }

    #[test]
    fn game_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), 16);
        let ev = GameEvent::at(EventKind::LevelComplete, Vec2::new(3.0, 4.0));
        assert!(ev.is(EventKind::LevelComplete));
        assert!(!ev.is(EventKind::PlayerHit));
        assert_eq!(ev.a, 3.0);
    }
}
