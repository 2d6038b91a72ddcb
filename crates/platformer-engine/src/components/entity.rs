use serde::Serialize;

use crate::api::game::HazardConfig;
use crate::api::types::{EntityId, Rect};
use crate::assets::registry::SpriteRegistry;
use crate::entities::enemy::Enemy;
use crate::entities::platform::{Platform, PlatformKind};
use crate::entities::player::Player;
use crate::entities::projectile::Projectile;
use crate::renderer::traits::DrawContext;

/// Entity type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
    Platform(PlatformKind),
}

/// Borrowed view over any world entity, giving every kind the same small
/// capability set: identity, bounds, render and a debug dump.
#[derive(Clone, Copy)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Enemy(&'a Enemy),
    Projectile(&'a Projectile),
    Platform(&'a Platform),
}

impl<'a> EntityRef<'a> {
    pub fn id(&self) -> EntityId {
        match self {
            EntityRef::Player(p) => p.id,
            EntityRef::Enemy(e) => e.id,
            EntityRef::Projectile(p) => p.id,
            EntityRef::Platform(p) => p.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Player(_) => EntityKind::Player,
            EntityRef::Enemy(_) => EntityKind::Enemy,
            EntityRef::Projectile(_) => EntityKind::Projectile,
            EntityRef::Platform(p) => EntityKind::Platform(p.kind()),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            EntityRef::Player(p) => p.bounds(),
            EntityRef::Enemy(e) => e.bounds(),
            EntityRef::Projectile(p) => p.bounds(),
            EntityRef::Platform(p) => p.bounds(),
        }
    }

    /// Whether the entity currently takes part in the simulation.
    pub fn is_live(&self) -> bool {
        match self {
            EntityRef::Player(_) => true,
            EntityRef::Enemy(e) => e.is_alive(),
            EntityRef::Projectile(p) => p.is_active(),
            EntityRef::Platform(p) => p.can_collide(),
        }
    }

    pub fn render(&self, ctx: &mut dyn DrawContext, sprites: &SpriteRegistry, hazard: &HazardConfig) {
        match self {
            EntityRef::Player(p) => p.render(ctx, sprites),
            EntityRef::Enemy(e) => e.render(ctx, sprites),
            EntityRef::Projectile(p) => p.render(ctx, sprites),
            EntityRef::Platform(p) => p.render(ctx, sprites, hazard),
        }
    }

    pub fn debug_info(&self) -> String {
        match self {
            EntityRef::Player(p) => p.debug_info(),
            EntityRef::Enemy(e) => e.debug_info(),
            EntityRef::Projectile(p) => p.debug_info(),
            EntityRef::Platform(p) => p.debug_info(),
        }
    }
}
