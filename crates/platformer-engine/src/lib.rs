pub mod api;
pub mod core;
pub mod components;
pub mod entities;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{
    CollisionConfig, EnemyConfig, FrameHandler, GameConfig, HazardConfig, PhysicsConfig,
    PlayerConfig, ProjectileConfig,
};
pub use api::types::{EntityId, EventKind, GameEvent, LevelBounds, Rect};
pub use assets::level::{LevelDescriptor, LevelError};
pub use assets::registry::SpriteRegistry;
pub use components::animation::PlayerAnimation;
pub use components::entity::{EntityKind, EntityRef};
pub use components::sprite::{AtlasId, SpriteComponent};
pub use crate::core::collision::{Actor, CollisionResolver, Contact, Resolution, Side, Solid};
pub use crate::core::physics::{Body, Integrator};
pub use crate::core::time::{ClockStats, FixedStepClock};
pub use crate::core::vector::{Vector2, VectorExt};
pub use crate::core::world::World;
pub use entities::enemy::Enemy;
pub use entities::hazard::{FallingState, HazardPhase, UppingState};
pub use entities::platform::{Platform, PlatformKind};
pub use entities::player::{JumpRejected, Player};
pub use entities::projectile::Projectile;
pub use entities::spawner::ProjectileSpawner;
pub use input::queue::{InputEvent, InputQueue};
pub use input::sampler::{InputSampler, Key};
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use renderer::traits::{Color, DrawContext};
