pub mod enemy;
pub mod hazard;
pub mod platform;
pub mod player;
pub mod projectile;
pub mod spawner;
