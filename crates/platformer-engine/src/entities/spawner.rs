use glam::Vec2;

use crate::api::game::ProjectileConfig;
use crate::api::types::EntityId;
use crate::entities::projectile::Projectile;

/// Upper bound on shots from one spawner in one tick. Backlog past this is
/// dropped, so a tiny interval cannot flood the world.
pub const MAX_SHOTS_PER_TICK: u32 = 4;

/// Level-placed emitter that fires a projectile every `interval` seconds.
#[derive(Debug, Clone)]
pub struct ProjectileSpawner {
    pub id: EntityId,
    pub position: Vec2,
    pub direction: f32,
    pub angle: f32,
    pub speed: f32,
    pub interval: f32,
    timer: f32,
}

impl ProjectileSpawner {
    pub fn new(id: EntityId, position: Vec2, direction: f32, angle: f32, speed: f32, interval: f32) -> Self {
        Self {
            id,
            position,
            direction,
            angle,
            speed,
            interval,
            timer: 0.0,
        }
    }

    /// Advance the timer. Returns how many shots are due this tick, at most
    /// [`MAX_SHOTS_PER_TICK`]. A non-positive interval never fires.
    pub fn update(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.timer += dt;
        let mut due = 0;
        while self.timer >= self.interval && due < MAX_SHOTS_PER_TICK {
            self.timer -= self.interval;
            due += 1;
        }
        if self.timer >= self.interval {
            log::debug!("spawner {}: dropping shot backlog", self.id.0);
            self.timer %= self.interval;
        }
        due
    }

    pub fn fire(&self, id: EntityId, config: &ProjectileConfig) -> Projectile {
        Projectile::new(id, self.position, self.direction, self.angle, self.speed, config)
    }

    pub fn debug_info(&self) -> String {
        format!(
            "spawner#{} pos=({:.1},{:.1}) dir={} angle={:.2} every {:.2}s next in {:.2}s",
            self.id.0,
            self.position.x,
            self.position.y,
            self.direction,
            self.angle,
            self.interval,
            (self.interval - self.timer).max(0.0),
        )
    }
}
