use glam::Vec2;

use crate::api::game::EnemyConfig;
use crate::api::types::{EntityId, Rect};
use crate::assets::registry::SpriteRegistry;
use crate::core::collision::{Actor, Solid};
use crate::core::physics::{Body, Integrator};
use crate::renderer::traits::{Color, DrawContext};

const ENEMY_COLOR: Color = Color::rgb(0.9, 0.2, 0.2);

/// A hostile that walks back and forth between two fixed x-bounds.
///
/// `position.x` is the left edge. The walkable range is
/// `[patrol_start, patrol_end - width]`, so the whole body stays inside the
/// patrol interval and the turnaround at either end happens exactly on the
/// bound.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub body: Body,
    pub size: Vec2,
    patrol_start: f32,
    patrol_end: f32,
    /// -1 or 1.
    direction: f32,
    alive: bool,
    can_be_eliminated: bool,
    speed: f32,
    edge_probe: f32,
}

impl Enemy {
    /// Spawn at `position`; the patrol interval is centered on `position.x`.
    pub fn new(id: EntityId, position: Vec2, patrol_distance: f32, config: &EnemyConfig) -> Self {
        let half = patrol_distance * 0.5;
        Self {
            id,
            body: Body::new(position),
            size: Vec2::new(config.width, config.height),
            patrol_start: position.x - half,
            patrol_end: position.x + half,
            direction: 1.0,
            alive: true,
            can_be_eliminated: true,
            speed: config.speed,
            edge_probe: config.edge_probe,
        }
    }

    pub fn with_direction(mut self, direction: f32) -> Self {
        self.direction = if direction < 0.0 { -1.0 } else { 1.0 };
        self
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn patrol_bounds(&self) -> (f32, f32) {
        (self.patrol_start, self.patrol_end)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn can_be_eliminated(&self) -> bool {
        self.can_be_eliminated
    }

    pub fn is_grounded(&self) -> bool {
        self.body.on_ground
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.body.position, self.size)
    }

    fn max_x(&self) -> f32 {
        (self.patrol_end - self.size.x).max(self.patrol_start)
    }

    pub fn update(&mut self, dt: f32, integrator: &Integrator) {
        if !self.alive {
            return;
        }

        self.body.velocity.x = self.direction * self.speed;
        let next_x = self.body.position.x + self.body.velocity.x * dt;
        let max_x = self.max_x();
        if next_x <= self.patrol_start {
            self.body.position.x = self.patrol_start;
            self.direction = 1.0;
        } else if next_x >= max_x {
            self.body.position.x = max_x;
            self.direction = -1.0;
        } else {
            self.body.position.x = next_x;
        }
        self.body.velocity.x = self.direction * self.speed;

        integrator.apply_gravity(&mut self.body.velocity, self.body.gravity_scale, dt);
        self.body.position.y += self.body.velocity.y * dt;
        self.body.on_ground = false;
    }

    /// Turn around if there is no ground just ahead of the leading foot.
    /// Returns `true` if the direction flipped. Only meaningful while grounded.
    pub fn check_platform_edge<S: Solid>(&mut self, solids: &[S]) -> bool {
        if !self.alive || !self.body.on_ground {
            return false;
        }
        let b = self.bounds();
        let probe_x = if self.direction > 0.0 {
            b.right() + self.edge_probe
        } else {
            b.left() - self.edge_probe
        };
        let probe = Vec2::new(probe_x, b.bottom() + self.edge_probe);
        let supported = solids
            .iter()
            .any(|s| s.can_collide() && s.bounds().contains_point(probe));
        if supported {
            return false;
        }
        self.direction = -self.direction;
        self.body.velocity.x = self.direction * self.speed;
        true
    }

    /// Permanently kill this enemy. Returns `false` if it was already dead.
    pub fn eliminate(&mut self) -> bool {
        if !self.can_be_eliminated {
            return false;
        }
        self.can_be_eliminated = false;
        self.alive = false;
        self.body.velocity = Vec2::ZERO;
        log::debug!("enemy {} eliminated", self.id.0);
        true
    }

    pub fn render(&self, ctx: &mut dyn DrawContext, sprites: &SpriteRegistry) {
        if !self.alive {
            return;
        }
        let rect = self.bounds();
        match sprites.get("enemy") {
            Some(sprite) => ctx.draw_sprite(sprite, rect, self.direction < 0.0),
            None => {
                log::trace!("enemy {}: no sprite, drawing rectangle", self.id.0);
                ctx.fill_rect(rect, ENEMY_COLOR);
            }
        }
    }

    pub fn debug_info(&self) -> String {
        format!(
            "enemy#{} pos=({:.1},{:.1}) dir={} patrol=[{:.1},{:.1}] alive={} grounded={}",
            self.id.0,
            self.body.position.x,
            self.body.position.y,
            self.direction,
            self.patrol_start,
            self.patrol_end,
            self.alive,
            self.body.on_ground,
        )
    }
}

impl Actor for Enemy {
    fn bounds(&self) -> Rect {
        Enemy::bounds(self)
    }

    fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    fn set_x(&mut self, x: f32) {
        self.body.position.x = x;
    }

    fn set_y(&mut self, y: f32) {
        self.body.position.y = y;
    }

    fn stop_x(&mut self) {
        self.body.velocity.x = 0.0;
    }

    fn stop_y(&mut self) {
        self.body.velocity.y = 0.0;
    }

    fn land(&mut self) {
        self.body.on_ground = true;
    }
}
