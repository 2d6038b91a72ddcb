use std::f32::consts::PI;

use glam::Vec2;

use crate::api::game::ProjectileConfig;
use crate::api::types::{EntityId, LevelBounds, Rect};
use crate::assets::registry::SpriteRegistry;
use crate::core::vector::{from_angle, VectorExt};
use crate::renderer::traits::{Color, DrawContext};

const PROJECTILE_COLOR: Color = Color::rgb(1.0, 0.8, 0.1);

/// Launch velocity for a projectile. A negative `direction` mirrors the
/// firing angle to `PI + angle`, which is also the angle the sprite is drawn
/// at, so the visual orientation follows the direction of travel.
pub fn launch_velocity(speed: f32, direction: f32, angle: f32) -> Vec2 {
    from_angle(firing_angle(direction, angle)) * speed
}

fn firing_angle(direction: f32, angle: f32) -> f32 {
    if direction > 0.0 {
        angle
    } else {
        PI + angle
    }
}

/// Fire-and-forget straight-line shot.
///
/// Velocity is fixed at spawn. There is no lifetime: a projectile goes
/// inactive on hitting a platform, after delivering damage once, or on leaving
/// the level. Inactive projectiles are inert; dropping them from the owning
/// collection is the owner's job.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    direction: f32,
    angle: f32,
    active: bool,
    can_deal_damage: bool,
    bounds_margin: f32,
    fall_margin: f32,
}

impl Projectile {
    pub fn new(
        id: EntityId,
        position: Vec2,
        direction: f32,
        angle: f32,
        speed: f32,
        config: &ProjectileConfig,
    ) -> Self {
        Self {
            id,
            position,
            velocity: launch_velocity(speed, direction, angle),
            size: Vec2::new(config.width, config.height),
            direction,
            angle,
            active: true,
            can_deal_damage: true,
            bounds_margin: config.bounds_margin,
            fall_margin: config.fall_margin,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn can_deal_damage(&self) -> bool {
        self.active && self.can_deal_damage
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Angle the sprite should be drawn at, radians.
    pub fn rotation(&self) -> f32 {
        firing_angle(self.direction, self.angle)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    pub fn update(&mut self, dt: f32, level: &LevelBounds) {
        if !self.active {
            return;
        }
        let velocity = self.velocity;
        self.position.add_scaled(velocity, dt);

        let b = self.bounds();
        let out = b.right() < -self.bounds_margin
            || b.left() > level.width + self.bounds_margin
            || b.bottom() < -self.bounds_margin
            || b.top() > level.height + self.fall_margin;
        if out {
            self.deactivate();
        }
    }

    /// Consume the one-shot damage. Returns `true` exactly once, and only
    /// while active; the projectile is spent afterwards.
    pub fn apply_damage(&mut self) -> bool {
        if !self.can_deal_damage() {
            return false;
        }
        self.can_deal_damage = false;
        self.deactivate();
        true
    }

    /// Stop at a platform.
    pub fn hit_platform(&mut self) {
        self.deactivate();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn render(&self, ctx: &mut dyn DrawContext, sprites: &SpriteRegistry) {
        if !self.active {
            return;
        }
        let rect = self.bounds();
        match sprites.get("projectile") {
            Some(sprite) => ctx.draw_sprite(sprite, rect, self.direction < 0.0),
            None => {
                log::trace!("projectile {}: no sprite, drawing rectangle", self.id.0);
                ctx.fill_rect(rect, PROJECTILE_COLOR);
            }
        }
    }

    pub fn debug_info(&self) -> String {
        format!(
            "projectile#{} pos=({:.1},{:.1}) vel=({:.1},{:.1}) active={} armed={}",
            self.id.0,
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y,
            self.active,
            self.can_deal_damage,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    const LEVEL: LevelBounds = LevelBounds::new(1000.0, 600.0);

    fn shot(direction: f32, angle: f32) -> Projectile {
        Projectile::new(
            EntityId(3),
            Vec2::new(100.0, 100.0),
            direction,
            angle,
            250.0,
            &ProjectileConfig::default(),
        )
    }

    #[test]
    fn rightward_shot_keeps_angle() {
        let p = shot(1.0, 0.0);
        assert_eq!(p.velocity, Vec2::new(250.0, 0.0));
        assert_eq!(p.rotation(), 0.0);
    }

    #[test]
    fn leftward_shot_mirrors_to_pi_plus_angle() {
        let p = shot(-1.0, 0.0);
        assert!((p.velocity.x + 250.0).abs() < 1e-3);
        assert!(p.velocity.y.abs() < 1e-3);
        assert_eq!(p.rotation(), PI);

        // The mirror is PI + angle, not PI - angle: a downward tilt fired
        // leftward travels up.
        let tilted = shot(-1.0, 0.5);
        assert!(tilted.velocity.x < 0.0);
        assert!(tilted.velocity.y < 0.0);
    }

    #[test]
    fn moves_in_a_straight_line() {
        let mut p = shot(1.0, 0.0);
        for _ in 0..60 {
            p.update(DT, &LEVEL);
        }
        assert!((p.position.x - 350.0).abs() < 1e-2);
        assert_eq!(p.position.y, 100.0);
        assert!(p.is_active());
    }

    #[test]
    fn damage_is_one_shot() {
        let mut p = shot(1.0, 0.0);
        assert!(p.apply_damage());
        assert!(!p.is_active());
        assert!(!p.apply_damage());
    }

    #[test]
    fn leaving_level_deactivates() {
        let mut p = shot(-1.0, 0.0);
        for _ in 0..120 {
            p.update(DT, &LEVEL);
        }
        assert!(!p.is_active());
        let x = p.position.x;
        p.update(DT, &LEVEL);
        assert_eq!(p.position.x, x, "inactive projectiles do not move");
    }

    #[test]
    fn downward_margin_is_generous() {
        let mut p = shot(1.0, PI / 2.0);
        p.position = Vec2::new(500.0, 900.0);
        p.update(DT, &LEVEL);
        assert!(p.is_active(), "still inside the fall margin");
        p.position.y = 1200.0;
        p.update(DT, &LEVEL);
        assert!(!p.is_active());
    }

    #[test]
    fn platform_hit_disarms() {
        let mut p = shot(1.0, 0.0);
        p.hit_platform();
        assert!(!p.can_deal_damage());
        assert!(!p.apply_damage());
    }
}
