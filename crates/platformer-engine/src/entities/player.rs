//! The controllable actor.
//!
//! Grounded movement sets horizontal speed directly; airborne movement only
//! nudges it with bounded acceleration. A jump is honored while grounded or
//! for `coyote_time` seconds after walking off a ledge, and the grace window
//! is consumed by the jump.

use glam::Vec2;

use crate::api::game::PlayerConfig;
use crate::api::types::{EntityId, Rect};
use crate::assets::registry::SpriteRegistry;
use crate::components::animation::PlayerAnimation;
use crate::core::collision::Actor;
use crate::core::physics::{Body, Integrator};
use crate::core::vector::sign_or_zero;
use crate::renderer::traits::{Color, DrawContext};

const PLAYER_COLOR: Color = Color::rgb(0.2, 0.6, 1.0);

/// Absorbs float drift in the summed tick durations so the grace window
/// closes on the tick that reaches `coyote_time`.
const GRACE_EPSILON: f32 = 1e-4;

/// Why a jump request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpRejected {
    /// Airborne and the grace window has expired or was already used.
    NotGrounded,
    /// The previous jump has not landed yet.
    AlreadyJumping,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    pub size: Vec2,
    grounded: bool,
    jumping: bool,
    /// Seconds since the actor last stood on something.
    time_since_grounded: f32,
    /// Whether the current airborne stretch may still use the grace window.
    coyote_available: bool,
    /// -1, 0 or 1: direction held when the current jump started.
    jump_direction: f32,
    /// -1 or 1.
    facing: f32,
    /// Set by a move call this tick; suppresses friction.
    steering: bool,
    animation: PlayerAnimation,
    config: PlayerConfig,
}

impl Player {
    pub fn new(id: EntityId, position: Vec2, config: PlayerConfig) -> Self {
        Self {
            id,
            body: Body::new(position),
            size: Vec2::new(config.width, config.height),
            grounded: false,
            jumping: false,
            time_since_grounded: 0.0,
            coyote_available: false,
            jump_direction: 0.0,
            facing: 1.0,
            steering: false,
            animation: PlayerAnimation::Idle,
            config,
        }
    }

    // -- State accessors --

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn jump_direction(&self) -> f32 {
        self.jump_direction
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn time_since_grounded(&self) -> f32 {
        self.time_since_grounded
    }

    pub fn animation(&self) -> PlayerAnimation {
        self.animation
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.body.position, self.size)
    }

    // -- Input-driven motion --

    pub fn move_left(&mut self, dt: f32) {
        self.steer(-1.0, dt);
    }

    pub fn move_right(&mut self, dt: f32) {
        self.steer(1.0, dt);
    }

    fn steer(&mut self, direction: f32, dt: f32) {
        self.steering = true;
        self.facing = direction;

        if self.grounded {
            self.body.velocity.x = direction * self.config.max_speed;
            return;
        }

        let vx = self.body.velocity.x;
        let cap = self.config.max_speed * self.config.air_control_cap;
        // Already at or past the cap in this direction (e.g. after a
        // directional jump): keep the momentum, add nothing.
        if vx * direction >= cap {
            return;
        }
        let against = vx != 0.0 && sign_or_zero(vx) != direction;
        let accel = if against {
            self.config.air_decel
        } else {
            self.config.air_accel
        };
        let next = vx + direction * accel * dt;
        self.body.velocity.x = if next * direction > cap {
            direction * cap
        } else {
            next
        };
    }

    /// Try to jump. `input_direction` is -1, 0 or 1.
    pub fn jump(&mut self, input_direction: f32) -> Result<(), JumpRejected> {
        let in_grace = self.coyote_available
            && self.time_since_grounded < self.config.coyote_time - GRACE_EPSILON;
        if !self.grounded {
            if self.jumping {
                log::debug!("player {}: jump rejected, already jumping", self.id.0);
                return Err(JumpRejected::AlreadyJumping);
            }
            if !in_grace {
                log::debug!(
                    "player {}: jump rejected, airborne for {:.3}s",
                    self.id.0,
                    self.time_since_grounded
                );
                return Err(JumpRejected::NotGrounded);
            }
        }

        self.body.velocity.y = -self.config.jump_power;
        let direction = sign_or_zero(input_direction);
        if direction != 0.0 {
            self.body.velocity.x = direction * self.config.directional_jump_speed;
            self.facing = direction;
        } else {
            self.body.velocity.x *= self.config.neutral_jump_damping;
        }
        self.jump_direction = direction;
        self.grounded = false;
        self.body.on_ground = false;
        self.jumping = true;
        self.coyote_available = false;
        Ok(())
    }

    /// Bounce upward off an enemy. Counts as a fresh jump.
    pub fn bounce(&mut self) {
        self.body.velocity.y = -self.config.jump_power * self.config.stomp_bounce;
        self.grounded = false;
        self.body.on_ground = false;
        self.jumping = true;
        self.coyote_available = false;
    }

    // -- Per-tick update --

    /// Count this tick against the coyote window. Runs at the start of a
    /// tick, before input, so a jump pressed `k` ticks after leaving the
    /// ground sees `k * dt` of elapsed time.
    pub fn advance_grace(&mut self, dt: f32) {
        if !self.grounded {
            self.time_since_grounded += dt;
        }
    }

    /// Friction, gravity and integration for one tick.
    pub fn update(&mut self, dt: f32, integrator: &Integrator) {
        if !self.steering {
            let friction = if self.grounded {
                self.config.ground_friction
            } else {
                self.config.air_friction
            };
            self.body.velocity.x *= friction;
        }
        if self.body.velocity.x.abs() < self.config.stop_epsilon {
            self.body.velocity.x = 0.0;
        }
        self.steering = false;

        integrator.integrate(&mut self.body, dt);
        self.refresh_animation();
    }

    /// Record the result of this tick's ground detection.
    /// Returns `true` when the actor just landed.
    pub fn set_grounded(&mut self, grounded: bool) -> bool {
        let landed = grounded && !self.grounded;
        if grounded {
            self.time_since_grounded = 0.0;
            self.coyote_available = true;
            if self.jumping {
                self.jumping = false;
                self.jump_direction = 0.0;
            }
        } else if self.grounded {
            // Leaving the ground: the grace window starts now.
            self.time_since_grounded = 0.0;
        }
        self.grounded = grounded;
        self.body.on_ground = grounded;
        self.refresh_animation();
        landed
    }

    /// Keep the actor inside the horizontal level extents.
    pub fn clamp_x(&mut self, min_x: f32, max_x: f32) {
        let limit = (max_x - self.size.x).max(min_x);
        let x = self.body.position.x.clamp(min_x, limit);
        if x != self.body.position.x {
            self.body.position.x = x;
            self.body.velocity.x = 0.0;
        }
    }

    /// Put the actor back at `spawn` with every motion flag cleared.
    pub fn respawn(&mut self, spawn: Vec2) {
        Integrator::teleport(&mut self.body, spawn);
        self.grounded = false;
        self.body.on_ground = false;
        self.jumping = false;
        self.jump_direction = 0.0;
        self.coyote_available = false;
        self.time_since_grounded = 0.0;
        self.steering = false;
        self.refresh_animation();
    }

    fn refresh_animation(&mut self) {
        self.animation = PlayerAnimation::derive(
            self.grounded,
            self.body.velocity,
            self.config.stop_epsilon,
        );
    }

    // -- Output --

    pub fn render(&self, ctx: &mut dyn DrawContext, sprites: &SpriteRegistry) {
        let rect = self.bounds();
        match sprites.get(self.animation.sprite_name()) {
            Some(sprite) => ctx.draw_sprite(sprite, rect, self.facing < 0.0),
            None => {
                log::trace!("player: no sprite {:?}, drawing rectangle", self.animation.sprite_name());
                ctx.fill_rect(rect, PLAYER_COLOR);
            }
        }
    }

    pub fn debug_info(&self) -> String {
        format!(
            "player#{} pos=({:.1},{:.1}) vel=({:.1},{:.1}) grounded={} jumping={} jump_dir={} facing={} air={:.2}s anim={:?}",
            self.id.0,
            self.body.position.x,
            self.body.position.y,
            self.body.velocity.x,
            self.body.velocity.y,
            self.grounded,
            self.jumping,
            self.jump_direction,
            self.facing,
            self.time_since_grounded,
            self.animation,
        )
    }
}

impl Actor for Player {
    fn bounds(&self) -> Rect {
        Player::bounds(self)
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
        self.set_grounded(true);
    }
}
