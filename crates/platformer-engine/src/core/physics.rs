use glam::Vec2;

use crate::api::game::PhysicsConfig;
use crate::core::vector::VectorExt;

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

/// Point-mass state integrated each step. Owned by exactly one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Accumulated acceleration for the current step; cleared by `integrate`.
    pub acceleration: Vec2,
    pub mass: f32,
    pub gravity_scale: f32,
    pub is_static: bool,
    pub on_ground: bool,
}

impl Body {
    /// A dynamic body at rest.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass: 1.0,
            gravity_scale: 1.0,
            is_static: false,
            on_ground: false,
        }
    }

    /// A body that `integrate` never moves.
    pub fn fixed(position: Vec2) -> Self {
        Self {
            is_static: true,
            gravity_scale: 0.0,
            ..Self::new(position)
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }
}

// ---------------------------------------------------------------------------
// Integrator
// ---------------------------------------------------------------------------

/// Semi-implicit Euler integration with gravity, linear drag and a
/// terminal fall speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    gravity: f32,
    air_resistance: f32,
    terminal_velocity: f32,
}

impl Integrator {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            gravity: config.gravity,
            air_resistance: config.air_resistance,
            terminal_velocity: config.terminal_velocity,
        }
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn terminal_velocity(&self) -> f32 {
        self.terminal_velocity
    }

    /// Advance `body` by `dt`. No-op for static bodies.
    ///
    /// Velocity is updated before position, and `velocity.y` is clamped to
    /// the terminal velocity before it moves the body.
    pub fn integrate(&self, body: &mut Body, dt: f32) {
        if body.is_static {
            return;
        }

        body.acceleration.y += self.gravity * body.gravity_scale;
        let drag = body.velocity * -self.air_resistance;
        body.acceleration += drag;

        let acceleration = body.acceleration;
        body.velocity.add_scaled(acceleration, dt);
        body.velocity.y = self.clamp_fall(body.velocity.y);

        let velocity = body.velocity;
        body.position.add_scaled(velocity, dt);

        body.acceleration = Vec2::ZERO;
    }

    /// Gravity only, for entities that move themselves along X but fall like
    /// any other body. Same constant, scale and terminal clamp as `integrate`.
    pub fn apply_gravity(&self, velocity: &mut Vec2, gravity_scale: f32, dt: f32) {
        velocity.y = self.clamp_fall(velocity.y + self.gravity * gravity_scale * dt);
    }

    pub fn clamp_fall(&self, vy: f32) -> f32 {
        vy.min(self.terminal_velocity)
    }

    /// Instantaneous change in velocity: `impulse / mass`.
    /// Mass must be positive; this is not checked.
    pub fn apply_impulse(body: &mut Body, impulse: Vec2) {
        body.velocity += impulse / body.mass;
    }

    /// Add `force / mass` to the acceleration used by the next `integrate`.
    /// The argument is a force; with the default unit mass it is also the
    /// acceleration added.
    pub fn apply_force(body: &mut Body, force: Vec2) {
        body.acceleration += force / body.mass;
    }

    /// `velocity *= 1 - factor`.
    pub fn apply_damping(body: &mut Body, factor: f32) {
        body.velocity.scale_mut(1.0 - factor);
    }

    /// Hard position set with all motion cleared.
    pub fn teleport(body: &mut Body, position: Vec2) {
        body.position = position;
        body.velocity = Vec2::ZERO;
        body.acceleration = Vec2::ZERO;
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
