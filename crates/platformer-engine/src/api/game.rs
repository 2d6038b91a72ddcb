use serde::{Deserialize, Serialize};

/// Configuration for the simulation, provided by the host.
/// Every field has a default so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Upper clamp on a single frame's wall-clock delta (default: 1/30).
    /// Keeps a slow frame from queueing a burst of catch-up ticks.
    pub max_frame_dt: f32,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub projectile: ProjectileConfig,
    pub hazard: HazardConfig,
    pub collision: CollisionConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_frame_dt: 1.0 / 30.0,
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            projectile: ProjectileConfig::default(),
            hazard: HazardConfig::default(),
            collision: CollisionConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Global integration constants. Y-down: positive gravity pulls downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    /// Linear drag coefficient; acceleration gains `-velocity * air_resistance`.
    pub air_resistance: f32,
    /// Maximum downward speed.
    pub terminal_velocity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 980.0,
            air_resistance: 0.02,
            terminal_velocity: 800.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Ground speed; set directly while grounded.
    pub max_speed: f32,
    pub jump_power: f32,
    /// Grace window after leaving the ground during which a jump is honored.
    pub coyote_time: f32,
    /// Air acceleration toward the current direction of travel.
    pub air_accel: f32,
    /// Air acceleration against the current direction of travel.
    pub air_decel: f32,
    /// Airborne speed cap as a fraction of `max_speed`.
    pub air_control_cap: f32,
    /// Horizontal speed given by a jump with a direction held.
    pub directional_jump_speed: f32,
    /// Horizontal velocity multiplier for a jump with no direction held.
    pub neutral_jump_damping: f32,
    /// Per-tick horizontal velocity multiplier while grounded and idle.
    pub ground_friction: f32,
    /// Per-tick horizontal velocity multiplier while airborne and idle.
    pub air_friction: f32,
    /// Horizontal speeds below this snap to zero.
    pub stop_epsilon: f32,
    /// Upward bounce after stomping an enemy, as a fraction of `jump_power`.
    pub stomp_bounce: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 32.0,
            height: 48.0,
            max_speed: 300.0,
            jump_power: 600.0,
            coyote_time: 0.3,
            air_accel: 900.0,
            air_decel: 1800.0,
            air_control_cap: 0.9,
            directional_jump_speed: 360.0,
            neutral_jump_damping: 0.7,
            ground_friction: 0.8,
            air_friction: 0.98,
            stop_epsilon: 1.0,
            stomp_bounce: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Distance ahead of and below the leading edge sampled for ledges.
    pub edge_probe: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            speed: 80.0,
            edge_probe: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// How far past the left, right and top level edges a projectile may travel.
    pub bounds_margin: f32,
    /// How far below the level a projectile may fall before deactivation.
    pub fall_margin: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            width: 16.0,
            height: 8.0,
            speed: 250.0,
            bounds_margin: 50.0,
            fall_margin: 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    pub fall_delay: f32,
    pub move_delay: f32,
    pub respawn_delay: f32,
    /// Falling platforms descend under `gravity * fall_gravity_multiplier`.
    pub fall_gravity_multiplier: f32,
    /// Distance past the level edge at which a moving hazard is destroyed.
    pub destroy_margin: f32,
    /// Peak shake offset reached just before a falling platform drops.
    pub max_shake: f32,
    pub upward_accel: f32,
    pub max_upward_speed: f32,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            fall_delay: 1.0,
            move_delay: 1.0,
            respawn_delay: 2.0,
            fall_gravity_multiplier: 2.0,
            destroy_margin: 100.0,
            max_shake: 3.0,
            upward_accel: 600.0,
            max_upward_speed: 400.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Minimum interpenetration before two boxes count as overlapping.
    pub tolerance: f32,
    /// Opposing speed above which a resolution is rejected as implausible.
    pub velocity_tolerance: f32,
    /// Height of the probe rectangle placed under the actor's feet.
    pub ground_probe: f32,
    /// Floor penetration at or below which contact is always treated as
    /// standing, so walking across adjacent blocks never snags on a seam.
    pub seam_tolerance: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            velocity_tolerance: 50.0,
            ground_probe: 2.0,
            seam_tolerance: 2.0,
        }
    }
}

/// What a `FixedStepClock` drives each frame: zero or more fixed-size
/// updates followed by exactly one render.
pub trait FrameHandler {
    /// Advance the simulation by one fixed step.
    fn update(&mut self, dt: f32);

    /// Produce output for the current state. Called once per clock tick,
    /// after all updates for that tick.
    fn render(&mut self) {}
}
