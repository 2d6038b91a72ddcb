//! Contact-triggered platform state machines.
//!
//! Both variants run the same four phases:
//!
//! ```text
//! Idle --contact--> Armed --delay--> Active --out of level--> Destroyed
//!   ^                                                            |
//!   +------------------------- respawn delay -------------------+
//! ```
//!
//! A falling platform drops during `Active`; an upping platform shoots
//! upward. The state owns a copy of the spawn position, never a reference to
//! the live one, and respawning restores it exactly.

use glam::Vec2;
use serde::Serialize;

use crate::api::game::HazardConfig;

/// Oscillation rate of the pre-trigger shake, radians per second.
const SHAKE_RATE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardPhase {
    #[default]
    Idle,
    /// Touched; counting down to activation.
    Armed,
    /// Falling or rising.
    Active,
    /// Out of the level and collision-inert; counting down to respawn.
    Destroyed,
}

/// What a hazard needs to know about the world it lives in.
#[derive(Debug, Clone, Copy)]
pub struct HazardEnv {
    pub gravity: f32,
    pub level_height: f32,
}

/// Shake offset while armed: silent for the first half of the delay, then
/// ramping linearly up to `max_shake`.
fn shake(timer: f32, delay: f32, max_shake: f32) -> Vec2 {
    let half = delay * 0.5;
    if half <= 0.0 || timer <= half {
        return Vec2::ZERO;
    }
    let intensity = max_shake * ((timer - half) / half).min(1.0);
    Vec2::new((timer * SHAKE_RATE).sin() * intensity, 0.0)
}

// ---------------------------------------------------------------------------
// Falling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FallingState {
    phase: HazardPhase,
    fall_timer: f32,
    fall_speed: f32,
    respawn_timer: f32,
    original: Vec2,
}

impl FallingState {
    pub fn new(original: Vec2) -> Self {
        Self {
            phase: HazardPhase::Idle,
            fall_timer: 0.0,
            fall_speed: 0.0,
            respawn_timer: 0.0,
            original,
        }
    }

    pub fn phase(&self) -> HazardPhase {
        self.phase
    }

    pub fn original(&self) -> Vec2 {
        self.original
    }

    pub fn is_contacting(&self) -> bool {
        self.phase == HazardPhase::Armed
    }

    pub fn is_falling(&self) -> bool {
        self.phase == HazardPhase::Active
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == HazardPhase::Destroyed
    }

    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    /// Arm the fall timer. Returns `true` only on the Idle to Armed edge.
    pub fn on_player_contact(&mut self) -> bool {
        if self.phase != HazardPhase::Idle {
            return false;
        }
        self.phase = HazardPhase::Armed;
        self.fall_timer = 0.0;
        true
    }

    /// Advance one tick, moving `position`. Returns the new phase when it changed.
    pub fn update(
        &mut self,
        position: &mut Vec2,
        dt: f32,
        config: &HazardConfig,
        env: &HazardEnv,
    ) -> Option<HazardPhase> {
        match self.phase {
            HazardPhase::Idle => None,
            HazardPhase::Armed => {
                self.fall_timer += dt;
                if self.fall_timer >= config.fall_delay {
                    self.phase = HazardPhase::Active;
                    self.fall_speed = 0.0;
                    return Some(self.phase);
                }
                None
            }
            HazardPhase::Active => {
                self.fall_speed += env.gravity * config.fall_gravity_multiplier * dt;
                position.y += self.fall_speed * dt;
                if position.y > env.level_height + config.destroy_margin {
                    self.phase = HazardPhase::Destroyed;
                    self.respawn_timer = 0.0;
                    return Some(self.phase);
                }
                None
            }
            HazardPhase::Destroyed => {
                self.respawn_timer += dt;
                if self.respawn_timer >= config.respawn_delay {
                    self.reset(position);
                    return Some(self.phase);
                }
                None
            }
        }
    }

    pub fn shake_offset(&self, config: &HazardConfig) -> Vec2 {
        if self.phase != HazardPhase::Armed {
            return Vec2::ZERO;
        }
        shake(self.fall_timer, config.fall_delay, config.max_shake)
    }

    fn reset(&mut self, position: &mut Vec2) {
        *self = Self::new(self.original);
        *position = self.original;
    }
}

// ---------------------------------------------------------------------------
// Upping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct UppingState {
    phase: HazardPhase,
    move_timer: f32,
    move_speed: f32,
    respawn_timer: f32,
    original: Vec2,
}

impl UppingState {
    pub fn new(original: Vec2) -> Self {
        Self {
            phase: HazardPhase::Idle,
            move_timer: 0.0,
            move_speed: 0.0,
            respawn_timer: 0.0,
            original,
        }
    }

    pub fn phase(&self) -> HazardPhase {
        self.phase
    }

    pub fn original(&self) -> Vec2 {
        self.original
    }

    pub fn is_contacting(&self) -> bool {
        self.phase == HazardPhase::Armed
    }

    pub fn is_moving(&self) -> bool {
        self.phase == HazardPhase::Active
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == HazardPhase::Destroyed
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn on_player_contact(&mut self) -> bool {
        if self.phase != HazardPhase::Idle {
            return false;
        }
        self.phase = HazardPhase::Armed;
        self.move_timer = 0.0;
        true
    }

    /// `height` is the platform's height; the platform is destroyed once its
    /// bottom edge clears the top margin.
    pub fn update(
        &mut self,
        position: &mut Vec2,
        height: f32,
        dt: f32,
        config: &HazardConfig,
    ) -> Option<HazardPhase> {
        match self.phase {
            HazardPhase::Idle => None,
            HazardPhase::Armed => {
                self.move_timer += dt;
                if self.move_timer >= config.move_delay {
                    self.phase = HazardPhase::Active;
                    self.move_speed = 0.0;
                    return Some(self.phase);
                }
                None
            }
            HazardPhase::Active => {
                self.move_speed = (self.move_speed + config.upward_accel * dt).min(config.max_upward_speed);
                position.y -= self.move_speed * dt;
                if position.y + height < -config.destroy_margin {
                    self.phase = HazardPhase::Destroyed;
                    self.respawn_timer = 0.0;
                    return Some(self.phase);
                }
                None
            }
            HazardPhase::Destroyed => {
                self.respawn_timer += dt;
                if self.respawn_timer >= config.respawn_delay {
                    *self = Self::new(self.original);
                    *position = self.original;
                    return Some(self.phase);
                }
                None
            }
        }
    }

    pub fn shake_offset(&self, config: &HazardConfig) -> Vec2 {
        if self.phase != HazardPhase::Armed {
            return Vec2::ZERO;
        }
        shake(self.move_timer, config.move_delay, config.max_shake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    const ENV: HazardEnv = HazardEnv {
        gravity: 980.0,
        level_height: 600.0,
    };

    #[test]
    fn falling_lifecycle() {
        let config = HazardConfig::default();
        let spawn = Vec2::new(300.0, 400.0);
        let mut pos = spawn;
        let mut state = FallingState::new(spawn);

        // Idle without contact.
        for _ in 0..120 {
            assert_eq!(state.update(&mut pos, DT, &config, &ENV), None);
        }
        assert_eq!(pos, spawn);

        assert!(state.on_player_contact());
        assert!(!state.on_player_contact(), "contact arms only once");

        let mut elapsed = 0.0;
        while !state.is_falling() {
            state.update(&mut pos, DT, &config, &ENV);
            elapsed += DT;
            assert!(elapsed < 2.0, "never started falling");
        }
        assert!((elapsed - config.fall_delay).abs() < 2.0 * DT);
        assert_eq!(pos, spawn, "no movement while armed");

        let mut last_y = pos.y;
        while !state.is_destroyed() {
            state.update(&mut pos, DT, &config, &ENV);
            if !state.is_destroyed() {
                assert!(pos.y > last_y, "y must strictly increase while falling");
            }
            last_y = pos.y;
        }
        assert!(pos.y > ENV.level_height + config.destroy_margin);
        assert!(!state.on_player_contact(), "destroyed ignores contact");

        let mut waited = 0.0;
        while state.is_destroyed() {
            state.update(&mut pos, DT, &config, &ENV);
            waited += DT;
        }
        assert!((waited - config.respawn_delay).abs() < 2.0 * DT);
        assert_eq!(pos, spawn);
        assert_eq!(state, FallingState::new(spawn));
    }

    #[test]
    fn falling_accelerates_at_double_gravity() {
        let config = HazardConfig::default();
        let mut pos = Vec2::ZERO;
        let mut state = FallingState::new(pos);
        state.on_player_contact();
        while !state.is_falling() {
            state.update(&mut pos, DT, &config, &ENV);
        }
        for _ in 0..10 {
            state.update(&mut pos, DT, &config, &ENV);
        }
        let expected = 980.0 * 2.0 * 10.0 * DT;
        assert!((state.fall_speed() - expected).abs() < 1e-2);
    }

    #[test]
    fn shake_ramps_in_back_half() {
        let config = HazardConfig::default();
        let mut pos = Vec2::ZERO;
        let mut state = FallingState::new(pos);
        state.on_player_contact();
        let mut peak_front: f32 = 0.0;
        let mut peak_back: f32 = 0.0;
        while state.is_contacting() {
            let offset = state.shake_offset(&config).x.abs();
            if state.fall_timer <= config.fall_delay * 0.5 {
                peak_front = peak_front.max(offset);
            } else {
                peak_back = peak_back.max(offset);
            }
            assert!(offset <= config.max_shake);
            state.update(&mut pos, DT, &config, &ENV);
        }
        assert_eq!(peak_front, 0.0);
        assert!(peak_back > 0.0);
        assert_eq!(state.shake_offset(&config), Vec2::ZERO, "no shake once falling");
    }

    #[test]
    fn upping_lifecycle() {
        let config = HazardConfig::default();
        let spawn = Vec2::new(100.0, 300.0);
        let mut pos = spawn;
        let mut state = UppingState::new(spawn);
        assert!(state.on_player_contact());

        let mut last_y = pos.y;
        let mut saw_moving = false;
        for _ in 0..(60 * 10) {
            state.update(&mut pos, 20.0, DT, &config);
            if state.is_moving() {
                saw_moving = true;
                assert!(pos.y <= last_y);
                assert!(state.move_speed() <= config.max_upward_speed);
            }
            last_y = pos.y;
            if state.is_destroyed() {
                break;
            }
        }
        assert!(saw_moving);
        assert!(state.is_destroyed());
        assert!(pos.y + 20.0 < -config.destroy_margin);

        while state.is_destroyed() {
            state.update(&mut pos, 20.0, DT, &config);
        }
        assert_eq!(pos, spawn);
        assert_eq!(state.phase(), HazardPhase::Idle);
        assert!(state.on_player_contact(), "re-armable after respawn");
    }

    #[test]
    fn upping_speed_is_capped() {
        let config = HazardConfig {
            destroy_margin: 1.0e6,
            ..HazardConfig::default()
        };
        let mut pos = Vec2::ZERO;
        let mut state = UppingState::new(pos);
        state.on_player_contact();
        for _ in 0..600 {
            state.update(&mut pos, 20.0, DT, &config);
        }
        assert_eq!(state.move_speed(), config.max_upward_speed);
    }
}
