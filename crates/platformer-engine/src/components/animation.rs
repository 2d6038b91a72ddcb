//! Derived animation tags.
//!
//! Nothing here is stored state: the tag is recomputed from motion every tick
//! and only selects which sprite the renderer looks up.

use glam::Vec2;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAnimation {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
}

impl PlayerAnimation {
    /// Priority: airborne and rising, airborne and falling, grounded and
    /// moving, idle.
    pub fn derive(grounded: bool, velocity: Vec2, moving_epsilon: f32) -> Self {
        if !grounded {
            if velocity.y < 0.0 {
                PlayerAnimation::Jump
            } else {
                PlayerAnimation::Fall
            }
        } else if velocity.x.abs() > moving_epsilon {
            PlayerAnimation::Run
        } else {
            PlayerAnimation::Idle
        }
    }

    pub fn sprite_name(self) -> &'static str {
        match self {
            PlayerAnimation::Idle => "player_idle",
            PlayerAnimation::Run => "player_run",
            PlayerAnimation::Jump => "player_jump",
            PlayerAnimation::Fall => "player_fall",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airborne_wins_over_horizontal_motion() {
        let anim = PlayerAnimation::derive(false, Vec2::new(300.0, -10.0), 1.0);
        assert_eq!(anim, PlayerAnimation::Jump);
        let anim = PlayerAnimation::derive(false, Vec2::new(300.0, 0.0), 1.0);
        assert_eq!(anim, PlayerAnimation::Fall);
    }

    #[test]
    fn grounded_run_needs_more_than_epsilon() {
        assert_eq!(
            PlayerAnimation::derive(true, Vec2::new(0.5, 0.0), 1.0),
            PlayerAnimation::Idle
        );
        assert_eq!(
            PlayerAnimation::derive(true, Vec2::new(-2.0, 0.0), 1.0),
            PlayerAnimation::Run
        );
    }

    #[test]
    fn sprite_names() {
        assert_eq!(PlayerAnimation::Fall.sprite_name(), "player_fall");
        assert_eq!(PlayerAnimation::default().sprite_name(), "player_idle");
    }
}
