use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::platform::PlatformKind;

/// Errors that can occur loading a level.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{what} has non-positive size {width}x{height}")]
    InvalidSize {
        what: String,
        width: f32,
        height: f32,
    },

    #[error("level extents must be positive")]
    InvalidLevelSize,

    #[error("enemy {index} has a non-positive patrol distance")]
    InvalidPatrol { index: usize },

    #[error("spawner {index} has a non-positive interval or speed")]
    InvalidSpawner { index: usize },
}

/// Initial placements for one level. Coordinates are world units, y down;
/// every position is a top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    #[serde(default)]
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub player_spawn: Vec2,
    pub finish: Vec2,
    #[serde(default)]
    pub platforms: Vec<PlatformDesc>,
    #[serde(default)]
    pub enemies: Vec<EnemyDesc>,
    #[serde(default)]
    pub spawners: Vec<SpawnerDesc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDesc {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, rename = "type")]
    pub kind: PlatformKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDesc {
    pub x: f32,
    pub y: f32,
    pub patrol_distance: f32,
    /// Initial heading, -1 or 1.
    #[serde(default = "default_direction")]
    pub direction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnerDesc {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_direction")]
    pub direction: f32,
    /// Radians; mirrored for leftward spawners.
    #[serde(default)]
    pub angle: f32,
    /// Falls back to the configured projectile speed.
    #[serde(default)]
    pub speed: Option<f32>,
    pub interval: f32,
}

fn default_direction() -> f32 {
    1.0
}

impl LevelDescriptor {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: LevelDescriptor = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(LevelError::InvalidLevelSize);
        }
        for (i, p) in self.platforms.iter().enumerate() {
            if !(p.width > 0.0 && p.height > 0.0) {
                return Err(LevelError::InvalidSize {
                    what: format!("platform {}", i),
                    width: p.width,
                    height: p.height,
                });
            }
        }
        for (index, e) in self.enemies.iter().enumerate() {
            if !(e.patrol_distance > 0.0) {
                return Err(LevelError::InvalidPatrol { index });
            }
        }
        for (index, s) in self.spawners.iter().enumerate() {
            let speed_ok = s.speed.map_or(true, |v| v > 0.0);
            if !(s.interval > 0.0) || !speed_ok {
                return Err(LevelError::InvalidSpawner { index });
            }
        }
        Ok(())
    }

    /// A small built-in level: ground, a gap, one of each hazard, a patrol
    /// and a turret. Used by the web runner when the host supplies none.
    pub fn demo() -> Self {
        let platform = |x: f32, y: f32, width: f32, height: f32, kind: PlatformKind| PlatformDesc {
            x,
            y,
            width,
            height,
            kind,
        };
        Self {
            name: "demo".to_string(),
            width: 2000.0,
            height: 600.0,
            player_spawn: Vec2::new(50.0, 400.0),
            finish: Vec2::new(1900.0, 480.0),
            platforms: vec![
                platform(0.0, 500.0, 800.0, 100.0, PlatformKind::Static),
                platform(900.0, 420.0, 120.0, 20.0, PlatformKind::Falling),
                platform(1100.0, 500.0, 900.0, 100.0, PlatformKind::Static),
                platform(1300.0, 380.0, 120.0, 20.0, PlatformKind::Upping),
                platform(1500.0, 340.0, 160.0, 20.0, PlatformKind::Static),
            ],
            enemies: vec![EnemyDesc {
                x: 500.0,
                y: 460.0,
                patrol_distance: 200.0,
                direction: 1.0,
            }],
            spawners: vec![SpawnerDesc {
                x: 1950.0,
                y: 470.0,
                direction: -1.0,
                angle: 0.0,
                speed: None,
                interval: 2.5,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_level() {
        let json = r#"{
            "name": "one",
            "width": 1200, "height": 600,
            "player_spawn": [40, 400],
            "finish": [1100, 452],
            "platforms": [
                { "x": 0, "y": 500, "width": 1200, "height": 50 },
                { "x": 300, "y": 400, "width": 100, "height": 20, "type": "falling" }
            ],
            "enemies": [ { "x": 500, "y": 460, "patrol_distance": 100 } ],
            "spawners": [ { "x": 1150, "y": 470, "direction": -1, "interval": 2 } ]
        }"#;
        let level = LevelDescriptor::from_json(json).unwrap();
        assert_eq!(level.player_spawn, Vec2::new(40.0, 400.0));
        assert_eq!(level.platforms[0].kind, PlatformKind::Static);
        assert_eq!(level.platforms[1].kind, PlatformKind::Falling);
        assert_eq!(level.enemies[0].direction, 1.0);
        assert_eq!(level.spawners[0].angle, 0.0);
        assert_eq!(level.spawners[0].speed, None);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = LevelDescriptor::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
    }

    #[test]
    fn rejects_bad_geometry() {
        let mut level = LevelDescriptor::demo();
        level.platforms[1].width = 0.0;
        match level.validate() {
            Err(LevelError::InvalidSize { what, .. }) => assert_eq!(what, "platform 1"),
            other => panic!("expected InvalidSize, got {:?}", other),
        }

        let mut level = LevelDescriptor::demo();
        level.height = -1.0;
        assert!(matches!(level.validate(), Err(LevelError::InvalidLevelSize)));
    }

    #[test]
    fn rejects_bad_patrol_and_spawner() {
        let mut level = LevelDescriptor::demo();
        level.enemies[0].patrol_distance = 0.0;
        assert!(matches!(level.validate(), Err(LevelError::InvalidPatrol { index: 0 })));

        let mut level = LevelDescriptor::demo();
        level.spawners[0].interval = 0.0;
        assert!(matches!(level.validate(), Err(LevelError::InvalidSpawner { index: 0 })));
    }

    #[test]
    fn demo_level_is_valid_and_survives_json() {
        let level = LevelDescriptor::demo();
        level.validate().unwrap();
        let json = level.to_json().unwrap();
        assert_eq!(LevelDescriptor::from_json(&json).unwrap(), level);
    }

    #[test]
    fn error_messages_are_readable() {
        let err = LevelError::InvalidPatrol { index: 3 };
        assert_eq!(err.to_string(), "enemy 3 has a non-positive patrol distance");
    }
}
