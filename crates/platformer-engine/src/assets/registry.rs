use std::collections::HashMap;

use serde::Deserialize;

use crate::components::sprite::{AtlasId, SpriteComponent};

/// JSON shape of a sprite sheet description:
/// `{ "sprites": { "player_idle": { "atlas": 0, "col": 0, "row": 0 } } }`.
#[derive(Debug, Clone, Deserialize)]
struct SpriteSheet {
    #[serde(default)]
    sprites: HashMap<String, SpriteDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
struct SpriteDescriptor {
    #[serde(default)]
    atlas: u32,
    col: u32,
    row: u32,
    #[serde(default = "default_alpha")]
    alpha: f32,
}

fn default_alpha() -> f32 {
    1.0
}

/// Named sprites. Entities look themselves up here by name at render time;
/// a missing name is not an error, the entity draws a plain rectangle.
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    sprites: HashMap<String, SpriteComponent>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let sheet: SpriteSheet = serde_json::from_str(json)?;
        let sprites = sheet
            .sprites
            .into_iter()
            .map(|(name, desc)| {
                let sprite = SpriteComponent::new(AtlasId(desc.atlas), desc.col as f32, desc.row as f32)
                    .with_alpha(desc.alpha);
                (name, sprite)
            })
            .collect();
        Ok(Self { sprites })
    }

    pub fn insert(&mut self, name: impl Into<String>, sprite: SpriteComponent) {
        self.sprites.insert(name.into(), sprite);
    }

    /// Look up a sprite by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&SpriteComponent> {
        self.sprites.get(name)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_json() {
        let json = r#"{
            "sprites": {
                "player_run": { "atlas": 1, "col": 3, "row": 5 },
                "enemy": { "col": 0, "row": 2, "alpha": 0.5 }
            }
        }"#;
        let reg = SpriteRegistry::from_json(json).unwrap();
        assert_eq!(reg.len(), 2);

        let run = reg.get("player_run").expect("player_run should exist");
        assert_eq!(run.atlas, AtlasId(1));
        assert_eq!(run.col, 3.0);
        assert_eq!(run.row, 5.0);
        assert_eq!(run.alpha, 1.0);

        let enemy = reg.get("enemy").unwrap();
        assert_eq!(enemy.atlas, AtlasId(0));
        assert_eq!(enemy.alpha, 0.5);
    }

    #[test]
    fn unknown_returns_none() {
        let reg = SpriteRegistry::new();
        assert!(reg.get("nonexistent").is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(SpriteRegistry::from_json("{ \"sprites\": 3 }").is_err());
    }
}
