use serde::{Deserialize, Serialize};

/// Identifies which texture atlas a sprite belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AtlasId(pub u32);

/// A cell in a sprite atlas. Entities hold no sprite; they look one up by
/// name in the [`SpriteRegistry`](crate::assets::registry::SpriteRegistry)
/// at render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteComponent {
    pub atlas: AtlasId,
    /// Column in the atlas grid.
    pub col: f32,
    /// Row in the atlas grid.
    pub row: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl SpriteComponent {
    pub fn new(atlas: AtlasId, col: f32, row: f32) -> Self {
        Self {
            atlas,
            col,
            row,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self::new(AtlasId(0), 0.0, 0.0)
    }
}
