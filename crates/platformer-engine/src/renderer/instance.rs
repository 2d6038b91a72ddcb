use bytemuck::{Pod, Zeroable};

use crate::api::types::Rect;
use crate::components::sprite::SpriteComponent;
use crate::renderer::traits::{Color, DrawContext};

/// One draw record, laid out for the host to read as raw 32-bit words.
/// 8 words = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Top-left corner in world space.
    pub x: f32,
    pub y: f32,
    /// Negative width means mirrored horizontally.
    pub width: f32,
    pub height: f32,
    /// Atlas column for sprites; line width for strokes.
    pub sprite_col: f32,
    pub atlas_row: f32,
    /// Atlas index, or [`RenderInstance::FILL`] / [`RenderInstance::STROKE`].
    pub atlas: f32,
    /// `0xRRGGBBAA`. Tint for sprites, paint for fills and strokes.
    pub color: u32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Atlas marker for a solid rectangle.
    pub const FILL: f32 = -1.0;
    /// Atlas marker for a rectangle outline.
    pub const STROKE: f32 = -2.0;

    pub fn is_sprite(&self) -> bool {
        self.atlas >= 0.0
    }

    pub fn is_fill(&self) -> bool {
        self.atlas == Self::FILL
    }

    pub fn is_stroke(&self) -> bool {
        self.atlas == Self::STROKE
    }
}

/// Flat list of draw records for one frame.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(256),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for zero-copy reads from the host.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawContext for RenderBuffer {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(RenderInstance {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            sprite_col: 0.0,
            atlas_row: 0.0,
            atlas: RenderInstance::FILL,
            color: color.to_u32(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        self.push(RenderInstance {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            sprite_col: line_width,
            atlas_row: 0.0,
            atlas: RenderInstance::STROKE,
            color: color.to_u32(),
        });
    }

    fn draw_sprite(&mut self, sprite: &SpriteComponent, rect: Rect, flip_x: bool) {
        let tint = Color::rgba(1.0, 1.0, 1.0, sprite.alpha);
        self.push(RenderInstance {
            x: rect.x,
            y: rect.y,
            width: if flip_x { -rect.width } else { rect.width },
            height: rect.height,
            sprite_col: sprite.col,
            atlas_row: sprite.row,
            atlas: sprite.atlas.0 as f32,
            color: tint.to_u32(),
        });
    }
}
