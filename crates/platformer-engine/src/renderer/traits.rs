//! Drawing surface the simulation renders into.
//!
//! The core never talks to a GPU or a canvas. Entities describe themselves as
//! rectangles and atlas cells; a host (or the [`RenderBuffer`] it reads back)
//! decides what that means on screen.
//!
//! [`RenderBuffer`]: super::instance::RenderBuffer

use crate::api::types::Rect;
use crate::components::sprite::SpriteComponent;

/// Linear RGBA, each channel 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const DEBUG: Color = Color::rgb(0.0, 1.0, 0.3);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Pack as `0xRRGGBBAA`.
    pub fn to_u32(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 24) | (channel(self.g) << 16) | (channel(self.b) << 8) | channel(self.a)
    }
}

/// What an entity may draw. Coordinates are world units, y down.
pub trait DrawContext {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);

    /// Draw an atlas cell stretched over `rect`, mirrored horizontally when
    /// `flip_x` is set.
    fn draw_sprite(&mut self, sprite: &SpriteComponent, rect: Rect, flip_x: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_packs_rgba() {
        assert_eq!(Color::rgb(1.0, 0.0, 0.0).to_u32(), 0xFF0000FF);
        assert_eq!(Color::rgba(0.0, 0.0, 1.0, 0.0).to_u32(), 0x0000FF00);
        assert_eq!(Color::rgb(2.0, -1.0, 0.0).to_u32(), 0xFF0000FF);
    }
}
