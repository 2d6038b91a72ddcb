//! Debug overlay: collision outlines and a text dump of entity state.
//!
//! Opt-in. The host decides when to call these, typically behind a toggle.

use crate::components::entity::EntityRef;
use crate::renderer::traits::{Color, DrawContext};

/// Stroke the collision bounds of every live entity.
pub fn draw_bounds<'a>(
    entities: impl Iterator<Item = EntityRef<'a>>,
    ctx: &mut dyn DrawContext,
    line_width: f32,
    color: Color,
) {
    for entity in entities.filter(|e| e.is_live()) {
        ctx.stroke_rect(entity.bounds(), color, line_width);
    }
}

/// One `debug_info` line per entity, dead ones included.
pub fn dump<'a>(entities: impl Iterator<Item = EntityRef<'a>>) -> String {
    entities
        .map(|e| e.debug_info())
        .collect::<Vec<_>>()
        .join("\n")
}
