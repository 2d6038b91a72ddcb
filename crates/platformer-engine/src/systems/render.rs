use crate::api::game::HazardConfig;
use crate::assets::registry::SpriteRegistry;
use crate::components::entity::EntityRef;
use crate::renderer::traits::DrawContext;

/// Draw entities in iteration order, skipping anything dead, spent or
/// destroyed. Callers order the iterator back to front.
pub fn draw_entities<'a>(
    entities: impl Iterator<Item = EntityRef<'a>>,
    ctx: &mut dyn DrawContext,
    sprites: &SpriteRegistry,
    hazard: &HazardConfig,
) -> usize {
    let mut drawn = 0;
    for entity in entities {
        if !entity.is_live() {
            continue;
        }
        entity.render(ctx, sprites, hazard);
        drawn += 1;
    }
    drawn
}
