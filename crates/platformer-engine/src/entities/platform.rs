use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::game::HazardConfig;
use crate::api::types::{EntityId, Rect};
use crate::assets::registry::SpriteRegistry;
use crate::core::collision::Solid;
use crate::entities::hazard::{FallingState, HazardEnv, HazardPhase, UppingState};
use crate::renderer::traits::{Color, DrawContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    #[default]
    Static,
    Falling,
    Upping,
}

impl PlatformKind {
    pub fn sprite_name(self) -> &'static str {
        match self {
            PlatformKind::Static => "platform_static",
            PlatformKind::Falling => "platform_falling",
            PlatformKind::Upping => "platform_upping",
        }
    }

    fn color(self) -> Color {
        match self {
            PlatformKind::Static => Color::rgb(0.45, 0.45, 0.5),
            PlatformKind::Falling => Color::rgb(0.8, 0.5, 0.2),
            PlatformKind::Upping => Color::rgb(0.4, 0.8, 0.4),
        }
    }
}

/// Per-kind behavior. Static platforms carry no state.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformState {
    Static,
    Falling(FallingState),
    Upping(UppingState),
}

/// A rectangle the player can stand on. Hazard variants move and vanish on
/// their own schedule but are otherwise read-only to the rest of the world.
#[derive(Debug, Clone)]
pub struct Platform {
    pub id: EntityId,
    pub position: Vec2,
    pub size: Vec2,
    state: PlatformState,
}

impl Platform {
    pub fn new(id: EntityId, position: Vec2, size: Vec2, kind: PlatformKind) -> Self {
        let state = match kind {
            PlatformKind::Static => PlatformState::Static,
            PlatformKind::Falling => PlatformState::Falling(FallingState::new(position)),
            PlatformKind::Upping => PlatformState::Upping(UppingState::new(position)),
        };
        Self {
            id,
            position,
            size,
            state,
        }
    }

    pub fn kind(&self) -> PlatformKind {
        match self.state {
            PlatformState::Static => PlatformKind::Static,
            PlatformState::Falling(_) => PlatformKind::Falling,
            PlatformState::Upping(_) => PlatformKind::Upping,
        }
    }

    pub fn state(&self) -> &PlatformState {
        &self.state
    }

    pub fn is_static(&self) -> bool {
        matches!(self.state, PlatformState::Static)
    }

    pub fn phase(&self) -> HazardPhase {
        match &self.state {
            PlatformState::Static => HazardPhase::Idle,
            PlatformState::Falling(s) => s.phase(),
            PlatformState::Upping(s) => s.phase(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Destroyed hazards have no collision geometry until they respawn.
    pub fn can_collide(&self) -> bool {
        self.phase() != HazardPhase::Destroyed
    }

    /// Returns `true` when this contact armed the hazard.
    pub fn on_player_contact(&mut self) -> bool {
        let armed = match &mut self.state {
            PlatformState::Static => false,
            PlatformState::Falling(s) => s.on_player_contact(),
            PlatformState::Upping(s) => s.on_player_contact(),
        };
        if armed {
            log::debug!("platform {} ({:?}) armed", self.id.0, self.kind());
        }
        armed
    }

    pub fn update(&mut self, dt: f32, config: &HazardConfig, env: &HazardEnv) {
        let height = self.size.y;
        let changed = match &mut self.state {
            PlatformState::Static => None,
            PlatformState::Falling(s) => s.update(&mut self.position, dt, config, env),
            PlatformState::Upping(s) => s.update(&mut self.position, height, dt, config),
        };
        if let Some(phase) = changed {
            let label = match phase {
                HazardPhase::Idle => "respawned",
                HazardPhase::Armed => "armed",
                HazardPhase::Active => "triggered",
                HazardPhase::Destroyed => "destroyed",
            };
            log::debug!("platform {} ({:?}) {}", self.id.0, self.kind(), label);
        }
    }

    pub fn shake_offset(&self, config: &HazardConfig) -> Vec2 {
        match &self.state {
            PlatformState::Static => Vec2::ZERO,
            PlatformState::Falling(s) => s.shake_offset(config),
            PlatformState::Upping(s) => s.shake_offset(config),
        }
    }

    pub fn render(&self, ctx: &mut dyn DrawContext, sprites: &SpriteRegistry, config: &HazardConfig) {
        if !self.can_collide() {
            return;
        }
        let rect = self.bounds().translated(self.shake_offset(config));
        let kind = self.kind();
        match sprites.get(kind.sprite_name()) {
            Some(sprite) => ctx.draw_sprite(sprite, rect, false),
            None => {
                log::trace!("platform {}: no sprite {:?}, drawing rectangle", self.id.0, kind.sprite_name());
                ctx.fill_rect(rect, kind.color());
            }
        }
    }

    pub fn debug_info(&self) -> String {
        let detail = match &self.state {
            PlatformState::Static => String::new(),
            PlatformState::Falling(s) => format!(" phase={:?} fall_speed={:.1}", s.phase(), s.fall_speed()),
            PlatformState::Upping(s) => format!(" phase={:?} move_speed={:.1}", s.phase(), s.move_speed()),
        };
        format!(
            "platform#{} {:?} pos=({:.1},{:.1}) size=({:.1},{:.1}){}",
            self.id.0,
            self.kind(),
            self.position.x,
            self.position.y,
            self.size.x,
            self.size.y,
            detail,
        )
    }
}

impl Solid for Platform {
    fn bounds(&self) -> Rect {
        Platform::bounds(self)
    }

    fn can_collide(&self) -> bool {
        Platform::can_collide(self)
    }
}
