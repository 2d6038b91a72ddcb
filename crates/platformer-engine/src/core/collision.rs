//! Axis-separated AABB collision resolution between one moving actor and a
//! set of solids.
//!
//! Resolution is discrete: positions have already been advanced for the
//! tick, and overlapping shapes are pushed apart along the axis that needs
//! the smallest displacement. A tick runs a horizontal pass and then a
//! vertical pass. Each pass scans every solid and applies at most one
//! resolution, so the two axes cannot fight within a tick.

use glam::Vec2;

use crate::api::game::CollisionConfig;
use crate::api::types::Rect;

/// Something the resolver can push out of solids.
pub trait Actor {
    fn bounds(&self) -> Rect;
    fn velocity(&self) -> Vec2;
    fn set_x(&mut self, x: f32);
    fn set_y(&mut self, y: f32);
    fn stop_x(&mut self);
    fn stop_y(&mut self);
    /// Called after a resolution placed the actor on top of a solid.
    fn land(&mut self);
}

/// Collision geometry the resolver reads. The resolver never mutates solids.
pub trait Solid {
    fn bounds(&self) -> Rect;

    /// `false` removes the solid from every query (e.g. a destroyed hazard).
    fn can_collide(&self) -> bool {
        true
    }
}

impl Solid for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which side of the solid the actor ends up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub fn axis(self) -> Axis {
        match self {
            Side::Top | Side::Bottom => Axis::Vertical,
            Side::Left | Side::Right => Axis::Horizontal,
        }
    }
}

/// Directed overlaps between an actor and a solid. All four are positive
/// whenever the shapes intersect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// actor.right - solid.left
    pub left: f32,
    /// solid.right - actor.left
    pub right: f32,
    /// actor.bottom - solid.top
    pub top: f32,
    /// solid.bottom - actor.top
    pub bottom: f32,
}

impl Penetration {
    pub fn min_x(&self) -> f32 {
        self.left.min(self.right)
    }

    pub fn min_y(&self) -> f32 {
        self.top.min(self.bottom)
    }
}

/// An accepted resolution: index into the solid slice plus the side chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub index: usize,
    pub side: Side,
}

/// Outcome of a full two-pass resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    pub horizontal: Option<Contact>,
    pub vertical: Option<Contact>,
}

impl Resolution {
    /// The solid the actor landed on this tick, if any.
    pub fn landed_on(&self) -> Option<usize> {
        self.vertical
            .filter(|c| c.side == Side::Top)
            .map(|c| c.index)
    }
}

/// AABB overlap test that ignores contact closer than `tolerance`.
pub fn aabb_overlap(a: &Rect, b: &Rect, tolerance: f32) -> bool {
    a.overlaps(b, tolerance)
}

#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver {
    config: CollisionConfig,
}

impl CollisionResolver {
    pub fn new(config: CollisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Directed overlaps of `actor` into `solid`, or `None` when they do not
    /// intersect (within tolerance).
    pub fn penetration(&self, actor: &Rect, solid: &Rect) -> Option<Penetration> {
        if !aabb_overlap(actor, solid, self.config.tolerance) {
            return None;
        }
        let pen = Penetration {
            left: actor.right() - solid.left(),
            right: solid.right() - actor.left(),
            top: actor.bottom() - solid.top(),
            bottom: solid.bottom() - actor.top(),
        };
        if pen.left <= 0.0 || pen.right <= 0.0 || pen.top <= 0.0 || pen.bottom <= 0.0 {
            return None;
        }
        Some(pen)
    }

    /// Pick the separating side for an overlap, or `None` when the only
    /// candidate contradicts the actor's direction of travel.
    pub fn classify(&self, pen: &Penetration, velocity: Vec2) -> Option<Side> {
        let vtol = self.config.velocity_tolerance;

        // Feet barely into a floor: always standing, never a wall. Keeps a
        // walk across two adjacent blocks from snagging on the seam.
        let standing = pen.top <= self.config.seam_tolerance
            && pen.top < pen.bottom
            && velocity.y >= 0.0;

        let axis = if standing || pen.min_y() <= pen.min_x() {
            Axis::Vertical
        } else {
            Axis::Horizontal
        };

        let side = match axis {
            Axis::Vertical if pen.top < pen.bottom => Side::Top,
            Axis::Vertical => Side::Bottom,
            Axis::Horizontal if pen.left < pen.right => Side::Left,
            Axis::Horizontal => Side::Right,
        };

        let plausible = match side {
            Side::Top => velocity.y >= -vtol,
            Side::Bottom => velocity.y <= vtol,
            Side::Left => velocity.x >= -vtol,
            Side::Right => velocity.x <= vtol,
        };
        plausible.then_some(side)
    }

    /// Horizontal pass: push the actor out of the first solid whose
    /// preferred separation is horizontal.
    pub fn resolve_horizontal<A, S>(&self, actor: &mut A, solids: &[S]) -> Option<Contact>
    where
        A: Actor + ?Sized,
        S: Solid,
    {
        self.resolve_axis(actor, solids, Axis::Horizontal)
    }

    /// Vertical pass: land on or bump under the first solid whose preferred
    /// separation is vertical.
    pub fn resolve_vertical<A, S>(&self, actor: &mut A, solids: &[S]) -> Option<Contact>
    where
        A: Actor + ?Sized,
        S: Solid,
    {
        self.resolve_axis(actor, solids, Axis::Vertical)
    }

    /// Horizontal pass followed by vertical pass.
    pub fn resolve<A, S>(&self, actor: &mut A, solids: &[S]) -> Resolution
    where
        A: Actor + ?Sized,
        S: Solid,
    {
        let horizontal = self.resolve_horizontal(actor, solids);
        let vertical = self.resolve_vertical(actor, solids);
        Resolution { horizontal, vertical }
    }

    fn resolve_axis<A, S>(&self, actor: &mut A, solids: &[S], axis: Axis) -> Option<Contact>
    where
        A: Actor + ?Sized,
        S: Solid,
    {
        for (index, solid) in solids.iter().enumerate() {
            if !solid.can_collide() {
                continue;
            }
            let bounds = actor.bounds();
            let solid_bounds = solid.bounds();
            let Some(pen) = self.penetration(&bounds, &solid_bounds) else {
                continue;
            };
            let Some(side) = self.classify(&pen, actor.velocity()) else {
                continue;
            };
            if side.axis() != axis {
                continue;
            }
            apply_side(actor, &bounds, &solid_bounds, side);
            return Some(Contact { index, side });
        }
        None
    }

    /// Index of the first solid directly beneath the actor's feet.
    pub fn ground_under<S: Solid>(&self, actor: &Rect, solids: &[S]) -> Option<usize> {
        let probe = Rect::new(actor.x, actor.bottom(), actor.width, self.config.ground_probe);
        solids
            .iter()
            .position(|s| s.can_collide() && aabb_overlap(&probe, &s.bounds(), self.config.tolerance))
    }

    /// Whether a thin probe under the actor's feet touches any solid.
    pub fn is_on_ground<S: Solid>(&self, actor: &Rect, solids: &[S]) -> bool {
        self.ground_under(actor, solids).is_some()
    }

    /// First contact the actor would get after moving by `velocity * dt`,
    /// without changing anything.
    pub fn predict_collision<S: Solid>(
        &self,
        actor: &Rect,
        velocity: Vec2,
        dt: f32,
        solids: &[S],
    ) -> Option<Contact> {
        let next = actor.translated(velocity * dt);
        solids.iter().enumerate().find_map(|(index, solid)| {
            if !solid.can_collide() {
                return None;
            }
            let pen = self.penetration(&next, &solid.bounds())?;
            let side = self.classify(&pen, velocity)?;
            Some(Contact { index, side })
        })
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(CollisionConfig::default())
    }
}

fn apply_side<A: Actor + ?Sized>(actor: &mut A, bounds: &Rect, solid: &Rect, side: Side) {
    match side {
        Side::Top => {
            // Floor-rounded so the actor never rests inside a seam.
            actor.set_y((solid.top() - bounds.height).floor());
            actor.stop_y();
            actor.land();
        }
        Side::Bottom => {
            actor.set_y(solid.bottom().ceil());
            actor.stop_y();
        }
        Side::Left => {
            actor.set_x(solid.left() - bounds.width);
            actor.stop_x();
        }
        Side::Right => {
            actor.set_x(solid.right());
            actor.stop_x();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Box2 {
        rect: Rect,
        vel: Vec2,
        grounded: bool,
    }

    impl Box2 {
        fn new(x: f32, y: f32, w: f32, h: f32, vel: Vec2) -> Self {
            Self {
                rect: Rect::new(x, y, w, h),
                vel,
                grounded: false,
            }
        }
    }

    impl Actor for Box2 {
        fn bounds(&self) -> Rect {
            self.rect
        }
        fn velocity(&self) -> Vec2 {
            self.vel
        }
        fn set_x(&mut self, x: f32) {
            self.rect.x = x;
        }
        fn set_y(&mut self, y: f32) {
            self.rect.y = y;
        }
        fn stop_x(&mut self) {
            self.vel.x = 0.0;
        }
        fn stop_y(&mut self) {
            self.vel.y = 0.0;
        }
        fn land(&mut self) {
            self.grounded = true;
        }
    }

    struct Gone(Rect);

    impl Solid for Gone {
        fn bounds(&self) -> Rect {
            self.0
        }
        fn can_collide(&self) -> bool {
            false
        }
    }

    fn floor() -> Rect {
        Rect::new(0.0, 500.0, 1000.0, 50.0)
    }

    #[test]
    fn lands_on_platform_from_above() {
        let resolver = CollisionResolver::default();
        let mut actor = Box2::new(100.0, 455.0, 32.0, 48.0, Vec2::new(0.0, 300.0));
        let res = resolver.resolve(&mut actor, &[floor()]);

        assert_eq!(res.vertical, Some(Contact { index: 0, side: Side::Top }));
        assert_eq!(res.horizontal, None);
        assert!((actor.rect.bottom() - 500.0).abs() <= 1.0);
        assert_eq!(actor.vel.y, 0.0);
        assert!(actor.grounded);
        assert_eq!(res.landed_on(), Some(0));
    }

    #[test]
    fn bumps_head_on_ceiling() {
        let resolver = CollisionResolver::default();
        let ceiling = Rect::new(0.0, 100.0, 1000.0, 20.0);
        let mut actor = Box2::new(100.0, 115.0, 32.0, 48.0, Vec2::new(0.0, -400.0));
        let contact = resolver.resolve_vertical(&mut actor, &[ceiling]);

        assert_eq!(contact, Some(Contact { index: 0, side: Side::Bottom }));
        assert_eq!(actor.rect.y, 120.0);
        assert_eq!(actor.vel.y, 0.0);
        assert!(!actor.grounded);
    }

    #[test]
    fn wall_stops_horizontal_motion() {
        let resolver = CollisionResolver::default();
        let wall = Rect::new(200.0, 0.0, 40.0, 500.0);
        let mut actor = Box2::new(172.0, 300.0, 32.0, 48.0, Vec2::new(300.0, 0.0));
        let res = resolver.resolve(&mut actor, &[wall]);

        assert_eq!(res.horizontal, Some(Contact { index: 0, side: Side::Left }));
        assert_eq!(actor.rect.x, 168.0);
        assert_eq!(actor.vel.x, 0.0);
        assert_eq!(res.vertical, None);
    }

    #[test]
    fn landing_rejected_while_rising_fast() {
        let resolver = CollisionResolver::default();
        // Feet just inside the top of a thin ledge while moving up quickly.
        let ledge = Rect::new(0.0, 200.0, 300.0, 40.0);
        let mut actor = Box2::new(100.0, 160.0, 32.0, 48.0, Vec2::new(0.0, -500.0));
        assert!(resolver.resolve_vertical(&mut actor, &[ledge]).is_none());
        assert_eq!(actor.rect.y, 160.0);
        assert_eq!(actor.vel.y, -500.0);
    }

    #[test]
    fn seam_between_blocks_does_not_block_walking() {
        let resolver = CollisionResolver::default();
        let blocks = [
            Rect::new(0.0, 500.0, 100.0, 50.0),
            Rect::new(100.0, 500.0, 100.0, 50.0),
        ];
        // Standing on the first block, right edge just entering the second.
        let mut actor = Box2::new(68.1, 452.3, 32.0, 48.0, Vec2::new(300.0, 16.0));
        let res = resolver.resolve(&mut actor, &blocks);
        assert_eq!(res.horizontal, None);
        assert_eq!(actor.vel.x, 300.0);
        assert_eq!(res.vertical.map(|c| c.side), Some(Side::Top));
    }

    #[test]
    fn one_resolution_per_axis() {
        let resolver = CollisionResolver::default();
        let a = Rect::new(0.0, 500.0, 120.0, 50.0);
        let b = Rect::new(110.0, 505.0, 120.0, 50.0);
        let mut actor = Box2::new(100.0, 460.0, 32.0, 48.0, Vec2::new(0.0, 200.0));
        let contact = resolver.resolve_vertical(&mut actor, &[a, b]);
        assert_eq!(contact.map(|c| c.index), Some(0));
    }

    #[test]
    fn non_collidable_solids_are_ignored() {
        let resolver = CollisionResolver::default();
        let gone = [Gone(floor())];
        let mut actor = Box2::new(100.0, 455.0, 32.0, 48.0, Vec2::new(0.0, 300.0));
        assert_eq!(resolver.resolve(&mut actor, &gone), Resolution::default());
        assert!(!resolver.is_on_ground(&actor.rect, &gone));
    }

    #[test]
    fn ground_probe_detects_support() {
        let resolver = CollisionResolver::default();
        let standing = Rect::new(100.0, 452.0, 32.0, 48.0);
        let hovering = Rect::new(100.0, 440.0, 32.0, 48.0);
        let beside = Rect::new(1000.0, 452.0, 32.0, 48.0);
        assert!(resolver.is_on_ground(&standing, &[floor()]));
        assert!(!resolver.is_on_ground(&hovering, &[floor()]));
        assert!(!resolver.is_on_ground(&beside, &[floor()]));
    }

    #[test]
    fn predict_does_not_mutate() {
        let resolver = CollisionResolver::default();
        let actor = Rect::new(100.0, 440.0, 32.0, 48.0);
        let hit = resolver.predict_collision(&actor, Vec2::new(0.0, 900.0), 1.0 / 60.0, &[floor()]);
        assert_eq!(hit, Some(Contact { index: 0, side: Side::Top }));
        let miss = resolver.predict_collision(&actor, Vec2::new(0.0, 60.0), 1.0 / 60.0, &[floor()]);
        assert_eq!(miss, None);
        assert_eq!(actor, Rect::new(100.0, 440.0, 32.0, 48.0));
    }

    #[test]
    fn penetration_requires_overlap() {
        let resolver = CollisionResolver::default();
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(resolver.penetration(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)).is_none());
        let pen = resolver.penetration(&a, &Rect::new(8.0, 5.0, 10.0, 10.0)).unwrap();
        assert_eq!(pen.left, 2.0);
        assert_eq!(pen.top, 5.0);
        assert_eq!(pen.min_x(), 2.0);
    }
}
