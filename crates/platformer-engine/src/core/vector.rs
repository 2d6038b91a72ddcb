//! 2D vector helpers on top of `glam::Vec2`.
//!
//! `Vec2` is `Copy`, so every arithmetic operator already returns a new value
//! and an entity that caches a position (e.g. a hazard platform's spawn point)
//! holds its own copy, never an alias of the live one.

use glam::Vec2;

/// The simulation's vector type.
pub type Vector2 = Vec2;

/// Extra operations used by the simulation's hot paths.
pub trait VectorExt {
    /// Unit vector in the same direction.
    ///
    /// # Panics
    /// Panics on a zero-length vector. That is a logic error in the caller,
    /// not a gameplay state.
    fn normalize_checked(self) -> Vec2;

    /// In-place `self += v * scale`.
    fn add_scaled(&mut self, v: Vec2, scale: f32);

    /// In-place component-wise multiply by a scalar.
    fn scale_mut(&mut self, factor: f32);

    /// Per-component sign, with zero mapping to zero.
    fn sign_or_zero(self) -> Vec2;
}

impl VectorExt for Vec2 {
    fn normalize_checked(self) -> Vec2 {
        let len = self.length();
        assert!(len > 0.0, "cannot normalize a zero-length vector");
        self / len
    }

    #[inline]
    fn add_scaled(&mut self, v: Vec2, scale: f32) {
        self.x += v.x * scale;
        self.y += v.y * scale;
    }

    #[inline]
    fn scale_mut(&mut self, factor: f32) {
        self.x *= factor;
        self.y *= factor;
    }

    fn sign_or_zero(self) -> Vec2 {
        Vec2::new(sign_or_zero(self.x), sign_or_zero(self.y))
    }
}

/// -1, 0 or 1.
#[inline]
pub fn sign_or_zero(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Unit vector for an angle in radians (0 = +X, positive angles rotate toward +Y).
pub fn from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_checked_returns_unit_vector() {
        let v = Vec2::new(3.0, 4.0).normalize_checked();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "zero-length")]
    fn normalize_checked_panics_on_zero() {
        let _ = Vec2::ZERO.normalize_checked();
    }

    #[test]
    fn add_scaled_mutates_in_place() {
        let mut p = Vec2::new(1.0, 1.0);
        p.add_scaled(Vec2::new(2.0, -4.0), 0.5);
        assert_eq!(p, Vec2::new(2.0, -1.0));
    }

    #[test]
    fn copies_do_not_alias() {
        let mut live = Vec2::new(10.0, 20.0);
        let original = live;
        live.y += 5.0;
        assert_eq!(original, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn sign_helpers() {
        assert_eq!(sign_or_zero(-3.0), -1.0);
        assert_eq!(sign_or_zero(0.0), 0.0);
        assert_eq!(Vec2::new(2.0, -0.5).sign_or_zero(), Vec2::new(1.0, -1.0));
    }
}
