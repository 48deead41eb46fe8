//! 2D math primitives using glam, plus the easing curves the clips are built from.

pub use glam::Vec2;

use std::f32::consts::PI;

/// Small epsilon value for floating-point comparisons
pub const EPSILON: f32 = 1e-6;

/// Overshoot constant of the classic "back" easing family
const BACK_OVERSHOOT: f32 = 1.70158;

/// Sine ease in/out: slow start, slow end.
#[inline]
pub fn ease_in_out_sine(t: f32) -> f32 {
    -((PI * t.clamp(0.0, 1.0)).cos() - 1.0) / 2.0
}

/// Back ease in: dips slightly below 0 before accelerating towards 1.
#[inline]
pub fn ease_in_back(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let c3 = BACK_OVERSHOOT + 1.0;
    c3 * t * t * t - BACK_OVERSHOOT * t * t
}

#[inline]
pub fn ease_in_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Rise-and-return arc: 0 at both ends, 1 in the middle.
#[inline]
pub fn arc(t: f32) -> f32 {
    (PI * t.clamp(0.0, 1.0)).sin()
}

/// Rotate a vector counter-clockwise by `angle` radians.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        assert!(ease_in_out_sine(0.0).abs() < 1e-6);
        assert!((ease_in_out_sine(1.0) - 1.0).abs() < 1e-6);
        assert!((ease_in_out_sine(0.5) - 0.5).abs() < 1e-6);
        assert!(ease_in_back(0.0).abs() < 1e-6);
        assert!((ease_in_back(1.0) - 1.0).abs() < 1e-5);
        assert!(arc(0.0).abs() < 1e-6 && arc(1.0).abs() < 1e-6);
    }

    #[test]
    fn test_back_ease_overshoots_below_zero() {
        assert!(ease_in_back(0.2) < 0.0, "back ease should anticipate");
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let r = rotate(Vec2::X, PI / 2.0);
        assert!(r.distance(Vec2::Y) < 1e-6);
    }
}
