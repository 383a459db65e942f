//! Math utilities and types
//!
//! Provides the 2D math types used by the simulation core.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Math utility functions
pub mod utils {
    use super::Vec2;

    /// Clamp a value between min and max
    ///
    /// An inverted range (`min > max`) always resolves to `min` instead of
    /// panicking like `f32::clamp`.
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if min > max {
            return min;
        }
        if value < min { min } else if value > max { max } else { value }
    }

    /// Sign of a value, with zero mapping to `1.0`
    pub fn sign(value: f32) -> f32 {
        if value < 0.0 { -1.0 } else { 1.0 }
    }

    /// Normalize a vector, returning `fallback` for a zero-length input
    pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
        let magnitude = v.magnitude();
        if magnitude > 0.0 && magnitude.is_finite() {
            v / magnitude
        } else {
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamp_inverted_range_prefers_min() {
        assert_eq!(utils::clamp(5.0, 3.0, 1.0), 3.0);
        assert_eq!(utils::clamp(0.0, 3.0, 1.0), 3.0);
        assert_eq!(utils::clamp(2.0, 3.0, 1.0), 3.0);
        assert_eq!(utils::clamp(2.0, 0.0, 1.0), 1.0);
        assert_eq!(utils::clamp(-2.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_sign_of_zero_is_positive() {
        assert_eq!(utils::sign(0.0), 1.0);
        assert_eq!(utils::sign(-0.5), -1.0);
    }

    #[test]
    fn test_normalize_or_handles_zero() {
        let fallback = Vec2::new(1.0, 0.0);
        assert_eq!(utils::normalize_or(Vec2::zeros(), fallback), fallback);

        let n = utils::normalize_or(Vec2::new(3.0, 4.0), fallback);
        assert_relative_eq!(n.x, 0.6);
        assert_relative_eq!(n.y, 0.8);
    }
}
