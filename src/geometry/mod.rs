//! Pure geometric helpers in image (model) space.
//!
//! Image space has its origin at the top-left corner with `y` growing
//! downwards. Orientations are measured counter-clockwise from the positive
//! x-axis as seen on screen, so an angle of 90 points "up" (towards smaller
//! `y`).

use crate::util::math::{round_deg, sin_cos_deg};

/// Number of quantization buckets in a full turn.
pub const ANGLE_BUCKETS: u32 = 256;

/// Degrees covered by a single quantization bucket.
pub const DEGREES_PER_BUCKET: f64 = 360.0 / ANGLE_BUCKETS as f64;

/// A point in model space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Returns the orientation in whole degrees of the vector `(dx, dy)`.
///
/// `dy` is given in screen space (positive downwards) and is inverted before
/// taking the arctangent. A zero vector yields 0.
pub fn angle_from_vector(dx: f64, dy: f64) -> u16 {
    round_deg((-dy).atan2(dx).to_degrees())
}

/// Maps whole degrees onto one of 256 angle buckets.
pub fn quantize_angle_to_byte(angle: u16) -> u8 {
    let bucket = (f64::from(angle) / 360.0 * f64::from(ANGLE_BUCKETS)).round() as u32;
    (bucket % ANGLE_BUCKETS) as u8
}

/// Maps an angle bucket back to whole degrees in [0, 360).
pub fn dequantize_byte_to_angle(byte: u8) -> u16 {
    let degrees = (f64::from(byte) / f64::from(ANGLE_BUCKETS) * 360.0).round() as u32;
    (degrees % 360) as u16
}

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p1.x - p2.x).hypot(p1.y - p2.y)
}

/// Returns true if `(x, y)` addresses a pixel of a `width` x `height` image.
pub fn in_bounds(x: i64, y: i64, width: u32, height: u32) -> bool {
    x >= 0 && y >= 0 && x < i64::from(width) && y < i64::from(height)
}

/// Returns the tip of an orientation indicator of `length` starting at `origin`.
pub fn orientation_endpoint(origin: Point, angle: u16, length: f64) -> Point {
    let (sin, cos) = sin_cos_deg(f64::from(angle));
    Point::new(origin.x + length * cos, origin.y - length * sin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_from_vector_uses_screen_convention() {
        assert_eq!(angle_from_vector(1.0, 0.0), 0);
        assert_eq!(angle_from_vector(0.0, -1.0), 90);
        assert_eq!(angle_from_vector(-1.0, 0.0), 180);
        assert_eq!(angle_from_vector(0.0, 1.0), 270);
        assert_eq!(angle_from_vector(1.0, -1.0), 45);
        assert_eq!(angle_from_vector(0.0, 0.0), 0);
    }

    #[test]
    fn angle_from_vector_rounds_near_full_turn_to_zero() {
        // atan2 gives about -0.06 degrees, which normalizes to 359.94.
        assert_eq!(angle_from_vector(1000.0, 1.0), 0);
    }

    #[test]
    fn quantization_matches_known_buckets() {
        assert_eq!(quantize_angle_to_byte(0), 0);
        assert_eq!(quantize_angle_to_byte(90), 64);
        assert_eq!(quantize_angle_to_byte(180), 128);
        assert_eq!(quantize_angle_to_byte(359), 255);
        assert_eq!(dequantize_byte_to_angle(64), 90);
        assert_eq!(dequantize_byte_to_angle(255), 359);
        assert_eq!(dequantize_byte_to_angle(16), 23);
    }

    #[test]
    fn bounds_exclude_far_edges() {
        assert!(in_bounds(0, 0, 10, 10));
        assert!(in_bounds(9, 9, 10, 10));
        assert!(!in_bounds(10, 9, 10, 10));
        assert!(!in_bounds(-1, 0, 10, 10));
    }

    #[test]
    fn orientation_endpoint_points_up_at_ninety() {
        let tip = orientation_endpoint(Point::new(10.0, 10.0), 90, 5.0);
        assert!((tip.x - 10.0).abs() < 1e-9);
        assert!((tip.y - 5.0).abs() < 1e-9);
        assert!((distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }
}
