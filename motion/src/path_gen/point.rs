//! 2D point type and helpers
//!
//! Points are plain `nalgebra` vectors in meters; this module adds the
//! constructions that path generation leans on (polar points and linear
//! interpolation).

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// TYPES
// ---------------------------------------------------------------------------

/// A 2D point in meters.
pub type Point = Vector2<f64>;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Construct a point from polar coordinates (radius in meters, angle in
/// radians from the positive x axis).
pub fn polar_point(radius_m: f64, angle_rad: f64) -> Point {
    Point::new(radius_m * angle_rad.cos(), radius_m * angle_rad.sin())
}

/// Linear interpolation between two points.
///
/// An `alpha` of 0 returns `start`, 1 returns `end`, values in between lie on
/// the straight line connecting them.
pub fn lerp_point(start: &Point, end: &Point, alpha: f64) -> Point {
    start + (end - start) * alpha
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
