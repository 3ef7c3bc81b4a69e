//! Waypoint type
//!
//! A waypoint holds a position and heading, and once processed by path
//! generation also a cumulative distance, velocity and time. The heading is
//! authoritative only on input waypoints, where it expresses user intent -
//! generated waypoints get their headings assigned by the alignment pass.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::Point;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A point on a path with heading, and (after processing) cumulative
/// distance, velocity and time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Waypoint {
    /// Position of the waypoint.
    ///
    /// Units: meters
    pub position_m: Point,

    /// Heading, the angle to the positive x axis of the tangent direction of
    /// travel at this waypoint.
    ///
    /// Units: radians
    pub heading_rad: f64,

    /// Cumulative distance along the path from the path start.
    ///
    /// Units: meters
    pub dist_along_path_m: f64,

    /// Velocity of the vehicle's centre at this waypoint.
    ///
    /// Units: meters/second
    pub velocity_ms: f64,

    /// Time at which the vehicle should reach this waypoint, measured from
    /// the start of the path.
    ///
    /// Units: seconds
    pub time_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Waypoint {
    /// Create a new waypoint from a position and heading.
    ///
    /// Distance, velocity and time start at zero and are filled in by path
    /// generation.
    pub fn new(position_m: Point, heading_rad: f64) -> Self {
        Self {
            position_m,
            heading_rad,
            dist_along_path_m: 0.0,
            velocity_ms: 0.0,
            time_s: 0.0,
        }
    }

    /// Rotate this waypoint's heading so it points at the given target,
    /// returning the new heading.
    pub fn point_towards(&mut self, target: &Point) -> f64 {
        let offset = target - self.position_m;
        self.heading_rad = offset.y.atan2(offset.x);
        self.heading_rad
    }

    /// Return a copy of this waypoint facing the opposite direction.
    pub fn backwards(&self) -> Self {
        Self {
            heading_rad: self.heading_rad + std::f64::consts::PI,
            ..self.clone()
        }
    }

    /// Translate the waypoint by the given offset.
    pub fn translate(&mut self, offset_m: &Point) {
        self.position_m += *offset_m;
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    use std::f64::consts::PI;

    #[test]
    fn test_point_towards() {
        let mut wp = Waypoint::new(Point::new(1.0, 1.0), 0.0);

        assert!((wp.point_towards(&Point::new(2.0, 1.0)) - 0.0).abs() < 1e-12);
        assert!((wp.point_towards(&Point::new(1.0, 2.0)) - PI / 2.0).abs() < 1e-12);
        assert!((wp.point_towards(&Point::new(0.0, 1.0)).abs() - PI).abs() < 1e-12);
        assert!((wp.point_towards(&Point::new(1.0, 0.0)) + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_translate() {
        let mut wp = Waypoint::new(Point::new(1.0, -2.0), 0.5);
        wp.translate(&Point::new(0.5, 3.0));

        assert_eq!(wp.position_m, Point::new(1.5, 1.0));
        assert_eq!(wp.heading_rad, 0.5);
    }

    #[test]
    fn test_backwards() {
        let wp = Waypoint::new(Point::new(0.5, -0.5), 0.25);
        let back = wp.backwards();

        assert_eq!(back.position_m, wp.position_m);
        assert!((back.heading_rad - (0.25 + PI)).abs() < 1e-12);
    }
}
