//! Per-wheel profile derivation
//!
//! A skid-steer vehicle turns by driving its two tracks at different speeds.
//! When the centre of the vehicle follows a curved path a wheel offset to
//! one side travels further (outer) or less far (inner) than the centre
//! does, by the arc its offset sweeps through the heading change. This
//! module converts a centre-line path into the (time, position, velocity)
//! trajectory of a single offset wheel.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::{Profile, ProfileError, ProfilePoint};
use crate::path_gen::Path;
use util::maths::wrapped_angle_diff;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Derives one wheel's motion profile from a centre-line path.
#[derive(Clone, Copy, Debug)]
pub struct SkidSteerGenerator {
    /// Signed lateral offset of the wheel from the vehicle centre, positive
    /// to the right.
    ///
    /// Units: meters
    pub right_offset_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SkidSteerGenerator {
    pub fn new(right_offset_m: f64) -> Self {
        Self { right_offset_m }
    }

    /// Generate this wheel's profile for the given path.
    ///
    /// Walks the path waypoints pairwise. Each segment contributes the
    /// centre's linear distance plus the signed arc this wheel sweeps
    /// through the segment's heading change (positive heading change turns
    /// left, carrying a right-offset wheel forwards and a left-offset wheel
    /// backwards). Velocity is the segment's wheel travel over the
    /// segment's duration.
    ///
    /// If `backwards` the vehicle drives the same path in reverse, so the
    /// wheel's velocity and accumulated position are negated.
    pub fn gen_profile(&self, path: &Path, backwards: bool) -> Result<Profile, ProfileError> {
        let waypoints = path.waypoints();
        let mut points = Vec::with_capacity(waypoints.len());

        // Velocity at index 0 is back-filled from index 1 once it exists,
        // no distance has elapsed yet to compute a rate from.
        points.push(ProfilePoint::new(0.0, 0.0, 0.0));

        let mut position_m = 0.0;

        for i in 1..waypoints.len() {
            let prev = &waypoints[i - 1];
            let curr = &waypoints[i];

            let delta_heading_rad = wrapped_angle_diff(prev.heading_rad, curr.heading_rad);
            let arc_dist_m = self.right_offset_m * delta_heading_rad;
            let linear_dist_m = curr.dist_along_path_m - prev.dist_along_path_m;
            let wheel_dist_m = arc_dist_m + linear_dist_m;

            position_m += wheel_dist_m;

            let delta_time_s = curr.time_s - prev.time_s;
            let velocity_ms = if delta_time_s > 0.0 {
                wheel_dist_m / delta_time_s
            } else {
                0.0
            };

            points.push(ProfilePoint::new(velocity_ms, position_m, curr.time_s));
        }

        points[0].velocity_ms = points[1].velocity_ms;

        if backwards {
            for point in points.iter_mut() {
                point.velocity_ms = -point.velocity_ms;
                point.position_m = -point.position_m;
            }
        }

        Profile::new(points)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Generate the left and right wheel profiles for a path.
///
/// The wheels sit at `∓track_width_m / 2` from the vehicle centre.
pub fn wheel_profiles(
    path: &Path,
    track_width_m: f64,
    backwards: bool,
) -> Result<(Profile, Profile), ProfileError> {
    let left = SkidSteerGenerator::new(-track_width_m / 2.0).gen_profile(path, backwards)?;
    let right = SkidSteerGenerator::new(track_width_m / 2.0).gen_profile(path, backwards)?;

    Ok((left, right))
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::path_gen::{Path, PathConfig, Point, Waypoint};

    use std::f64::consts::PI;

    fn wp(x: f64, y: f64, heading_rad: f64) -> Waypoint {
        Waypoint::new(Point::new(x, y), heading_rad)
    }

    fn curved_path() -> Path {
        let config = PathConfig::default();
        Path::chain(
            &[
                wp(0.0, 0.0, 0.0),
                wp(1.5, 0.5, PI / 4.0),
                wp(2.0, 2.0, PI / 2.0),
            ],
            &config,
        )
        .unwrap()
    }

    #[test]
    fn test_straight_path_wheels_match_centre() {
        let config = PathConfig::default();
        let path = Path::between(&wp(0.0, 0.0, 0.0), &wp(2.0, 0.0, 0.0), &config).unwrap();

        let (left, right) = wheel_profiles(&path, 0.7, false).unwrap();

        // No heading change anywhere, both wheels travel the centre distance
        assert!((left.end().position_m - path.total_dist_m()).abs() < 1e-6);
        assert!((right.end().position_m - path.total_dist_m()).abs() < 1e-6);
    }

    #[test]
    fn test_cornering_keeps_wheels_under_cap() {
        let config = PathConfig::default();
        let path = curved_path();

        let (left, right) = wheel_profiles(&path, config.track_width_m, false).unwrap();

        // The trapezoidal cornering bound scales the centre velocity so no
        // wheel overspeeds. Per-point velocities come from averaged segment
        // timing, so allow a small discretization slack over the cap.
        let cap_ms = config.max_vel_ms * 1.05;
        for point in left.points().iter().chain(right.points().iter()) {
            assert!(
                point.velocity_ms.abs() <= cap_ms,
                "wheel velocity {} exceeds cap",
                point.velocity_ms
            );
        }
    }

    #[test]
    fn test_backwards_is_pure_negation() {
        let path = curved_path();
        let gen = SkidSteerGenerator::new(0.35);

        let fwd = gen.gen_profile(&path, false).unwrap();
        let bwd = gen.gen_profile(&path, true).unwrap();

        assert_eq!(fwd.points().len(), bwd.points().len());
        for (f, b) in fwd.points().iter().zip(bwd.points().iter()) {
            assert_eq!(b.velocity_ms, -f.velocity_ms);
            assert_eq!(b.position_m, -f.position_m);
            assert_eq!(b.time_s, f.time_s);
        }
    }

    #[test]
    fn test_in_place_rotation() {
        // Hand-built 180 degree turn on the spot over 2 seconds, no centre
        // travel. Each wheel sweeps half the track circumference, in
        // opposite directions.
        let mut start = wp(0.0, 0.0, 0.0);
        start.velocity_ms = 0.5;
        let mut end = wp(0.0, 0.0, PI);
        end.velocity_ms = 0.5;
        end.time_s = 2.0;

        let path = Path::from_waypoints(vec![start, end]).unwrap();
        let (left, right) = wheel_profiles(&path, 0.7, false).unwrap();

        // Heading difference of exactly pi wraps to +pi
        assert!((right.end().position_m - 0.35 * PI).abs() < 1e-9);
        assert!((left.end().position_m + 0.35 * PI).abs() < 1e-9);

        assert!(right.end().velocity_ms > 0.0);
        assert!(left.end().velocity_ms < 0.0);
        assert!((right.end().velocity_ms + left.end().velocity_ms).abs() < 1e-9);
    }

    #[test]
    fn test_first_point_velocity_copied() {
        let path = curved_path();
        let profile = SkidSteerGenerator::new(0.35)
            .gen_profile(&path, false)
            .unwrap();

        assert_eq!(
            profile.points()[0].velocity_ms,
            profile.points()[1].velocity_ms
        );
        assert_eq!(profile.points()[0].position_m, 0.0);
        assert_eq!(profile.points()[0].time_s, 0.0);
    }
}
