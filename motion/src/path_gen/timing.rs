//! Time parameterization
//!
//! Converts distance and velocity assignments into monotonically increasing
//! timestamps by trapezoidal-average integration: the time between two
//! waypoints is the distance between them divided by their average velocity.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::{PathGenError, Waypoint};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Assign a time to every waypoint.
///
/// Waypoints must already carry distances and velocities. A segment with
/// nonzero length but zero average velocity has an undefined (infinite)
/// duration and fails with [`PathGenError::ZeroVelocitySegment`] rather than
/// letting a NaN or infinity propagate into the path.
pub(crate) fn assign_times(waypoints: &mut [Waypoint]) -> Result<(), PathGenError> {
    waypoints[0].time_s = 0.0;

    for i in 1..waypoints.len() {
        let dist_m = waypoints[i].dist_along_path_m - waypoints[i - 1].dist_along_path_m;
        let avg_vel_ms = (waypoints[i].velocity_ms + waypoints[i - 1].velocity_ms) / 2.0;

        let delta_time_s = if avg_vel_ms > 0.0 {
            dist_m / avg_vel_ms
        } else if dist_m == 0.0 {
            // Coincident waypoints take no time to traverse
            0.0
        } else {
            return Err(PathGenError::ZeroVelocitySegment(i));
        };

        waypoints[i].time_s = waypoints[i - 1].time_s + delta_time_s;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::path_gen::Point;

    fn wp(dist_m: f64, vel_ms: f64) -> Waypoint {
        let mut wp = Waypoint::new(Point::new(dist_m, 0.0), 0.0);
        wp.dist_along_path_m = dist_m;
        wp.velocity_ms = vel_ms;
        wp
    }

    #[test]
    fn test_times_monotonic() {
        let mut wps = vec![wp(0.0, 0.0), wp(0.5, 1.0), wp(1.0, 1.0), wp(1.5, 0.5)];
        assign_times(&mut wps).unwrap();

        assert_eq!(wps[0].time_s, 0.0);
        for i in 1..wps.len() {
            assert!(wps[i].time_s > wps[i - 1].time_s);
        }

        // First segment: 0.5 m at an average of 0.5 m/s is one second
        assert!((wps[1].time_s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_velocity_segment_rejected() {
        let mut wps = vec![wp(0.0, 0.0), wp(0.5, 0.0)];
        let res = assign_times(&mut wps);
        assert!(matches!(res, Err(PathGenError::ZeroVelocitySegment(1))));
    }

    #[test]
    fn test_zero_length_zero_velocity_allowed() {
        // Coincident waypoints with zero velocity are fine, the segment just
        // contributes no time
        let mut wps = vec![wp(0.0, 0.0), wp(0.0, 0.0), wp(0.5, 1.0)];
        assign_times(&mut wps).unwrap();
        assert_eq!(wps[1].time_s, 0.0);
    }
}
