//! Velocity assignment
//!
//! Assigns a centre velocity to every waypoint of a dense path given the
//! maximum velocity and acceleration. In trapezoidal mode the velocity is
//! additionally bounded by a cornering limit derived from the track width:
//! during a turn the outer wheel travels an arc on top of the linear
//! distance, so the centre must slow down for the wheel to stay under the
//! maximum velocity.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::Waypoint;
use util::maths::wrapped_angle_diff;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The velocity profile shape to assign along a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityMode {
    /// Every waypoint gets the maximum velocity. No ramping.
    Constant,

    /// Pure accelerate-then-decelerate, never capped at the maximum
    /// velocity.
    Triangular,

    /// Accelerate, cruise at the cap, decelerate. Also applies the
    /// cornering bound. This is the default for chained paths.
    Trapezoidal,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Assign a velocity to every waypoint.
///
/// Waypoints must already carry cumulative distances and aligned headings.
/// The cornering bound in trapezoidal mode is applied uniformly for every
/// spline mode, since it is a safety limit on wheel overspeed.
pub(crate) fn assign_velocities(
    waypoints: &mut [Waypoint],
    max_vel_ms: f64,
    max_accel_mss: f64,
    track_width_m: f64,
    mode: VelocityMode,
) {
    let total_dist_m = waypoints[waypoints.len() - 1].dist_along_path_m;

    match mode {
        VelocityMode::Constant => {
            for wp in waypoints.iter_mut() {
                wp.velocity_ms = max_vel_ms;
            }
        }
        VelocityMode::Triangular => {
            for wp in waypoints.iter_mut() {
                wp.velocity_ms = triangular_bound(
                    wp.dist_along_path_m,
                    total_dist_m,
                    max_accel_mss,
                );
            }
        }
        VelocityMode::Trapezoidal => {
            waypoints[0].velocity_ms = 0.0;

            for i in 1..waypoints.len() {
                let dist_m = waypoints[i].dist_along_path_m;

                // Cornering bound: length of the arc the outermost wheel
                // sweeps over this segment, on top of the linear distance
                let arc_dist_m = track_width_m
                    * wrapped_angle_diff(waypoints[i - 1].heading_rad, waypoints[i].heading_rad)
                        .abs();
                let linear_dist_m = dist_m - waypoints[i - 1].dist_along_path_m;
                let total_wheel_dist_m = arc_dist_m + linear_dist_m;

                // Scale the centre velocity down by the ratio of linear to
                // wheel travel so no wheel exceeds the maximum velocity. A
                // zero total only happens on a degenerate segment, which
                // construction has already rejected.
                let cornering_bound_ms = match total_wheel_dist_m > 0.0 {
                    true => max_vel_ms * linear_dist_m / total_wheel_dist_m,
                    false => max_vel_ms,
                };

                let triangular_ms = triangular_bound(dist_m, total_dist_m, max_accel_mss);

                waypoints[i].velocity_ms = triangular_ms.min(cornering_bound_ms);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Maximum velocity at the given distance for a pure accelerate/decelerate
/// profile, `min(sqrt(2 a d), sqrt(2 a (D - d)))`.
fn triangular_bound(dist_m: f64, total_dist_m: f64, max_accel_mss: f64) -> f64 {
    let accel_vel_ms = (2.0 * max_accel_mss * dist_m).sqrt();
    let decel_vel_ms = (2.0 * max_accel_mss * (total_dist_m - dist_m)).sqrt();
    accel_vel_ms.min(decel_vel_ms)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::path_gen::Point;

    use std::f64::consts::PI;

    /// Build a straight dense path of `n` waypoints with the given spacing
    fn straight_line(n: usize, spacing_m: f64) -> Vec<Waypoint> {
        (0..n)
            .map(|i| {
                let mut wp = Waypoint::new(Point::new(i as f64 * spacing_m, 0.0), 0.0);
                wp.dist_along_path_m = i as f64 * spacing_m;
                wp
            })
            .collect()
    }

    #[test]
    fn test_constant_mode() {
        let mut wps = straight_line(10, 0.1);
        assign_velocities(&mut wps, 1.5, 3.0, 0.7, VelocityMode::Constant);

        assert!(wps.iter().all(|wp| wp.velocity_ms == 1.5));
    }

    #[test]
    fn test_triangular_mode() {
        let mut wps = straight_line(101, 0.01);
        assign_velocities(&mut wps, 2.0, 3.0, 0.7, VelocityMode::Triangular);

        // Zero at both ends, peak in the middle
        assert_eq!(wps[0].velocity_ms, 0.0);
        assert_eq!(wps[100].velocity_ms, 0.0);

        let peak_ms = (2.0f64 * 3.0 * 0.5).sqrt();
        assert!((wps[50].velocity_ms - peak_ms).abs() < 1e-9);
    }

    #[test]
    fn test_trapezoidal_velocity_cap() {
        let mut wps = straight_line(251, 0.01);
        assign_velocities(&mut wps, 2.0, 3.0, 0.7, VelocityMode::Trapezoidal);

        assert_eq!(wps[0].velocity_ms, 0.0);
        for wp in &wps {
            assert!(wp.velocity_ms <= 2.0 + 1e-9);
        }

        // A 2.5 m straight at 3 m/s^2 has room to reach the 2 m/s cap
        let peak_ms = wps
            .iter()
            .map(|wp| wp.velocity_ms)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((peak_ms - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_trapezoidal_cornering_bound() {
        // A tight 90 degree turn spread over a few waypoints. The assigned
        // centre velocity must never imply a wheel velocity above the cap.
        let max_vel_ms = 2.0;
        let track_width_m = 0.7;

        let mut wps: Vec<Waypoint> = Vec::new();
        let n = 20;
        let radius_m = 0.5;
        for i in 0..=n {
            let angle_rad = PI / 2.0 * i as f64 / n as f64;
            let mut wp = Waypoint::new(
                Point::new(radius_m * angle_rad.sin(), radius_m * (1.0 - angle_rad.cos())),
                angle_rad,
            );
            wp.dist_along_path_m = radius_m * angle_rad;
            wps.push(wp);
        }

        assign_velocities(&mut wps, max_vel_ms, 100.0, track_width_m, VelocityMode::Trapezoidal);

        for i in 1..wps.len() {
            let arc_m = track_width_m
                * wrapped_angle_diff(wps[i - 1].heading_rad, wps[i].heading_rad).abs();
            let lin_m = wps[i].dist_along_path_m - wps[i - 1].dist_along_path_m;
            let wheel_vel_ms = wps[i].velocity_ms * (arc_m + lin_m) / lin_m;

            assert!(
                wheel_vel_ms <= max_vel_ms + 1e-9,
                "wheel velocity {} exceeds cap at waypoint {}",
                wheel_vel_ms,
                i
            );
        }
    }
}
