//! Path type and construction pipeline
//!
//! A [`Path`] is the dense, time-stamped, speed-tagged centre-line
//! trajectory produced from a sparse set of input waypoints. Construction
//! runs the full pipeline (spline, alignment, distances, velocities, times)
//! synchronously and either returns a complete, valid path or an error -
//! there is no partially-built state.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::{Deserialize, Serialize};

// Internal
use super::{
    assign_times, assign_velocities, gen_curve, PathGenError, SplineMode, VelocityMode, Waypoint,
    DEFAULT_POINTS_PER_CURVE,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters controlling path generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathConfig {
    /// Maximum velocity of the vehicle centre.
    ///
    /// Units: meters/second
    pub max_vel_ms: f64,

    /// Maximum acceleration of the vehicle centre.
    ///
    /// Units: meters/second^2
    pub max_accel_mss: f64,

    /// Lateral distance between the two wheel tracks, used by the cornering
    /// bound in trapezoidal mode.
    ///
    /// Units: meters
    pub track_width_m: f64,

    /// The velocity profile shape to assign.
    pub velocity_mode: VelocityMode,

    /// The curve family used to interpolate between waypoints.
    pub spline_mode: SplineMode,

    /// Number of generated points per curve segment.
    pub points_per_curve: usize,

    /// How strongly each waypoint's heading pulls the curve (0-1). Chained
    /// paths want some slack here; 1.0 suits simple two-point paths.
    pub tightness: f64,
}

/// A dense, time-stamped, speed-tagged centre-line trajectory.
///
/// Immutable after construction. The waypoint sequence always holds at
/// least two waypoints with non-decreasing distances and times, starting at
/// distance 0 and time 0.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Path {
    waypoints: Vec<Waypoint>,

    /// Total length of the path in meters.
    total_dist_m: f64,

    /// Time at which the vehicle should reach the end of the path, in
    /// seconds.
    total_time_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            max_vel_ms: 2.0,
            max_accel_mss: 3.0,
            track_width_m: 0.665,
            velocity_mode: VelocityMode::Trapezoidal,
            spline_mode: SplineMode::QuinticHermite,
            points_per_curve: DEFAULT_POINTS_PER_CURVE,
            tightness: 0.8,
        }
    }
}

impl Path {
    /// Build a path between two endpoint waypoints.
    pub fn between(
        start: &Waypoint,
        end: &Waypoint,
        config: &PathConfig,
    ) -> Result<Self, PathGenError> {
        Self::chain(&[start.clone(), end.clone()], config)
    }

    /// Build a path through a chain of two or more waypoints, treated as
    /// hard via-points.
    pub fn chain(input: &[Waypoint], config: &PathConfig) -> Result<Self, PathGenError> {
        let mut waypoints = gen_curve(
            config.spline_mode,
            config.tightness,
            config.points_per_curve,
            input,
        )?;

        align_waypoints(&mut waypoints);
        assign_distances(&mut waypoints);
        assign_velocities(
            &mut waypoints,
            config.max_vel_ms,
            config.max_accel_mss,
            config.track_width_m,
            config.velocity_mode,
        );
        assign_times(&mut waypoints)?;

        let path = Self::from_processed(waypoints);

        debug!(
            "Generated path: {} waypoints, {:.3} m, {:.3} s",
            path.num_points(),
            path.total_dist_m,
            path.total_time_s
        );

        Ok(path)
    }

    /// Build a path directly from waypoints which already carry distances,
    /// velocities and times.
    ///
    /// This skips the generation pipeline entirely and only checks the
    /// sequencing invariants. It's intended for hand-built trajectories
    /// such as in-place turns, which have no spline representation.
    pub fn from_waypoints(waypoints: Vec<Waypoint>) -> Result<Self, PathGenError> {
        if waypoints.len() < 2 {
            return Err(PathGenError::NotEnoughWaypoints(waypoints.len()));
        }

        if waypoints[0].dist_along_path_m != 0.0 || waypoints[0].time_s != 0.0 {
            return Err(PathGenError::NonMonotonicWaypoint(0));
        }

        for i in 1..waypoints.len() {
            if waypoints[i].dist_along_path_m < waypoints[i - 1].dist_along_path_m
                || waypoints[i].time_s < waypoints[i - 1].time_s
            {
                return Err(PathGenError::NonMonotonicWaypoint(i));
            }
        }

        Ok(Self::from_processed(waypoints))
    }

    /// Get the waypoint sequence.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Get the number of waypoints in the path.
    pub fn num_points(&self) -> usize {
        self.waypoints.len()
    }

    /// Get the total length of the path in meters.
    pub fn total_dist_m(&self) -> f64 {
        self.total_dist_m
    }

    /// Get the total duration of the path in seconds.
    pub fn total_time_s(&self) -> f64 {
        self.total_time_s
    }

    /// Wrap a fully processed waypoint sequence, deriving the end scalars.
    fn from_processed(waypoints: Vec<Waypoint>) -> Self {
        let last = &waypoints[waypoints.len() - 1];
        let total_dist_m = last.dist_along_path_m;
        let total_time_s = last.time_s;

        Self {
            waypoints,
            total_dist_m,
            total_time_s,
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Point every generated waypoint at its successor.
///
/// The first and last waypoints keep the headings the caller gave them -
/// those are user intent and already shaped the spline tangents.
fn align_waypoints(waypoints: &mut [Waypoint]) {
    for i in 1..waypoints.len() - 1 {
        let target = waypoints[i + 1].position_m;
        waypoints[i].point_towards(&target);
    }
}

/// Accumulate distance along the path into every waypoint.
fn assign_distances(waypoints: &mut [Waypoint]) {
    let mut dist_accum_m = 0.0;
    waypoints[0].dist_along_path_m = 0.0;

    for i in 1..waypoints.len() {
        let step_m = (waypoints[i].position_m - waypoints[i - 1].position_m).norm();
        dist_accum_m += step_m;
        waypoints[i].dist_along_path_m = dist_accum_m;
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::path_gen::Point;

    use std::f64::consts::PI;

    fn wp(x: f64, y: f64, heading_rad: f64) -> Waypoint {
        Waypoint::new(Point::new(x, y), heading_rad)
    }

    #[test]
    fn test_straight_trapezoidal_scenario() {
        // 2.5 m straight line, max velocity 2 m/s, max accel 3 m/s^2. The
        // profile has room to hit the cap and must cruise there.
        let config = PathConfig::default();
        let path = Path::between(&wp(0.0, 0.0, 0.0), &wp(2.5, 0.0, 0.0), &config).unwrap();

        assert!((path.total_dist_m() - 2.5).abs() < 1e-6);

        let peak_ms = path
            .waypoints()
            .iter()
            .map(|w| w.velocity_ms)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((peak_ms - 2.0).abs() < 1e-9);

        // Faster than a full-speed traverse is impossible, slower than
        // double it means the ramps are broken
        assert!(path.total_time_s() > 1.25);
        assert!(path.total_time_s() < 2.5);

        // No waypoint over the cap
        for w in path.waypoints() {
            assert!(w.velocity_ms <= 2.0 + 1e-9);
        }
    }

    #[test]
    fn test_invariants_on_chained_path() {
        let config = PathConfig::default();
        let input = vec![
            wp(0.0, 0.0, 0.0),
            wp(1.5, 0.5, PI / 4.0),
            wp(2.0, 2.0, PI / 2.0),
        ];
        let path = Path::chain(&input, &config).unwrap();

        assert_eq!(path.num_points(), 201);
        assert_eq!(path.waypoints()[0].dist_along_path_m, 0.0);
        assert_eq!(path.waypoints()[0].time_s, 0.0);

        for i in 1..path.num_points() {
            let prev = &path.waypoints()[i - 1];
            let curr = &path.waypoints()[i];
            assert!(curr.dist_along_path_m >= prev.dist_along_path_m);
            assert!(curr.time_s >= prev.time_s);
        }

        assert_eq!(
            path.total_time_s(),
            path.waypoints()[path.num_points() - 1].time_s
        );
    }

    #[test]
    fn test_from_waypoints_validation() {
        // Too few
        assert!(matches!(
            Path::from_waypoints(vec![wp(0.0, 0.0, 0.0)]),
            Err(PathGenError::NotEnoughWaypoints(1))
        ));

        // Decreasing time
        let mut a = wp(0.0, 0.0, 0.0);
        a.time_s = 0.0;
        let mut b = wp(1.0, 0.0, 0.0);
        b.dist_along_path_m = 1.0;
        b.time_s = 1.0;
        let mut c = wp(2.0, 0.0, 0.0);
        c.dist_along_path_m = 2.0;
        c.time_s = 0.5;

        assert!(matches!(
            Path::from_waypoints(vec![a, b, c]),
            Err(PathGenError::NonMonotonicWaypoint(2))
        ));
    }

    #[test]
    fn test_degenerate_input_rejected() {
        let config = PathConfig::default();
        let res = Path::between(&wp(1.0, 1.0, 0.0), &wp(1.0, 1.0, 0.0), &config);
        assert!(matches!(res, Err(PathGenError::DegenerateSegment(0, 1))));
    }

    #[test]
    fn test_path_serialization() {
        // Dump a generated path so it can be plotted offline
        let config = PathConfig::default();
        let path = Path::between(&wp(0.0, 0.0, 0.0), &wp(2.0, 1.0, 0.0), &config).unwrap();

        let path_json = serde_json::to_string_pretty(&path).unwrap();
        let out = std::env::temp_dir().join("test_path.json");
        std::fs::write(&out, &path_json).unwrap();

        let parsed: Path = serde_json::from_str(&path_json).unwrap();
        assert_eq!(parsed.num_points(), path.num_points());
        assert_eq!(parsed.total_time_s(), path.total_time_s());
    }
}
