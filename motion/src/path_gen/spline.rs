//! Spline interpolation
//!
//! Densifies a sparse ordered waypoint list into a smooth curve which passes
//! through every input waypoint in order, with the curve tangent at each
//! input waypoint aligned to that waypoint's heading. Four curve families
//! are supported, selected by [`SplineMode`]:
//!
//! - Cubic Bézier, evaluated by repeated linear interpolation (de Casteljau)
//!   with guide points placed along the endpoint headings.
//! - Cubic Hermite, closed-form basis functions with heading-derived
//!   tangents.
//! - Quintic Hermite, as cubic but with 5th-order basis functions imposing
//!   zero curvature at segment endpoints. This removes the discontinuous
//!   lateral jerk where chained segments meet, which is why chained paths
//!   default to it.
//! - Catmull-Rom, a Hermite special case (tightness 0.5) whose guide length
//!   at an interior waypoint is clamped to the shorter of its two
//!   neighbouring segments to avoid overshoot at sharp direction changes.
//!
//! Bézier chaining deliberately skips the interior guide-length clamp.
//! Bézier segments cannot have matched second derivatives at joins anyway
//! without giving up control of the endpoint tangent directions, so the
//! clamp would only match guide lengths, not remove the jerk.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::{lerp_point, polar_point, PathGenError, Point, Waypoint};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default number of generated points per curve segment.
pub const DEFAULT_POINTS_PER_CURVE: usize = 100;

/// Catmull-Rom is a Hermite special case with this fixed tightness.
const CATMULL_ROM_TIGHTNESS: f64 = 0.5;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The curve family used to generate curved paths.
///
/// This is a closed set of algorithms, so it's modelled as an enum with
/// dispatch in [`gen_curve`] rather than as a trait hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplineMode {
    Bezier,
    CatmullRom,
    CubicHermite,
    QuinticHermite,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Generate a dense waypoint sequence along a smooth curve through the given
/// input waypoints.
///
/// The returned sequence starts at the first input waypoint and ends at the
/// last, passing through every input waypoint in order. Generated waypoints
/// between inputs carry a zero heading - the alignment pass in
/// [`super::Path`] assigns their true headings afterwards.
///
/// `tightness` (0-1) controls how strongly the endpoint headings pull the
/// curve; it is ignored for Catmull-Rom which fixes it at 0.5.
pub(crate) fn gen_curve(
    mode: SplineMode,
    tightness: f64,
    points_per_curve: usize,
    input: &[Waypoint],
) -> Result<Vec<Waypoint>, PathGenError> {
    if input.len() < 2 {
        return Err(PathGenError::NotEnoughWaypoints(input.len()));
    }

    // Segment lengths between consecutive input waypoints. A zero-length
    // segment has no defined tangent so it aborts generation.
    let mut seg_lengths_m = Vec::with_capacity(input.len() - 1);
    for i in 1..input.len() {
        let length_m = (input[i].position_m - input[i - 1].position_m).norm();
        if length_m <= 0.0 {
            return Err(PathGenError::DegenerateSegment(i - 1, i));
        }
        seg_lengths_m.push(length_m);
    }

    let mut dense = Vec::with_capacity((input.len() - 1) * points_per_curve + 1);
    dense.push(input[0].clone());

    for seg in 0..input.len() - 1 {
        let start = &input[seg];
        let end = &input[seg + 1];

        // Uncorrected guide length for this segment
        let gp_length_m = guide_length(seg_lengths_m[seg], tightness, mode);

        // Catmull-Rom clamps the guide length at an interior waypoint to the
        // shorter of its two neighbouring segments, avoiding loop-like
        // overshoot at sharp direction changes. The other Hermites and
        // Bézier use the uncorrected length (see module docs for Bézier).
        let (start_gp_m, end_gp_m) = match mode {
            SplineMode::CatmullRom => {
                let start_gp_m = match seg {
                    0 => gp_length_m,
                    _ => gp_length_m
                        .min(guide_length(seg_lengths_m[seg - 1], tightness, mode)),
                };
                let end_gp_m = match seg_lengths_m.get(seg + 1) {
                    Some(next_m) => gp_length_m.min(guide_length(*next_m, tightness, mode)),
                    None => gp_length_m,
                };
                (start_gp_m, end_gp_m)
            }
            _ => (gp_length_m, gp_length_m),
        };

        for i in 1..=points_per_curve {
            let s = i as f64 / points_per_curve as f64;

            let position_m = match mode {
                SplineMode::Bezier => cubic_bezier(start, end, start_gp_m, end_gp_m, s),
                SplineMode::CatmullRom | SplineMode::CubicHermite => {
                    cubic_hermite(start, end, start_gp_m, end_gp_m, s)
                }
                SplineMode::QuinticHermite => {
                    quintic_hermite(start, end, start_gp_m, end_gp_m, s)
                }
            };

            dense.push(Waypoint::new(position_m, 0.0));
        }
    }

    // Replace the final generated point with the exact input endpoint so its
    // position and heading are preserved bit-for-bit.
    let last = dense.len() - 1;
    dense[last] = input[input.len() - 1].clone();

    Ok(dense)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Guide vector length for a segment of the given length.
fn guide_length(seg_length_m: f64, tightness: f64, mode: SplineMode) -> f64 {
    let tightness = match mode {
        SplineMode::CatmullRom => CATMULL_ROM_TIGHTNESS,
        _ => tightness,
    };
    seg_length_m / 2.0 * tightness
}

/// Evaluate a cubic Bézier segment at `s` in [0, 1] by de Casteljau's
/// algorithm (three levels of linear interpolation).
fn cubic_bezier(start: &Waypoint, end: &Waypoint, start_gp_m: f64, end_gp_m: f64, s: f64) -> Point {
    // Guide points sit along each endpoint's heading. The end guide point is
    // pulled backwards along the end heading so the curve arrives travelling
    // in the heading direction.
    let gp1 = start.position_m + polar_point(start_gp_m, start.heading_rad);
    let gp2 = end.position_m + polar_point(-end_gp_m, end.heading_rad);

    let p1 = lerp_point(&start.position_m, &gp1, s);
    let p2 = lerp_point(&gp1, &gp2, s);
    let p3 = lerp_point(&gp2, &end.position_m, s);

    let p4 = lerp_point(&p1, &p2, s);
    let p5 = lerp_point(&p2, &p3, s);

    lerp_point(&p4, &p5, s)
}

/// Evaluate a cubic Hermite segment at `s` in [0, 1].
fn cubic_hermite(start: &Waypoint, end: &Waypoint, start_gp_m: f64, end_gp_m: f64, s: f64) -> Point {
    // Heading-derived tangent vectors
    let start_tangent = polar_point(start_gp_m, start.heading_rad);
    let end_tangent = polar_point(end_gp_m, end.heading_rad);

    // The four cubic hermite basis functions:
    //   h1(s) =  2s^3 - 3s^2 + 1
    //   h2(s) = -2s^3 + 3s^2
    //   h3(s) =   s^3 - 2s^2 + s
    //   h4(s) =   s^3 -  s^2
    let b1 = 2.0 * s.powi(3) - 3.0 * s * s + 1.0;
    let b2 = -2.0 * s.powi(3) + 3.0 * s * s;
    let b3 = s.powi(3) - 2.0 * s * s + s;
    let b4 = s.powi(3) - s * s;

    b1 * start.position_m + b2 * end.position_m + b3 * start_tangent + b4 * end_tangent
}

/// Evaluate a quintic Hermite segment at `s` in [0, 1].
///
/// The quintic basis imposes zero second derivative at both endpoints, so
/// chained segments meet with continuous curvature.
fn quintic_hermite(
    start: &Waypoint,
    end: &Waypoint,
    start_gp_m: f64,
    end_gp_m: f64,
    s: f64,
) -> Point {
    let start_tangent = polar_point(start_gp_m, start.heading_rad);
    let end_tangent = polar_point(end_gp_m, end.heading_rad);

    // The quintic hermite basis functions. h2 and h3 weight the endpoint
    // accelerations, which are pinned to zero here, so they drop out:
    //   h0(s) = 1 - 10s^3 + 15s^4 - 6s^5
    //   h1(s) = s - 6s^3 + 8s^4 - 3s^5
    //   h4(s) = -4s^3 + 7s^4 - 3s^5
    //   h5(s) = 10s^3 - 15s^4 + 6s^5
    let b0 = 1.0 - 10.0 * s.powi(3) + 15.0 * s.powi(4) - 6.0 * s.powi(5);
    let b1 = s - 6.0 * s.powi(3) + 8.0 * s.powi(4) - 3.0 * s.powi(5);
    let b4 = -4.0 * s.powi(3) + 7.0 * s.powi(4) - 3.0 * s.powi(5);
    let b5 = 10.0 * s.powi(3) - 15.0 * s.powi(4) + 6.0 * s.powi(5);

    b0 * start.position_m + b1 * start_tangent + b4 * end_tangent + b5 * end.position_m
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    use std::f64::consts::PI;

    const MODES: [SplineMode; 4] = [
        SplineMode::Bezier,
        SplineMode::CatmullRom,
        SplineMode::CubicHermite,
        SplineMode::QuinticHermite,
    ];

    fn wp(x: f64, y: f64, heading_rad: f64) -> Waypoint {
        Waypoint::new(Point::new(x, y), heading_rad)
    }

    #[test]
    fn test_endpoints_exact() {
        for &mode in &MODES {
            let input = vec![wp(0.0, 0.0, 0.0), wp(2.0, 1.0, PI / 2.0)];
            let dense = gen_curve(mode, 0.8, 50, &input).unwrap();

            assert_eq!(dense.len(), 51);
            assert_eq!(dense[0].position_m, input[0].position_m);
            assert_eq!(dense[50].position_m, input[1].position_m);
            assert_eq!(dense[50].heading_rad, input[1].heading_rad);
        }
    }

    #[test]
    fn test_passes_through_via_points() {
        for &mode in &MODES {
            let input = vec![
                wp(0.0, 0.0, 0.0),
                wp(1.0, 1.0, PI / 2.0),
                wp(0.0, 2.0, PI),
            ];
            let dense = gen_curve(mode, 0.8, 40, &input).unwrap();

            assert_eq!(dense.len(), 81);
            // The last point of the first segment is the middle via-point
            let mid = &dense[40].position_m;
            assert!((mid - input[1].position_m).norm() < 1e-9);
        }
    }

    #[test]
    fn test_start_tangent_matches_heading() {
        for &mode in &MODES {
            let heading_rad = PI / 4.0;
            let input = vec![wp(0.0, 0.0, heading_rad), wp(3.0, 0.0, 0.0)];
            let dense = gen_curve(mode, 1.0, 200, &input).unwrap();

            let step = dense[1].position_m - dense[0].position_m;
            let tangent_rad = step.y.atan2(step.x);
            assert!(
                (tangent_rad - heading_rad).abs() < 0.02,
                "mode {:?}: tangent {} != heading {}",
                mode,
                tangent_rad,
                heading_rad
            );
        }
    }

    #[test]
    fn test_not_enough_waypoints() {
        let res = gen_curve(SplineMode::QuinticHermite, 0.8, 10, &[wp(0.0, 0.0, 0.0)]);
        assert!(matches!(res, Err(PathGenError::NotEnoughWaypoints(1))));

        let res = gen_curve(SplineMode::QuinticHermite, 0.8, 10, &[]);
        assert!(matches!(res, Err(PathGenError::NotEnoughWaypoints(0))));
    }

    #[test]
    fn test_degenerate_segment() {
        let input = vec![wp(1.0, 1.0, 0.0), wp(1.0, 1.0, PI)];
        let res = gen_curve(SplineMode::Bezier, 0.8, 10, &input);
        assert!(matches!(res, Err(PathGenError::DegenerateSegment(0, 1))));
    }

    #[test]
    fn test_catmull_rom_guide_clamp() {
        // A long segment followed by a very short one. Without the clamp the
        // interior guide vector of the long segment would overshoot far past
        // the short segment's end.
        let input = vec![
            wp(0.0, 0.0, 0.0),
            wp(10.0, 0.0, PI / 2.0),
            wp(10.0, 0.5, PI / 2.0),
        ];
        let dense = gen_curve(SplineMode::CatmullRom, 0.8, 100, &input).unwrap();

        // No generated point on the second segment should stray further than
        // the short segment's own guide length allows
        let max_y = dense[100..]
            .iter()
            .map(|w| w.position_m.y)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(max_y <= 0.5 + 0.125 + 1e-9, "overshoot to y = {}", max_y);
    }
}
