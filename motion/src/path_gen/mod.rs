//! # Path generation module
//!
//! Path generation turns a sparse ordered list of waypoints (position +
//! heading) into a dense, kinematically consistent centre-line trajectory.
//! Generation runs in four passes, each implemented by a submodule:
//!
//! 1. Spline interpolation ([`spline`]) - densify the waypoint list along a
//!    smooth curve whose tangent at each input waypoint matches that
//!    waypoint's heading.
//! 2. Alignment and cumulative distances ([`path`]) - point each generated
//!    waypoint at its successor and accumulate distance along the path.
//! 3. Velocity assignment ([`velocity`]) - tag every waypoint with a speed
//!    respecting acceleration and cornering limits.
//! 4. Time parameterization ([`timing`]) - integrate distance over average
//!    velocity to give each waypoint a monotonically increasing timestamp.
//!
//! All passes run to completion when the [`Path`] is constructed. Errors
//! abort construction - a malformed path is never returned.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod path;
mod point;
mod spline;
mod timing;
mod velocity;
mod waypoint;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use path::*;
pub use point::*;
pub use spline::*;
pub use velocity::*;
pub use waypoint::*;

pub(crate) use timing::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during path generation.
#[derive(Debug, thiserror::Error)]
pub enum PathGenError {
    /// A path needs at least two input waypoints.
    #[error("Not enough waypoints to make a path (got {0}, need at least 2)")]
    NotEnoughWaypoints(usize),

    /// Two consecutive waypoints are coincident, leaving the heading and arc
    /// contribution of the segment between them undefined.
    #[error("Zero-length segment between waypoints {0} and {1}")]
    DegenerateSegment(usize, usize),

    /// Time parameterization hit a segment with nonzero length but zero
    /// average velocity, which would give an infinite segment time.
    #[error("Zero average velocity over the nonzero-length segment ending at waypoint {0}")]
    ZeroVelocitySegment(usize),

    /// A manually supplied waypoint sequence has decreasing distance or time.
    #[error("Waypoint {0} breaks the non-decreasing distance/time invariant")]
    NonMonotonicWaypoint(usize),
}
