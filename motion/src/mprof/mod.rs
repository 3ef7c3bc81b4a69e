//! # Motion profile module
//!
//! Converts a centre-line [`crate::path_gen::Path`] into per-wheel motion
//! profiles and tracks them in real time:
//!
//! - [`wheel`]: derives one wheel's (time, position, velocity) trajectory
//!   from the path and the wheel's signed lateral offset, accounting for the
//!   extra arc length an offset wheel travels during a turn.
//! - [`profile`]: time-indexed interpolation over the derived points, with
//!   a last-lookup-index cache exploiting the temporal locality of periodic
//!   control-loop queries.
//! - [`follower`]: the per-tick state machine which reads elapsed run time,
//!   queries the profile and drives a feedback controller at the target.
//! - [`drive`]: coordinates the left/right follower pair against the
//!   drivetrain actuator and odometry collaborators.
//!
//! Profile construction is one-shot and must complete before motion begins;
//! only [`Follower::tick`] is designed to run inside the control loop.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod drive;
mod follower;
mod params;
mod point;
mod profile;
mod wheel;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use drive::*;
pub use follower::*;
pub use params::*;
pub use point::*;
pub use profile::*;
pub use wheel::*;
