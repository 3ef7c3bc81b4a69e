//! # Motion library
//!
//! This library plans and executes smooth, time-parameterized trajectories
//! for a two-track (skid-steer) ground vehicle. A sparse sequence of
//! waypoints is densified into a [`path_gen::Path`] by spline interpolation,
//! tagged with velocities and times, and then converted into per-wheel
//! [`mprof::Profile`]s which are tracked in real time by a
//! [`mprof::Follower`] driving a [`ctrl::PidController`].
//!
//! All trajectory construction is one-shot and synchronous - callers must
//! build paths and profiles before commanding motion, never mid-drive.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Feedback controllers - generic error-driven output generation (PID + feedforward)
pub mod ctrl;

/// Motion profiles - per-wheel trajectory derivation, interpolation and following
pub mod mprof;

/// Path generation - spline interpolation, velocity profiling and time parameterization
pub mod path_gen;
