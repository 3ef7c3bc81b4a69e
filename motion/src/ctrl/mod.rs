//! # Feedback control module
//!
//! Generic error-driven output generation, independent of the profiling
//! code. The profile follower drives a [`FeedbackController`] at the
//! target position each tick to correct for tracking error.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod pid;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use pid::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Raised when a controller is given the wrong number of gain values.
#[derive(Debug, thiserror::Error)]
#[error("Expected 3 (P, I, D) or 4 (P, I, D, FF) gain values, got {0}")]
pub struct GainConfigError(pub usize);

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A setpoint-tracking feedback controller.
///
/// The follower talks to its controller through this trait so that the
/// control law can be swapped without touching the profiling code.
pub trait FeedbackController {
    /// Set the gains from a slice of 3 (P, I, D) or 4 (P, I, D, FF) values.
    fn set_gains(&mut self, gains: &[f64]) -> Result<(), GainConfigError>;

    /// Set the target the controller drives towards.
    fn set_setpoint(&mut self, setpoint: f64);

    /// The current target.
    fn setpoint(&self) -> f64;

    /// Compute the output for a new measurement taken `dt_s` seconds after
    /// the previous one.
    fn run(&mut self, measurement: f64, dt_s: f64) -> f64;

    /// Clear integral and derivative memory. Gains and setpoint are
    /// untouched.
    fn reset(&mut self);
}
