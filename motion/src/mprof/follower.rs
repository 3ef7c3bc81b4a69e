//! Motion profile follower
//!
//! The follower is the per-tick orchestrator of one wheel's motion: it
//! accumulates elapsed run time, queries the wheel's profile for the target
//! (position, velocity) and drives a feedback controller towards that
//! target. It is transient - created when a trajectory starts, discarded
//! when it completes or is cancelled.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;
use serde::Serialize;

// Internal
use super::Profile;
use crate::ctrl::FeedbackController;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Follows one wheel's profile using a feedback controller.
///
/// The profile's positions are relative to the trajectory start; the offset
/// captured by [`Follower::start`] reinterprets them in absolute odometry
/// space, so odometry need not be zeroed between trajectories.
pub struct Follower<C> {
    profile: Profile,
    controller: C,

    /// Absolute wheel position at the instant following began.
    ///
    /// Units: meters
    offset_m: f64,

    /// Time since following began.
    ///
    /// Units: seconds
    elapsed_s: f64,

    /// Extra time past the profile end before the follower reports done,
    /// letting the controller settle onto the final position.
    ///
    /// Units: seconds
    end_time_margin_s: f64,

    /// Output demand added per meter/second of target velocity.
    vel_ff_gain: f64,

    state: FollowerState,
}

/// Per-tick observables returned by [`Follower::tick`].
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FollowerOutput {
    /// The demand to forward to the wheel's actuator.
    pub demand: f64,

    /// Target absolute wheel position this tick.
    ///
    /// Units: meters
    pub target_position_m: f64,

    /// Target wheel velocity this tick.
    ///
    /// Units: meters/second
    pub target_velocity_ms: f64,

    /// Measured minus target position.
    ///
    /// Units: meters
    pub position_error_m: f64,

    /// True once the profile (plus the settle margin) has fully elapsed.
    pub done: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Execution state of a [`Follower`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FollowerState {
    Idle,
    Running,
    Done,
    Canceled,
}

/// Possible errors during profile following.
#[derive(Debug, thiserror::Error)]
pub enum FollowerError {
    /// `tick` is only valid while running.
    #[error("Cannot tick the follower in the {0:?} state")]
    NotRunning(FollowerState),

    /// A non-finite or negative input would corrupt the controller state,
    /// the follower cancels itself instead.
    #[error("Invalid tick input (measured position {measured_pos_m}, dt {dt_s} s)")]
    InvalidTickInput { measured_pos_m: f64, dt_s: f64 },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<C: FeedbackController> Follower<C> {
    /// Create a new follower in the `Idle` state.
    pub fn new(profile: Profile, controller: C, end_time_margin_s: f64, vel_ff_gain: f64) -> Self {
        Self {
            profile,
            controller,
            offset_m: 0.0,
            elapsed_s: 0.0,
            end_time_margin_s,
            vel_ff_gain,
            state: FollowerState::Idle,
        }
    }

    /// Begin following, capturing the wheel's current absolute position.
    pub fn start(&mut self, measured_pos_m: f64) {
        self.offset_m = measured_pos_m;
        self.elapsed_s = 0.0;
        self.controller.reset();
        self.state = FollowerState::Running;
    }

    /// Advance the follower by one control tick.
    ///
    /// Must be called with the same `dt_s` as any sibling follower on the
    /// other wheel, or the two drift out of sync.
    pub fn tick(&mut self, measured_pos_m: f64, dt_s: f64) -> Result<FollowerOutput, FollowerError> {
        if self.state != FollowerState::Running {
            return Err(FollowerError::NotRunning(self.state));
        }

        // Fail safe on garbage input - cancelling beats emitting an
        // uncontrolled demand from a corrupted controller
        if !measured_pos_m.is_finite() || !dt_s.is_finite() || dt_s < 0.0 {
            warn!(
                "Follower cancelling: invalid tick input (measured {}, dt {})",
                measured_pos_m, dt_s
            );
            self.state = FollowerState::Canceled;
            return Err(FollowerError::InvalidTickInput {
                measured_pos_m,
                dt_s,
            });
        }

        self.elapsed_s += dt_s;

        let target = self.profile.interpolate(self.elapsed_s);
        let target_position_m = target.position_m + self.offset_m;

        self.controller.set_setpoint(target_position_m);
        let demand =
            self.controller.run(measured_pos_m, dt_s) + self.vel_ff_gain * target.velocity_ms;

        let done = self.elapsed_s > self.profile.end_time_s() + self.end_time_margin_s;
        if done {
            self.state = FollowerState::Done;
        }

        Ok(FollowerOutput {
            demand,
            target_position_m,
            target_velocity_ms: target.velocity_ms,
            position_error_m: measured_pos_m - target_position_m,
            done,
        })
    }

    /// Stop following immediately.
    ///
    /// The caller is responsible for disabling the actuator's output.
    pub fn cancel(&mut self) {
        self.state = FollowerState::Canceled;
    }

    /// True once the follower has reached the end of its profile.
    pub fn is_done(&self) -> bool {
        self.state == FollowerState::Done
    }

    /// The follower's current state.
    pub fn state(&self) -> FollowerState {
        self.state
    }

    /// The profile being followed.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::ctrl::PidController;
    use crate::mprof::ProfilePoint;

    fn ramp_follower() -> Follower<PidController> {
        let profile = Profile::new(vec![
            ProfilePoint::new(1.0, 0.0, 0.0),
            ProfilePoint::new(1.0, 1.0, 1.0),
            ProfilePoint::new(1.0, 2.0, 2.0),
        ])
        .unwrap();

        Follower::new(profile, PidController::new(1.0, 0.0, 0.0), 0.1, 0.25)
    }

    #[test]
    fn test_tick_requires_running() {
        let mut follower = ramp_follower();

        assert!(matches!(
            follower.tick(0.0, 0.02),
            Err(FollowerError::NotRunning(FollowerState::Idle))
        ));

        follower.start(0.0);
        assert!(follower.tick(0.0, 0.02).is_ok());

        follower.cancel();
        assert!(matches!(
            follower.tick(0.0, 0.02),
            Err(FollowerError::NotRunning(FollowerState::Canceled))
        ));
    }

    #[test]
    fn test_offset_shifts_targets() {
        let mut follower = ramp_follower();

        // Odometry says the wheel is already at 5 m when we start
        follower.start(5.0);

        let out = follower.tick(5.0, 0.5).unwrap();
        assert!((out.target_position_m - 5.5).abs() < 1e-9);
        assert!((out.position_error_m - -0.5).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_feedforward() {
        let mut follower = ramp_follower();
        follower.start(0.0);

        // Wheel tracking perfectly: proportional term is zero and the
        // demand is exactly the velocity feedforward
        let out = follower.tick(0.5, 0.5).unwrap();
        assert!((out.demand - 0.25 * 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_done_after_end_plus_margin() {
        let mut follower = ramp_follower();
        follower.start(0.0);

        let out = follower.tick(0.0, 2.0).unwrap();
        assert!(!out.done);
        assert!(!follower.is_done());

        // 2.15 s elapsed, past the 2.0 s end plus 0.1 s margin
        let out = follower.tick(2.0, 0.15).unwrap();
        assert!(out.done);
        assert!(follower.is_done());
        assert_eq!(follower.state(), FollowerState::Done);
    }

    #[test]
    fn test_invalid_input_cancels() {
        let mut follower = ramp_follower();
        follower.start(0.0);

        assert!(matches!(
            follower.tick(f64::NAN, 0.02),
            Err(FollowerError::InvalidTickInput { .. })
        ));
        assert_eq!(follower.state(), FollowerState::Canceled);
    }

    #[test]
    fn test_restart_resets_elapsed_time() {
        let mut follower = ramp_follower();
        follower.start(0.0);
        follower.tick(0.0, 1.5).unwrap();

        // Restarting rewinds to the profile beginning with a fresh offset
        follower.start(3.0);
        let out = follower.tick(3.0, 0.5).unwrap();
        assert!((out.target_position_m - 3.5).abs() < 1e-9);
    }
}
