//! Two-wheel drive coordination
//!
//! Owns the left/right follower pair for one trajectory execution and
//! speaks to the drivetrain through the actuator and odometry traits. The
//! sequencing layer builds a path, hands it over with `follow_path`, then
//! ticks the executive once per control cycle and polls `is_done`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;
use serde::Serialize;

// Internal
use super::{wheel_profiles, Follower, FollowerError, FollowerOutput, Params, ProfileError};
use crate::ctrl::PidController;
use crate::path_gen::Path;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive executive coordinating the two wheel followers.
pub struct DriveExec {
    params: Params,
    followers: Option<FollowerPair>,
}

/// Per-tick observables for both wheels.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct DriveStatus {
    pub left: FollowerOutput,
    pub right: FollowerOutput,

    /// True once both wheels have completed their profiles.
    pub done: bool,
}

struct FollowerPair {
    left: Follower<PidController>,
    right: Follower<PidController>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The two wheel tracks of the vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Wheel {
    Left,
    Right,
}

/// Possible errors raised by the drive executive.
#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    /// A tick arrived with no trajectory loaded.
    #[error("No trajectory is being followed")]
    NoActivePath,

    /// Wheel profile derivation failed.
    #[error("Could not derive a wheel profile: {0}")]
    ProfileError(#[from] ProfileError),

    /// A wheel follower rejected the tick.
    #[error("Wheel follower failed: {0}")]
    FollowerError(#[from] FollowerError),
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Drivetrain output capability.
pub trait WheelActuator {
    /// Command a wheel's demand (interpretation is up to the drivetrain,
    /// typically raw power or target velocity).
    fn set_demand(&mut self, wheel: Wheel, demand: f64);
}

/// Drivetrain odometry capability.
pub trait WheelOdometry {
    /// Linear distance a wheel has travelled since the drivetrain's last
    /// reset.
    ///
    /// Units: meters
    fn position_m(&self, wheel: Wheel) -> f64;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveExec {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            followers: None,
        }
    }

    /// Begin following a path, replacing any trajectory already loaded.
    ///
    /// Both wheel profiles are derived up front and each follower captures
    /// its wheel's current odometry as the position offset.
    pub fn follow_path(
        &mut self,
        path: &Path,
        backwards: bool,
        odometry: &impl WheelOdometry,
    ) -> Result<(), DriveError> {
        let (left_profile, right_profile) =
            wheel_profiles(path, self.params.track_width_m, backwards)?;

        let controller = self.controller();
        controller.log_status();

        let mut left = Follower::new(
            left_profile,
            controller.clone(),
            self.params.end_time_margin_s,
            self.params.vel_ff_gain,
        );
        let mut right = Follower::new(
            right_profile,
            controller,
            self.params.end_time_margin_s,
            self.params.vel_ff_gain,
        );

        left.start(odometry.position_m(Wheel::Left));
        right.start(odometry.position_m(Wheel::Right));

        info!(
            "Following new path: {:.3} m, {:.3} s{}",
            path.total_dist_m(),
            path.total_time_s(),
            if backwards { ", backwards" } else { "" }
        );

        self.followers = Some(FollowerPair { left, right });

        Ok(())
    }

    /// Advance both wheels by one control tick and command the actuator.
    ///
    /// Both followers see the same `dt_s` so they stay synchronized. If
    /// either wheel fails the whole drive stops and the actuator is zeroed.
    pub fn tick(
        &mut self,
        odometry: &impl WheelOdometry,
        actuator: &mut impl WheelActuator,
        dt_s: f64,
    ) -> Result<DriveStatus, DriveError> {
        let pair = self.followers.as_mut().ok_or(DriveError::NoActivePath)?;

        let tick_result = (|| -> Result<DriveStatus, FollowerError> {
            let left = pair.left.tick(odometry.position_m(Wheel::Left), dt_s)?;
            let right = pair.right.tick(odometry.position_m(Wheel::Right), dt_s)?;
            Ok(DriveStatus {
                left,
                right,
                done: left.done && right.done,
            })
        })();

        let status = match tick_result {
            Ok(s) => s,
            Err(e) => {
                self.abort(actuator);
                return Err(e.into());
            }
        };

        actuator.set_demand(Wheel::Left, status.left.demand);
        actuator.set_demand(Wheel::Right, status.right.demand);

        if status.done {
            actuator.set_demand(Wheel::Left, 0.0);
            actuator.set_demand(Wheel::Right, 0.0);
        }

        Ok(status)
    }

    /// True once both wheels have completed their profiles.
    pub fn is_done(&self) -> bool {
        match &self.followers {
            Some(pair) => pair.left.is_done() && pair.right.is_done(),
            None => false,
        }
    }

    /// Stop following immediately and zero the actuator demands.
    pub fn abort(&mut self, actuator: &mut impl WheelActuator) {
        if let Some(pair) = &mut self.followers {
            pair.left.cancel();
            pair.right.cancel();
        }
        self.followers = None;

        actuator.set_demand(Wheel::Left, 0.0);
        actuator.set_demand(Wheel::Right, 0.0);
    }

    fn controller(&self) -> PidController {
        PidController::new(self.params.k_p, self.params.k_i, self.params.k_d)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
