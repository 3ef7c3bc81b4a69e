//! PID + feedforward controller

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::Serialize;

// Internal
use super::{FeedbackController, GainConfigError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PID controller with feedforward on the setpoint.
///
/// Sign convention: error is measurement minus setpoint, so the integral
/// and derivative terms are subtracted from the output - a growing positive
/// error reduces the output, driving the plant back towards the setpoint.
///
/// The feedforward term is computed from the setpoint itself, not the
/// error, so a well-tuned feedforward gain carries most of the demand and
/// leaves the feedback terms to trim residual tracking error.
#[derive(Debug, Serialize, Clone)]
pub struct PidController {
    /// Proportional gain
    k_p: f64,

    /// Integral gain
    k_i: f64,

    /// Derivative gain
    k_d: f64,

    /// Feedforward gain, applied to the setpoint
    k_ff: f64,

    /// The target the controller drives towards
    setpoint: f64,

    /// The integral accumulation
    integral: f64,

    /// Previous error
    prev_error: Option<f64>,

    /// Previous measurement
    prev_measurement: Option<f64>,

    /// If set, the integral is clamped so its contribution to the output
    /// never exceeds this magnitude (anti-windup).
    max_integral_output: Option<f64>,

    /// Differentiate the measurement rather than the error. Avoids a
    /// derivative spike when the setpoint jumps discontinuously.
    derivative_on_measurement: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PidController {
    /// Create a new controller with the given gains and no feedforward.
    pub fn new(k_p: f64, k_i: f64, k_d: f64) -> Self {
        Self::with_feedforward(k_p, k_i, k_d, 0.0)
    }

    /// Create a new controller with the given gains and feedforward gain.
    pub fn with_feedforward(k_p: f64, k_i: f64, k_d: f64, k_ff: f64) -> Self {
        Self {
            k_p,
            k_i,
            k_d,
            k_ff,
            setpoint: 0.0,
            integral: 0.0,
            prev_error: None,
            prev_measurement: None,
            max_integral_output: None,
            derivative_on_measurement: false,
        }
    }

    /// Limit the integral term's contribution to the output (anti-windup).
    pub fn set_max_integral_output(&mut self, max_output: f64) {
        self.max_integral_output = Some(max_output.abs());
    }

    /// Differentiate the measurement instead of the error.
    pub fn set_derivative_on_measurement(&mut self, enabled: bool) {
        self.derivative_on_measurement = enabled;
    }

    /// Log the controller's gains and running state at debug level.
    pub fn log_status(&self) {
        debug!(
            "PID: k_p = {}, k_i = {}, k_d = {}, k_ff = {}, setpoint = {}, integral = {}",
            self.k_p, self.k_i, self.k_d, self.k_ff, self.setpoint, self.integral
        );
    }
}

impl FeedbackController for PidController {
    fn set_gains(&mut self, gains: &[f64]) -> Result<(), GainConfigError> {
        match gains {
            [k_p, k_i, k_d] => {
                self.k_p = *k_p;
                self.k_i = *k_i;
                self.k_d = *k_d;
                Ok(())
            }
            [k_p, k_i, k_d, k_ff] => {
                self.k_p = *k_p;
                self.k_i = *k_i;
                self.k_d = *k_d;
                self.k_ff = *k_ff;
                Ok(())
            }
            _ => Err(GainConfigError(gains.len())),
        }
    }

    fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
    }

    fn setpoint(&self) -> f64 {
        self.setpoint
    }

    fn run(&mut self, measurement: f64, dt_s: f64) -> f64 {
        let error = measurement - self.setpoint;

        // Accumulate the integral term.
        //
        // With no time elapsed there's nothing to integrate over. The other
        // option is to add on the raw error, which produces a large spike in
        // integral compared to normal operation, so we don't do this.
        if dt_s > 0.0 {
            self.integral += error * dt_s;

            // Anti-windup: keep |integral * k_i| within the output limit
            if let Some(max_output) = self.max_integral_output {
                if self.k_i != 0.0 {
                    let limit = max_output / self.k_i.abs();
                    self.integral = self.integral.clamp(-limit, limit);
                }
            }
        }

        // Calculate the derivative, on the error or on the measurement. With
        // no time elapsed or no previous sample we assume no derivative, for
        // the same reasons as for integral.
        let deriv = if dt_s > 0.0 {
            if self.derivative_on_measurement {
                match self.prev_measurement {
                    Some(m) => (measurement - m) / dt_s,
                    None => 0.0,
                }
            } else {
                match self.prev_error {
                    Some(e) => (error - e) / dt_s,
                    None => 0.0,
                }
            }
        } else {
            0.0
        };

        self.prev_error = Some(error);
        self.prev_measurement = Some(measurement);

        self.k_p * error + self.k_ff * self.setpoint - self.k_i * self.integral - self.k_d * deriv
    }

    fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = None;
        self.prev_measurement = None;
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
