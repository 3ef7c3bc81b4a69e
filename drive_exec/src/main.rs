//! # Drive Executable
//!
//! Demonstration executive for the motion library: builds a trajectory from
//! the parameter files, derives the per-wheel profiles and follows them
//! against a simulated drivetrain at a fixed 20 ms tick.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Result};
use log::{debug, info};

// Internal
use motion::mprof::{DriveExec, Wheel, WheelActuator, WheelOdometry};
use motion::path_gen::{Path, PathConfig, Point, Waypoint};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Control loop period.
///
/// Units: seconds
const CYCLE_PERIOD_S: f64 = 0.02;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// A perfect velocity-mode drivetrain: each wheel moves at exactly the
/// demanded velocity for a whole cycle.
struct SimDrivetrain {
    positions_m: [f64; 2],
    demands: [f64; 2],
}

/// Odometry readings frozen at the top of a cycle.
struct OdomSnapshot([f64; 2]);

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("drive_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    info!("Drive Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let path_config: PathConfig =
        util::params::load("path_gen.toml").wrap_err("Failed to load path generation parameters")?;
    let mprof_params: motion::mprof::Params =
        util::params::load("mprof.toml").wrap_err("Failed to load motion profile parameters")?;

    info!("Parameters loaded");

    // ---- TRAJECTORY CONSTRUCTION ----

    let path = Path::chain(
        &[
            Waypoint::new(Point::new(0.0, 0.0), 0.0),
            Waypoint::new(Point::new(2.0, 1.0), std::f64::consts::FRAC_PI_4),
            Waypoint::new(Point::new(3.0, 3.0), std::f64::consts::FRAC_PI_2),
        ],
        &path_config,
    )
    .wrap_err("Failed to generate the path")?;

    info!(
        "Path generated: {} waypoints, {:.3} m, {:.3} s",
        path.num_points(),
        path.total_dist_m(),
        path.total_time_s()
    );

    // ---- MAIN LOOP ----

    let mut drivetrain = SimDrivetrain::new();
    let mut exec = DriveExec::new(mprof_params);

    exec.follow_path(&path, false, &OdomSnapshot(drivetrain.positions_m))
        .wrap_err("Failed to start following the path")?;

    info!("Initialisation complete, entering main loop");

    let mut cycle: u64 = 0;

    while !exec.is_done() {
        let odom = OdomSnapshot(drivetrain.positions_m);
        let status = exec
            .tick(&odom, &mut drivetrain, CYCLE_PERIOD_S)
            .wrap_err("Drive tick failed")?;

        drivetrain.step(CYCLE_PERIOD_S);
        cycle += 1;

        if cycle % 25 == 0 {
            debug!(
                "t = {:6.2} s: left err {:+.4} m, right err {:+.4} m",
                cycle as f64 * CYCLE_PERIOD_S,
                status.left.position_error_m,
                status.right.position_error_m
            );
        }
    }

    info!(
        "Path complete after {} cycles: left wheel {:.3} m, right wheel {:.3} m",
        cycle, drivetrain.positions_m[0], drivetrain.positions_m[1]
    );

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl SimDrivetrain {
    fn new() -> Self {
        Self {
            positions_m: [0.0; 2],
            demands: [0.0; 2],
        }
    }

    /// Integrate the wheel positions over one cycle.
    fn step(&mut self, dt_s: f64) {
        for i in 0..2 {
            self.positions_m[i] += self.demands[i] * dt_s;
        }
    }
}

impl WheelActuator for SimDrivetrain {
    fn set_demand(&mut self, wheel: Wheel, demand: f64) {
        self.demands[wheel as usize] = demand;
    }
}

impl WheelOdometry for OdomSnapshot {
    fn position_m(&self, wheel: Wheel) -> f64 {
        self.0[wheel as usize]
    }
}
