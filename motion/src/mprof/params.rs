//! Parameters for the motion profile module

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Motion profile executive parameters
///
/// Loaded with `util::params::load` from `mprof.toml`.
#[derive(Clone, Debug, Deserialize)]
pub struct Params {
    /// Lateral distance between the two wheel tracks.
    ///
    /// Units: meters
    pub track_width_m: f64,

    /// Proportional gain of the per-wheel position controller.
    pub k_p: f64,

    /// Integral gain of the per-wheel position controller.
    pub k_i: f64,

    /// Derivative gain of the per-wheel position controller.
    pub k_d: f64,

    /// Demand added per meter/second of target wheel velocity.
    pub vel_ff_gain: f64,

    /// Time past the profile end before a follower reports done.
    ///
    /// Units: seconds
    pub end_time_margin_s: f64,
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deserialise() {
        let params: Params = toml::from_str(
            r#"
            track_width_m = 0.665
            k_p = 0.8
            k_i = 0.0
            k_d = 0.0
            vel_ff_gain = 0.25
            end_time_margin_s = 0.1
            "#,
        )
        .unwrap();

        assert_eq!(params.track_width_m, 0.665);
        assert_eq!(params.vel_ff_gain, 0.25);
    }
}
