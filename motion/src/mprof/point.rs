//! Motion profile point type

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use util::maths::lerp;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single point of one wheel's motion profile.
///
/// Position and velocity are signed: a wheel driving backwards, or the
/// inner wheel of an in-place turn, carries negative values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Signed velocity of the wheel.
    ///
    /// Units: meters/second
    pub velocity_ms: f64,

    /// Signed distance the wheel has travelled since the profile start.
    ///
    /// Units: meters
    pub position_m: f64,

    /// Time at which the wheel should be at this point, from profile start.
    ///
    /// Units: seconds
    pub time_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ProfilePoint {
    pub fn new(velocity_ms: f64, position_m: f64, time_s: f64) -> Self {
        Self {
            velocity_ms,
            position_m,
            time_s,
        }
    }

    /// Linear interpolation between this point and another.
    ///
    /// An `alpha` of 0 returns this point, 1 returns `other`.
    pub fn lerp(&self, other: &Self, alpha: f64) -> Self {
        Self {
            velocity_ms: lerp(self.velocity_ms, other.velocity_ms, alpha),
            position_m: lerp(self.position_m, other.position_m, alpha),
            time_s: lerp(self.time_s, other.time_s, alpha),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lerp() {
        let a = ProfilePoint::new(0.0, 0.0, 0.0);
        let b = ProfilePoint::new(2.0, 1.0, 0.5);

        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), ProfilePoint::new(1.0, 0.5, 0.25));
    }
}
