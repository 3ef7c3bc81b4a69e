//! Wheel profile storage and time-indexed interpolation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;
use std::cell::Cell;

// Internal
use super::ProfilePoint;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// One wheel's derived (time, position, velocity) trajectory.
///
/// Read-only once built. Interpolation queries arrive from a periodic
/// control loop with slowly increasing time, so the lookup remembers where
/// the previous query landed and resumes the search there - amortised O(1)
/// instead of a scan from the front. The cache is a pure search hint and
/// never changes the returned value; it lives in a [`Cell`] under the
/// single-threaded control-tick model (this type is deliberately not
/// `Sync`).
#[derive(Debug, Serialize)]
pub struct Profile {
    points: Vec<ProfilePoint>,

    /// Index of the lower bounding point found by the previous lookup.
    #[serde(skip)]
    last_lower_index: Cell<usize>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors in building a wheel profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// A profile needs at least two points to interpolate between.
    #[error("Useless motion profile - less than 2 points (got {0})")]
    TooFewPoints(usize),

    /// Point times must strictly increase for time lookup to be defined.
    #[error("Profile point {0} does not strictly increase in time")]
    NonMonotonicTime(usize),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Profile {
    /// Build a profile from its points.
    ///
    /// The points must start at time 0 and strictly increase in time.
    pub fn new(points: Vec<ProfilePoint>) -> Result<Self, ProfileError> {
        if points.len() < 2 {
            return Err(ProfileError::TooFewPoints(points.len()));
        }

        if points[0].time_s != 0.0 {
            return Err(ProfileError::NonMonotonicTime(0));
        }

        for i in 1..points.len() {
            if points[i].time_s <= points[i - 1].time_s {
                return Err(ProfileError::NonMonotonicTime(i));
            }
        }

        Ok(Self {
            points,
            last_lower_index: Cell::new(0),
        })
    }

    /// Get the interpolated profile point at the given time.
    ///
    /// Times at or before 0 return the first point exactly, times at or
    /// beyond the end time return the last point exactly. In between, the
    /// two bounding points are blended linearly.
    pub fn interpolate(&self, time_s: f64) -> ProfilePoint {
        // A NaN query fails every bound check and would wedge the search
        // below, treat it like a pre-start query
        if time_s.is_nan() || time_s <= 0.0 {
            return *self.start();
        }
        if time_s >= self.end_time_s() {
            return *self.end();
        }

        // Resume the search from the previous lookup's window. The wrap
        // guards against a stale cache from a query earlier in time - the
        // walk is deterministic and always lands inside the array because
        // the checks above pinned time_s strictly inside (0, end).
        let mut upper = self.last_lower_index.get() + 1;
        if upper >= self.points.len() {
            upper = 1;
        }

        while !(self.points[upper - 1].time_s <= time_s && time_s < self.points[upper].time_s) {
            upper += 1;
            if upper >= self.points.len() {
                upper = 1;
            }
        }

        let lower = upper - 1;
        self.last_lower_index.set(lower);

        let lower_point = &self.points[lower];
        let upper_point = &self.points[upper];

        let alpha = (time_s - lower_point.time_s) / (upper_point.time_s - lower_point.time_s);

        lower_point.lerp(upper_point, alpha)
    }

    /// The first point of the profile.
    pub fn start(&self) -> &ProfilePoint {
        &self.points[0]
    }

    /// The last point of the profile.
    pub fn end(&self) -> &ProfilePoint {
        &self.points[self.points.len() - 1]
    }

    /// The time of the last point, in seconds.
    pub fn end_time_s(&self) -> f64 {
        self.end().time_s
    }

    /// Get the profile's points.
    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
