//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Linear interpolation between two values.
///
/// An `alpha` of 0 returns `a`, an `alpha` of 1 returns `b`. Values outside
/// [0, 1] extrapolate.
pub fn lerp<T>(a: T, b: T, alpha: T) -> T
where
    T: Float,
{
    a + (b - a) * alpha
}

/// Get the signed difference between two angles, wrapped into (-pi, pi].
///
/// The returned value is the shortest rotation taking `from` onto `to`,
/// positive for an anticlockwise rotation.
pub fn wrapped_angle_diff<T>(from: T, to: T) -> T
where
    T: Float,
{
    let pi_t = T::from(std::f64::consts::PI).unwrap();
    let tau_t = T::from(std::f64::consts::TAU).unwrap();

    let mut diff = to - from;

    if diff > pi_t {
        diff = diff - tau_t;
    } else if diff < -pi_t {
        diff = diff + tau_t;
    }

    diff
}

#[cfg(test)]
mod test {
    use super::*;

    const PI: f64 = std::f64::consts::PI;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0f64, 10f64, 0.0), 0.0);
        assert_eq!(lerp(0f64, 10f64, 1.0), 10.0);
        assert_eq!(lerp(2f64, 4f64, 0.5), 3.0);
    }

    #[test]
    fn test_wrapped_angle_diff() {
        assert_eq!(wrapped_angle_diff(1f64, 2f64), 1f64);
        assert_eq!(wrapped_angle_diff(2f64, 1f64), -1f64);

        // Wrapping across the +/-pi boundary takes the short way round
        let diff = wrapped_angle_diff(3.0, -3.0);
        assert!((diff - (2.0 * PI - 6.0)).abs() < 1e-12);

        let diff = wrapped_angle_diff(-3.0, 3.0);
        assert!((diff + (2.0 * PI - 6.0)).abs() < 1e-12);
    }
}
