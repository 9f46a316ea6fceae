#[allow(unused_imports)]
use core_maths::CoreFloat;

/// Sine of an angle given in degrees.
pub(crate) fn dsin(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

/// Cosine of an angle given in degrees.
pub(crate) fn dcos(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Tangent of an angle given in degrees.
pub(crate) fn dtan(degrees: f64) -> f64 {
    degrees.to_radians().tan()
}

/// Arcsine returning degrees. NaN outside [-1, 1].
pub(crate) fn dasin(ratio: f64) -> f64 {
    ratio.asin().to_degrees()
}

/// Arccosine returning degrees. NaN outside [-1, 1].
pub(crate) fn dacos(ratio: f64) -> f64 {
    ratio.acos().to_degrees()
}

pub(crate) fn datan(ratio: f64) -> f64 {
    ratio.atan().to_degrees()
}

pub(crate) fn datan2(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Arccotangent returning degrees, in (0, 180).
///
/// Evaluated as `atan2(1, x)` so that `x = 0` yields 90° instead of a division by zero.
pub(crate) fn dacot(ratio: f64) -> f64 {
    datan2(1.0, ratio)
}

/// Normalizes an angle in degrees to the range [0, 360).
pub(crate) fn normalize_degrees_360(degrees: f64) -> f64 {
    let degrees = degrees / 360.0;
    let mut limited = 360.0 * (degrees - degrees.floor());
    if limited < 0.0 {
        limited += 360.0;
    }
    limited
}

/// Wraps a day fraction into [0, 1).
pub(crate) fn normalize_unit_interval(fraction: f64) -> f64 {
    floored_mod(fraction, 1.0)
}

/// Computes the floored modulo operation (Python-style modulo).
///
/// Unlike Rust's `%` operator which can return negative values, this function
/// always returns a non-negative result in the range [0, m).
///
/// # Examples
///
/// ```
/// # fn floored_mod(x: f64, m: f64) -> f64 { ((x % m) + m) % m }
/// assert_eq!(floored_mod(7.0, 3.0), 1.0);
/// assert_eq!(floored_mod(-7.0, 3.0), 2.0);  // Unlike -7 % 3 which would be -1
/// assert_eq!(floored_mod(0.5, 1.0), 0.5);
/// assert_eq!(floored_mod(1.5, 1.0), 0.5);
/// ```
pub(crate) fn floored_mod(x: f64, m: f64) -> f64 {
    ((x % m) + m) % m
}
