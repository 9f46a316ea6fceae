#[allow(unused_imports)]
use core_maths::CoreFloat;
use core::f64::consts::PI;

use chrono::{Datelike, NaiveDate};

use crate::hour_angle::Unreachable;
use crate::math::{dasin, datan, datan2, dcos, dsin, dtan, normalize_degrees_360};

// ============================================================================
// Constants
// ============================================================================

/// Mean obliquity used by the simplified model, in degrees
const SIMPLIFIED_OBLIQUITY: f64 = 23.44;

/// Days per tropical year used by the simplified model
const SIMPLIFIED_YEAR_LENGTH: f64 = 365.24;

/// Orbital eccentricity used by the simplified model
const SIMPLIFIED_ECCENTRICITY: f64 = 0.0167;

/// Minutes of clock time per degree of hour angle
pub(crate) const MINUTES_PER_DEGREE: f64 = 4.0;

// ============================================================================
// Solar coordinate series
// ============================================================================

/// Geometric mean longitude of the sun, in degrees (0° to 360°).
pub(crate) fn geometric_mean_longitude(julian_century: f64) -> f64 {
    normalize_degrees_360(280.46646 + julian_century * (36000.76983 + julian_century * 0.0003032))
}

/// Geometric mean anomaly of the sun, in degrees (not normalized).
pub(crate) fn geometric_mean_anomaly(julian_century: f64) -> f64 {
    357.52911 + julian_century * (35999.05029 - 0.0001537 * julian_century)
}

pub(crate) fn earth_orbit_eccentricity(julian_century: f64) -> f64 {
    0.016708634 - julian_century * (0.000042037 + 0.0000001267 * julian_century)
}

/// Equation of center: the first three harmonics of the true-minus-mean anomaly.
pub(crate) fn equation_of_center(mean_anomaly: f64, julian_century: f64) -> f64 {
    dsin(mean_anomaly) * (1.914602 - julian_century * (0.004817 + 0.000014 * julian_century))
        + dsin(2.0 * mean_anomaly) * (0.019993 - 0.000101 * julian_century)
        + dsin(3.0 * mean_anomaly) * 0.000289
}

/// Longitude of the moon's ascending node, driving the nutation and aberration terms.
fn ascending_node(julian_century: f64) -> f64 {
    125.04 - 1934.136 * julian_century
}

/// Apparent longitude: true longitude corrected for nutation and aberration.
pub(crate) fn apparent_longitude(true_longitude: f64, julian_century: f64) -> f64 {
    true_longitude - 0.00569 - 0.00478 * dsin(ascending_node(julian_century))
}

/// Mean obliquity of the ecliptic, in degrees.
///
/// The polynomial is in arc-seconds and folded into 23° 26′ by two divisions by 60.
pub(crate) fn mean_obliquity_of_ecliptic(julian_century: f64) -> f64 {
    let seconds = 21.448 - julian_century * (46.815 + julian_century * (0.00059 - julian_century * 0.001813));
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

pub(crate) fn corrected_obliquity(mean_obliquity: f64, julian_century: f64) -> f64 {
    mean_obliquity + 0.00256 * dcos(ascending_node(julian_century))
}

pub(crate) fn radius_vector(eccentricity: f64, true_anomaly: f64) -> f64 {
    (1.000001018 * (1.0 - eccentricity * eccentricity)) / (1.0 + eccentricity * dcos(true_anomaly))
}

pub(crate) fn right_ascension(apparent_longitude: f64, obliquity: f64) -> f64 {
    datan2(dcos(obliquity) * dsin(apparent_longitude), dcos(apparent_longitude))
}

pub(crate) fn declination(obliquity: f64, apparent_longitude: f64) -> f64 {
    dasin(dsin(obliquity) * dsin(apparent_longitude))
}

/// tan²(ε/2), the auxiliary term of the equation of time.
pub(crate) fn var_y(obliquity: f64) -> f64 {
    let half = dtan(obliquity / 2.0);
    half * half
}

/// Equation of time in minutes (apparent minus mean solar time).
pub(crate) fn equation_of_time(var_y: f64, mean_longitude: f64, eccentricity: f64, mean_anomaly: f64) -> f64 {
    let l0 = mean_longitude.to_radians();
    let m = mean_anomaly.to_radians();
    let radians = var_y * (2.0 * l0).sin() - 2.0 * eccentricity * m.sin()
        + 4.0 * eccentricity * var_y * m.sin() * (2.0 * l0).cos()
        - 0.5 * var_y * var_y * (4.0 * l0).sin()
        - 1.25 * eccentricity * eccentricity * (2.0 * m).sin();
    MINUTES_PER_DEGREE * radians.to_degrees()
}

/// Every intermediate quantity of the solar coordinate series for one instant.
///
/// All angles are in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolarCoordinates {
    /// Julian centuries since J2000.0
    pub julian_century: f64,
    /// Geometric mean longitude, normalized to [0, 360)
    pub mean_longitude: f64,
    pub mean_anomaly: f64,
    /// Eccentricity of Earth's orbit (unitless)
    pub eccentricity: f64,
    pub equation_of_center: f64,
    pub true_longitude: f64,
    pub true_anomaly: f64,
    /// Earth-Sun distance in AU
    pub radius_vector: f64,
    pub apparent_longitude: f64,
    pub mean_obliquity: f64,
    pub corrected_obliquity: f64,
    pub right_ascension: f64,
    pub declination: f64,
    /// tan²(ε/2)
    pub var_y: f64,
    /// Minutes
    pub equation_of_time: f64,
}

impl SolarCoordinates {
    pub fn new(julian_century: f64) -> Self {
        let mean_longitude = geometric_mean_longitude(julian_century);
        let mean_anomaly = geometric_mean_anomaly(julian_century);
        let eccentricity = earth_orbit_eccentricity(julian_century);
        let equation_of_center = equation_of_center(mean_anomaly, julian_century);
        let true_longitude = mean_longitude + equation_of_center;
        let true_anomaly = mean_anomaly + equation_of_center;
        let apparent_longitude = apparent_longitude(true_longitude, julian_century);
        let mean_obliquity = mean_obliquity_of_ecliptic(julian_century);
        let corrected_obliquity = corrected_obliquity(mean_obliquity, julian_century);
        let var_y = var_y(corrected_obliquity);
        Self {
            julian_century,
            mean_longitude,
            mean_anomaly,
            eccentricity,
            equation_of_center,
            true_longitude,
            true_anomaly,
            radius_vector: radius_vector(eccentricity, true_anomaly),
            apparent_longitude,
            mean_obliquity,
            corrected_obliquity,
            right_ascension: right_ascension(apparent_longitude, corrected_obliquity),
            declination: declination(corrected_obliquity, apparent_longitude),
            var_y,
            equation_of_time: equation_of_time(var_y, mean_longitude, eccentricity, mean_anomaly),
        }
    }
}

// ============================================================================
// Simplified model
// ============================================================================

/// Equation of time (minutes) and declination (degrees) at local noon of `date`,
/// from the day of the year alone.
///
/// Accurate to roughly half a minute and a few tenths of a degree.
pub(crate) fn simplified_equation_of_time_and_declination(date: NaiveDate) -> (f64, f64) {
    let w = 360.0 / SIMPLIFIED_YEAR_LENGTH;
    let d = f64::from(date.ordinal0()) + 0.5;
    let a = w * (d + 10.0);
    let b = a + 360.0 / PI * SIMPLIFIED_ECCENTRICITY * dsin(w * (d - 2.0));
    let c = (a - datan(dtan(b) / dcos(SIMPLIFIED_OBLIQUITY))) / 180.0;
    let equation_of_time = 720.0 * (c - c.round());
    let declination = -dasin(dsin(SIMPLIFIED_OBLIQUITY) * dcos(b));
    (equation_of_time, declination)
}

// ============================================================================
// Ephemeris
// ============================================================================

/// The solar quantities a day's prayer times are derived from.
///
/// Built once per request at local noon and immutable afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ephemeris {
    pub julian_day: f64,
    pub julian_century: f64,
    /// Apparent solar declination, degrees
    pub declination: f64,
    /// Minutes
    pub equation_of_time: f64,
    /// Hour angle of sunrise and sunset on the request's horizon, degrees
    pub sunrise_hour_angle: Result<f64, Unreachable>,
}
