#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::math::{dacos, dcos, dsin, dtan, normalize_degrees_360};
use crate::solar::MINUTES_PER_DEGREE;
use crate::time::MINUTES_PER_DAY;

/// Position of the sun in the observer's sky at one clock time.
///
/// All angles are in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolarPosition {
    /// Apparent solar time, minutes past true midnight
    pub true_solar_time: f64,
    /// Signed hour angle, negative before solar noon
    pub hour_angle: f64,
    /// Angle from the zenith (0 = overhead, 90 = geometric horizon)
    pub zenith: f64,
    /// Geometric elevation above the horizon
    pub elevation: f64,
    /// Approximate atmospheric refraction at that elevation
    pub refraction: f64,
    /// Elevation as seen through the atmosphere
    pub apparent_elevation: f64,
    /// Clockwise from north (0 = N, 90 = E)
    pub azimuth: f64,
}

impl SolarPosition {
    pub(crate) fn new(
        time_of_day: f64,
        latitude: f64,
        longitude: f64,
        utc_offset_hours: f64,
        declination: f64,
        equation_of_time: f64,
    ) -> Self {
        let true_solar_time = true_solar_time(time_of_day, equation_of_time, longitude, utc_offset_hours);
        let hour_angle = hour_angle_from_true_solar_time(true_solar_time);
        let zenith = zenith_angle(latitude, declination, hour_angle);
        let elevation = 90.0 - zenith;
        let refraction = approximate_refraction(elevation);
        Self {
            true_solar_time,
            hour_angle,
            zenith,
            elevation,
            refraction,
            apparent_elevation: elevation + refraction,
            azimuth: azimuth(hour_angle, latitude, zenith, declination),
        }
    }
}

/// Apparent solar time in minutes. Keeps the sign of the dividend like `%`.
pub(crate) fn true_solar_time(time_of_day: f64, equation_of_time: f64, longitude: f64, utc_offset_hours: f64) -> f64 {
    (time_of_day * MINUTES_PER_DAY + equation_of_time + MINUTES_PER_DEGREE * longitude - 60.0 * utc_offset_hours)
        % MINUTES_PER_DAY
}

pub(crate) fn hour_angle_from_true_solar_time(true_solar_time: f64) -> f64 {
    let degrees = true_solar_time / MINUTES_PER_DEGREE;
    if degrees < 0.0 {
        degrees + 180.0
    } else {
        degrees - 180.0
    }
}

pub(crate) fn zenith_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let cos_zenith =
        dsin(latitude) * dsin(declination) + dcos(latitude) * dcos(declination) * dcos(hour_angle);
    dacos(cos_zenith.clamp(-1.0, 1.0))
}

/// NOAA's piecewise fit of refraction against geometric elevation, in degrees.
pub(crate) fn approximate_refraction(elevation: f64) -> f64 {
    let arc_seconds = if elevation > 85.0 {
        0.0
    } else if elevation > 5.0 {
        let t = dtan(elevation);
        58.1 / t - 0.07 / t.powi(3) + 0.000086 / t.powi(5)
    } else if elevation > -0.575 {
        1735.0 + elevation * (-518.2 + elevation * (103.4 + elevation * (-12.79 + elevation * 0.711)))
    } else {
        -20.772 / dtan(elevation)
    };
    arc_seconds / 3600.0
}

pub(crate) fn azimuth(hour_angle: f64, latitude: f64, zenith: f64, declination: f64) -> f64 {
    let cos_azimuth = ((dsin(latitude) * dcos(zenith)) - dsin(declination)) / (dcos(latitude) * dsin(zenith));
    // NaN when the sun is exactly overhead or the observer is on a pole; azimuth is then arbitrary.
    let angle = if cos_azimuth.is_nan() { 0.0 } else { dacos(cos_azimuth.clamp(-1.0, 1.0)) };
    if hour_angle > 0.0 {
        normalize_degrees_360(angle + 180.0)
    } else {
        normalize_degrees_360(540.0 - angle)
    }
}
