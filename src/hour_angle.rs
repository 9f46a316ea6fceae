//! Solving the spherical triangle pole-zenith-sun for the hour angle at which
//! the sun reaches a given altitude.

#[allow(unused_imports)]
use core_maths::CoreFloat;
use core::fmt;

use crate::math::{dacos, dacot, dcos, dtan};
use crate::types::HorizonModel;

/// Depression of the sun's center at sunrise and sunset: 34′ of refraction plus 16′ semi-diameter.
pub const STANDARD_HORIZON_DEPRESSION: f64 = 0.833;

/// Dip of the horizon per √meter of observer elevation, in arc-minutes.
const HORIZON_DIP_ARCMINUTES_PER_SQRT_METER: f64 = 2.076;

/// Why an hour angle does not exist.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Unreachable {
    /// Even at solar midnight the sun is higher than the target (midnight sun, white nights).
    SunAlwaysAbove,
    /// Even at solar noon the sun is lower than the target (polar night).
    SunAlwaysBelow,
}

impl fmt::Display for Unreachable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unreachable::SunAlwaysAbove => f.write_str("the sun stays above it all day"),
            Unreachable::SunAlwaysBelow => f.write_str("the sun never climbs to it"),
        }
    }
}

/// Cosine of the hour angle at which the sun's center is `depression` degrees
/// below the horizon. Outside [-1, 1] when that altitude is never reached.
pub fn cos_hour_angle(depression: f64, latitude: f64, declination: f64) -> f64 {
    dcos(90.0 + depression) / (dcos(latitude) * dcos(declination)) - dtan(latitude) * dtan(declination)
}

/// Unsigned hour angle, in degrees from solar noon, at which the sun is
/// `depression` degrees below the horizon. Negative depressions are altitudes above it.
///
/// ```
/// use prayer_times::{hour_angle, Unreachable};
///
/// // On the equator at an equinox the sun sets six hours after noon.
/// let h = hour_angle(0.0, 0.0, 0.0).unwrap();
/// assert!((h - 90.0).abs() < 1e-9);
///
/// // At 60°N in midsummer the sun never gets 18° below the horizon.
/// assert_eq!(hour_angle(18.0, 60.0, 23.44), Err(Unreachable::SunAlwaysAbove));
/// ```
///
/// # Errors
///
/// Returns the reason the altitude is never reached when the cosine falls outside [-1, 1].
pub fn hour_angle(depression: f64, latitude: f64, declination: f64) -> Result<f64, Unreachable> {
    let cos_h = cos_hour_angle(depression, latitude, declination);
    if (-1.0..=1.0).contains(&cos_h) {
        Ok(dacos(cos_h))
    } else if cos_h < -1.0 {
        Err(Unreachable::SunAlwaysAbove)
    } else {
        Err(Unreachable::SunAlwaysBelow)
    }
}

/// Depression of the sun at sunrise and sunset for the chosen horizon.
pub(crate) fn sunrise_depression(elevation: f64, horizon_model: HorizonModel) -> f64 {
    match horizon_model {
        HorizonModel::Standard => STANDARD_HORIZON_DEPRESSION,
        HorizonModel::ElevationAdjusted => {
            STANDARD_HORIZON_DEPRESSION + HORIZON_DIP_ARCMINUTES_PER_SQRT_METER / 60.0 * elevation.max(0.0).sqrt()
        }
    }
}

/// Depression of the sun when an object's shadow is `shadow_multiple` times its
/// length plus the noon shadow. Always negative (the sun is above the horizon).
pub(crate) fn asr_depression(shadow_multiple: f64, latitude: f64, declination: f64) -> f64 {
    -dacot(shadow_multiple + dtan((latitude - declination).abs()))
}
