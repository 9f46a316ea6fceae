use core::fmt;
use core::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use crate::CalculationError;

/// How Isha is derived for a calculation method.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IshaRule {
    /// Isha begins when the sun reaches this many degrees below the horizon.
    Angle(f64),
    /// Isha begins this many minutes after Maghrib.
    MinutesAfterMaghrib(f64),
}

/// Published twilight conventions.
///
/// Each variant is a fixed set of angles; the set is closed and not user-constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalculationMethod {
    /// Muslim World League
    MuslimWorldLeague,
    /// Islamic Society of North America
    Isna,
    /// Egyptian General Authority of Survey
    Egypt,
    /// Umm Al-Qura University, Makkah.
    ///
    /// Isha is 90 minutes after Maghrib; during Ramadan it is commonly observed
    /// at 120 minutes, which this preset does not model.
    Makkah,
    /// University of Islamic Sciences, Karachi
    Karachi,
    /// Institute of Geophysics, University of Tehran
    Tehran,
    /// Shia Ithna-Ashari, Leva Institute, Qum
    Jafari,
}

impl CalculationMethod {
    pub const ALL: [CalculationMethod; 7] = [
        CalculationMethod::MuslimWorldLeague,
        CalculationMethod::Isna,
        CalculationMethod::Egypt,
        CalculationMethod::Makkah,
        CalculationMethod::Karachi,
        CalculationMethod::Tehran,
        CalculationMethod::Jafari,
    ];

    /// Depression angle of the sun at Fajr, in degrees.
    pub const fn fajr_angle(self) -> f64 {
        match self {
            CalculationMethod::MuslimWorldLeague => 18.0,
            CalculationMethod::Isna => 15.0,
            CalculationMethod::Egypt => 19.5,
            CalculationMethod::Makkah => 18.5,
            CalculationMethod::Karachi => 18.0,
            CalculationMethod::Tehran => 17.7,
            CalculationMethod::Jafari => 16.0,
        }
    }

    /// Depression angle of the sun at Maghrib, or `None` when Maghrib is sunset.
    pub const fn maghrib_angle(self) -> Option<f64> {
        match self {
            CalculationMethod::Tehran => Some(4.5),
            CalculationMethod::Jafari => Some(4.0),
            _ => None,
        }
    }

    pub const fn isha(self) -> IshaRule {
        match self {
            CalculationMethod::MuslimWorldLeague => IshaRule::Angle(17.0),
            CalculationMethod::Isna => IshaRule::Angle(15.0),
            CalculationMethod::Egypt => IshaRule::Angle(17.5),
            CalculationMethod::Makkah => IshaRule::MinutesAfterMaghrib(90.0),
            CalculationMethod::Karachi => IshaRule::Angle(18.0),
            CalculationMethod::Tehran => IshaRule::Angle(14.0),
            CalculationMethod::Jafari => IshaRule::Angle(14.0),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            CalculationMethod::MuslimWorldLeague => "mwl",
            CalculationMethod::Isna => "isna",
            CalculationMethod::Egypt => "egypt",
            CalculationMethod::Makkah => "makkah",
            CalculationMethod::Karachi => "karachi",
            CalculationMethod::Tehran => "tehran",
            CalculationMethod::Jafari => "jafari",
        }
    }
}

/// Shadow-length convention for the start of Asr.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsrMethod {
    /// Shafi'i, Maliki, Ja'fari and Hanbali: shadow equals object length.
    #[default]
    Standard,
    /// Hanafi: shadow equals twice the object length.
    Hanafi,
}

impl AsrMethod {
    /// Ratio of shadow length to object height (beyond the noon shadow).
    pub const fn shadow_multiple(self) -> f64 {
        match self {
            AsrMethod::Standard => 1.0,
            AsrMethod::Hanafi => 2.0,
        }
    }
}

/// Policy for twilight events that are undefined or implausibly far from the night's edges.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HighLatitudeAdjustment {
    /// Fajr no earlier than, and Isha no later than, the middle of the night.
    NightMiddle,
    /// The allowed portion of the night is `angle / 60` of it.
    AngleBased,
    /// The allowed portion of the night is one seventh of it.
    OneSeventh,
    /// Raw times are returned; undefined events stay errors.
    #[default]
    None,
}

/// Depression used for the sunrise and sunset horizon.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizonModel {
    /// 0.833°: standard refraction plus the solar semi-diameter.
    #[default]
    Standard,
    /// Standard plus the dip of the horizon seen from `elevation` meters.
    ElevationAdjusted,
}

/// Source of the solar declination and equation of time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquationOfTimeModel {
    /// The NOAA solar-coordinate series.
    #[default]
    Noaa,
    /// A low-precision approximation from the day of the year and a fixed 23.44° obliquity.
    Simplified,
}

/// Everything needed to compute one day's prayer times for one place.
///
/// Latitude, longitude and elevation are not range-checked. Out-of-range
/// values produce meaningless times or undefined-hour-angle errors, never a panic.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationRequest {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Offset of local clock time from UTC, in hours. May be fractional or negative.
    pub utc_offset_hours: f64,
    /// Degrees, positive north
    pub latitude: f64,
    /// Degrees, positive east
    pub longitude: f64,
    /// Meters above sea level. Only read by [`HorizonModel::ElevationAdjusted`].
    pub elevation: f64,
    pub method: CalculationMethod,
    pub asr_method: AsrMethod,
    pub high_latitude_adjustment: HighLatitudeAdjustment,
    #[cfg_attr(feature = "serde", serde(default))]
    pub horizon_model: HorizonModel,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equation_of_time_model: EquationOfTimeModel,
}

impl ObservationRequest {
    /// Creates a request with the standard horizon and the NOAA equation of time.
    ///
    /// ```
    /// use prayer_times::{AsrMethod, CalculationMethod, HighLatitudeAdjustment, ObservationRequest};
    ///
    /// let request = ObservationRequest::new(
    ///     2024, 6, 21,                   // date
    ///     2.0,                           // UTC+2
    ///     30.0444, 31.2357,              // Cairo
    ///     23.0,                          // elevation (m)
    ///     CalculationMethod::Egypt,
    ///     AsrMethod::Standard,
    ///     HighLatitudeAdjustment::None,
    /// );
    /// assert!(request.date().is_ok());
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        utc_offset_hours: f64,
        latitude: f64,
        longitude: f64,
        elevation: f64,
        method: CalculationMethod,
        asr_method: AsrMethod,
        high_latitude_adjustment: HighLatitudeAdjustment,
    ) -> Self {
        Self {
            year,
            month,
            day,
            utc_offset_hours,
            latitude,
            longitude,
            elevation,
            method,
            asr_method,
            high_latitude_adjustment,
            horizon_model: HorizonModel::Standard,
            equation_of_time_model: EquationOfTimeModel::Noaa,
        }
    }

    pub fn with_horizon_model(mut self, horizon_model: HorizonModel) -> Self {
        self.horizon_model = horizon_model;
        self
    }

    pub fn with_equation_of_time_model(mut self, model: EquationOfTimeModel) -> Self {
        self.equation_of_time_model = model;
        self
    }

    /// The requested calendar date.
    ///
    /// # Errors
    ///
    /// [`CalculationError::InvalidDate`] when the triple is not a proleptic Gregorian date.
    pub fn date(&self) -> Result<NaiveDate, CalculationError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or(CalculationError::InvalidDate {
            year: self.year,
            month: self.month,
            day: self.day,
        })
    }
}

/// Error returned when a policy name cannot be parsed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Unknown {kind} name")]
pub struct ParseError {
    /// Which setting was being parsed
    pub kind: &'static str,
}

fn normalized_eq(input: &str, name: &str) -> bool {
    input.len() == name.len()
        && input
            .bytes()
            .zip(name.bytes())
            .all(|(a, b)| a.to_ascii_lowercase() == b || (a == b'-' && b == b'_'))
}

impl FromStr for CalculationMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalized_eq(s, "muslim_world_league") {
            return Ok(CalculationMethod::MuslimWorldLeague);
        }
        CalculationMethod::ALL
            .into_iter()
            .find(|method| normalized_eq(s, method.name()))
            .ok_or(ParseError {
                kind: "calculation method",
            })
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AsrMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalized_eq(s, "standard") || normalized_eq(s, "shafii") {
            Ok(AsrMethod::Standard)
        } else if normalized_eq(s, "hanafi") {
            Ok(AsrMethod::Hanafi)
        } else {
            Err(ParseError { kind: "asr method" })
        }
    }
}

impl FromStr for HighLatitudeAdjustment {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            ("night_middle", HighLatitudeAdjustment::NightMiddle),
            ("angle_based", HighLatitudeAdjustment::AngleBased),
            ("one_seventh", HighLatitudeAdjustment::OneSeventh),
            ("none", HighLatitudeAdjustment::None),
        ]
        .into_iter()
        .find(|(name, _)| normalized_eq(s, name))
        .map(|(_, adjustment)| adjustment)
        .ok_or(ParseError {
            kind: "high latitude adjustment",
        })
    }
}
