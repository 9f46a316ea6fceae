//! # Prayer Times
//!
//! Daily Islamic prayer times (Fajr, sunrise, Asr, Maghrib, Isha) and solar noon
//! from a closed-form solar ephemeris.
//!
//! The sun's declination and the equation of time are computed once per day at
//! local noon from the NOAA solar coordinate series. Each event is then the
//! hour angle at which the sun reaches that event's altitude, added to solar
//! noon. All times are fractions of the local day: 0.0 is local midnight and
//! 1.0 the following midnight. Values can fall slightly outside [0, 1) near
//! midnight; [`HourMinuteSecond`] and [`to_local_datetime`] handle that.
//!
//! ## Basic Usage
//!
//! ```
//! use prayer_times::{
//!     AsrMethod, CalculationMethod, HighLatitudeAdjustment, HourMinuteSecond, ObservationRequest,
//!     PrayerCalculator,
//! };
//!
//! // Cairo, summer solstice 2024, UTC+2
//! let request = ObservationRequest::new(
//!     2024, 6, 21,
//!     2.0,
//!     30.0444, 31.2357,
//!     23.0,
//!     CalculationMethod::Egypt,
//!     AsrMethod::Standard,
//!     HighLatitudeAdjustment::None,
//! );
//! let calc = PrayerCalculator::new(request).unwrap();
//!
//! let fajr = HourMinuteSecond::from_day_fraction(calc.get_fajr().unwrap());
//! assert_eq!((fajr.hour, fajr.minute), (3, 8));
//!
//! let maghrib = HourMinuteSecond::from_day_fraction(calc.get_maghrib().unwrap());
//! assert_eq!(maghrib.to_string(), "18:59:23");
//! ```
//!
//! ## Polar conditions
//!
//! Near the poles some altitudes are never reached on a given day. Such events
//! are reported as [`CalculationError::UndefinedHourAngle`] unless a
//! [`HighLatitudeAdjustment`] other than `None` places them at a bounded
//! portion of the night instead.
#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

mod high_latitude;
mod hour_angle;
mod math;
mod position;
mod solar;
mod time;
mod types;

#[cfg(test)]
mod tests;

use core::cell::OnceCell;
use core::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use log::{debug, trace};
use thiserror::Error;

use crate::high_latitude::{clamp_to_portion, night_duration, night_portion, Direction};
use crate::hour_angle::{asr_depression, sunrise_depression};
use crate::solar::{simplified_equation_of_time_and_declination, MINUTES_PER_DEGREE};
use crate::time::MINUTES_PER_DAY;

pub use crate::hour_angle::{cos_hour_angle, hour_angle, Unreachable, STANDARD_HORIZON_DEPRESSION};
pub use crate::position::SolarPosition;
pub use crate::solar::{Ephemeris, SolarCoordinates};
pub use crate::time::{
    date_ordinal, fractional_time_of_day, julian_century, julian_day, to_local_datetime, HourMinuteSecond,
};
pub use crate::types::{
    AsrMethod, CalculationMethod, EquationOfTimeModel, HighLatitudeAdjustment, HorizonModel, IshaRule,
    ObservationRequest, ParseError,
};

/// Result of computing one event: a day fraction, or why it has none.
pub type EventResult = Result<f64, CalculationError>;

/// The daily events this crate computes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    Fajr,
    Sunrise,
    SolarNoon,
    Asr,
    Sunset,
    Maghrib,
    Isha,
}

impl Event {
    /// All events in the order they occur on an ordinary day.
    pub const ALL: [Event; 7] = [
        Event::Fajr,
        Event::Sunrise,
        Event::SolarNoon,
        Event::Asr,
        Event::Sunset,
        Event::Maghrib,
        Event::Isha,
    ];
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Event::Fajr => "Fajr",
            Event::Sunrise => "Sunrise",
            Event::SolarNoon => "Solar noon",
            Event::Asr => "Asr",
            Event::Sunset => "Sunset",
            Event::Maghrib => "Maghrib",
            Event::Isha => "Isha",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while computing prayer times.
///
/// Only [`CalculationError::InvalidDate`] prevents a calculator from being
/// built. The other variants are per event, so one undefined event never
/// hides the others.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CalculationError {
    /// The year, month and day do not form a proleptic Gregorian date
    #[error("Invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// The sun never reaches the event's altitude on this day at this latitude
    #[error("{event} is undefined at {depression}° below the horizon: {reason}")]
    UndefinedHourAngle {
        event: Event,
        /// Requested depression in degrees (negative for altitudes above the horizon)
        depression: f64,
        reason: Unreachable,
    },

    /// A day fraction could not be placed on the calendar
    #[error("Time conversion error")]
    TimeConversionError,
}

/// All events of one day, each computed independently.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EventTimes {
    /// Always defined
    pub solar_noon: f64,
    pub sunrise: EventResult,
    pub sunset: EventResult,
    pub fajr: EventResult,
    pub asr: EventResult,
    pub maghrib: EventResult,
    pub isha: EventResult,
}

impl EventTimes {
    pub fn get(&self, event: Event) -> EventResult {
        match event {
            Event::Fajr => self.fajr,
            Event::Sunrise => self.sunrise,
            Event::SolarNoon => Ok(self.solar_noon),
            Event::Asr => self.asr,
            Event::Sunset => self.sunset,
            Event::Maghrib => self.maghrib,
            Event::Isha => self.isha,
        }
    }
}

/// Computes every event of the requested day.
///
/// The date must exist in the proleptic Gregorian calendar. An impossible day
/// such as February 30 is rejected; it is not rolled over into the next month.
///
/// ```
/// use prayer_times::{
///     compute_prayer_times, AsrMethod, CalculationError, CalculationMethod, HighLatitudeAdjustment,
///     ObservationRequest,
/// };
///
/// let request = ObservationRequest::new(
///     2024, 2, 30, 2.0, 30.0444, 31.2357, 23.0,
///     CalculationMethod::Egypt,
///     AsrMethod::Standard,
///     HighLatitudeAdjustment::None,
/// );
/// assert_eq!(
///     compute_prayer_times(&request),
///     Err(CalculationError::InvalidDate { year: 2024, month: 2, day: 30 })
/// );
/// ```
///
/// # Errors
///
/// [`CalculationError::InvalidDate`] when the request's date does not exist.
/// Undefined events are reported inside the returned [`EventTimes`].
pub fn compute_prayer_times(request: &ObservationRequest) -> Result<EventTimes, CalculationError> {
    Ok(PrayerCalculator::new(*request)?.calculate())
}

/// Calculator for one day's prayer times at one place.
///
/// The ephemeris and each event are computed on first access and cached, so
/// repeated reads are free. The caches make the calculator `!Sync`; to share
/// results between threads, share the [`EventTimes`] from [`calculate`](Self::calculate).
///
/// # Example
///
/// ```
/// use prayer_times::{
///     AsrMethod, CalculationError, CalculationMethod, Event, HighLatitudeAdjustment, ObservationRequest,
///     PrayerCalculator, Unreachable,
/// };
///
/// // London at midsummer: the sun never gets 18° below the horizon.
/// let request = ObservationRequest::new(
///     2024, 6, 21, 1.0, 51.5074, -0.1278, 0.0,
///     CalculationMethod::MuslimWorldLeague,
///     AsrMethod::Standard,
///     HighLatitudeAdjustment::None,
/// );
/// let calc = PrayerCalculator::new(request).unwrap();
/// assert!(matches!(
///     calc.get_fajr(),
///     Err(CalculationError::UndefinedHourAngle { event: Event::Fajr, reason: Unreachable::SunAlwaysAbove, .. })
/// ));
///
/// // With an adjustment, Fajr lands 18/60 of the night before sunrise.
/// let adjusted = PrayerCalculator::new(ObservationRequest {
///     high_latitude_adjustment: HighLatitudeAdjustment::AngleBased,
///     ..request
/// })
/// .unwrap();
/// assert!(adjusted.get_fajr().unwrap() < adjusted.get_sunrise().unwrap());
/// ```
pub struct PrayerCalculator {
    request: ObservationRequest,
    date: NaiveDate,
    ephemeris: OnceCell<Ephemeris>,
    solar_noon: OnceCell<f64>,
    sunrise: OnceCell<EventResult>,
    sunset: OnceCell<EventResult>,
    fajr: OnceCell<EventResult>,
    asr: OnceCell<EventResult>,
    maghrib: OnceCell<EventResult>,
    isha: OnceCell<EventResult>,
}

impl PrayerCalculator {
    /// Creates a calculator for the request. Nothing is computed until an event is read.
    ///
    /// # Errors
    ///
    /// [`CalculationError::InvalidDate`] when the request's date does not
    /// exist. Out-of-range days are never normalised into a neighbouring month.
    pub fn new(request: ObservationRequest) -> Result<Self, CalculationError> {
        let date = request.date()?;
        Ok(Self {
            request,
            date,
            ephemeris: OnceCell::new(),
            solar_noon: OnceCell::new(),
            sunrise: OnceCell::new(),
            sunset: OnceCell::new(),
            fajr: OnceCell::new(),
            asr: OnceCell::new(),
            maghrib: OnceCell::new(),
            isha: OnceCell::new(),
        })
    }

    pub fn request(&self) -> &ObservationRequest {
        &self.request
    }

    /// Returns the day's declination, equation of time and sunrise hour angle.
    ///
    /// Evaluated at local noon (12:00 at the request's UTC offset).
    pub fn get_ephemeris(&self) -> &Ephemeris {
        self.ephemeris.get_or_init(|| {
            let julian_day = julian_day(
                date_ordinal(self.date),
                fractional_time_of_day(12, 0, 0),
                self.request.utc_offset_hours,
            );
            let julian_century = julian_century(julian_day);
            let (equation_of_time, declination) = match self.request.equation_of_time_model {
                EquationOfTimeModel::Noaa => {
                    let coordinates = SolarCoordinates::new(julian_century);
                    (coordinates.equation_of_time, coordinates.declination)
                }
                EquationOfTimeModel::Simplified => simplified_equation_of_time_and_declination(self.date),
            };
            let sunrise_hour_angle = hour_angle(self.sunrise_depression(), self.request.latitude, declination);
            trace!(
                "ephemeris for {}: jd={julian_day}, declination={declination}, equation_of_time={equation_of_time}",
                self.date
            );
            Ephemeris {
                julian_day,
                julian_century,
                declination,
                equation_of_time,
                sunrise_hour_angle,
            }
        })
    }

    /// Returns the full solar coordinate series at the ephemeris instant.
    ///
    /// Always the NOAA series, whichever [`EquationOfTimeModel`] the request selects.
    pub fn get_solar_coordinates(&self) -> SolarCoordinates {
        SolarCoordinates::new(self.get_ephemeris().julian_century)
    }

    /// Returns the time the sun crosses the local meridian.
    pub fn get_solar_noon(&self) -> f64 {
        *self.solar_noon.get_or_init(|| {
            let equation_of_time = self.get_ephemeris().equation_of_time;
            (720.0 - MINUTES_PER_DEGREE * self.request.longitude - equation_of_time
                + self.request.utc_offset_hours * 60.0)
                / MINUTES_PER_DAY
        })
    }

    /// Returns sunrise, when the sun's upper limb clears the horizon.
    pub fn get_sunrise(&self) -> EventResult {
        *self
            .sunrise
            .get_or_init(|| self.horizon_event(Event::Sunrise, Direction::CounterClockwise))
    }

    pub fn get_sunset(&self) -> EventResult {
        *self
            .sunset
            .get_or_init(|| self.horizon_event(Event::Sunset, Direction::Clockwise))
    }

    /// Returns Fajr, when the sun reaches the method's Fajr depression before sunrise.
    pub fn get_fajr(&self) -> EventResult {
        *self.fajr.get_or_init(|| {
            let angle = self.request.method.fajr_angle();
            let raw = self.event_at_depression(Event::Fajr, angle, Direction::CounterClockwise);
            self.adjust_for_high_latitude(Event::Fajr, raw, angle, Direction::CounterClockwise)
        })
    }

    /// Returns Asr, when shadows reach the convention's multiple of their length.
    ///
    /// Never adjusted for high latitudes.
    pub fn get_asr(&self) -> EventResult {
        *self.asr.get_or_init(|| {
            let depression = asr_depression(
                self.request.asr_method.shadow_multiple(),
                self.request.latitude,
                self.get_ephemeris().declination,
            );
            self.event_at_depression(Event::Asr, depression, Direction::Clockwise)
        })
    }

    /// Returns Maghrib: sunset, or the method's Maghrib depression after sunset.
    pub fn get_maghrib(&self) -> EventResult {
        *self.maghrib.get_or_init(|| match self.request.method.maghrib_angle() {
            None => self.get_sunset(),
            Some(angle) => {
                let raw = self.event_at_depression(Event::Maghrib, angle, Direction::Clockwise);
                self.adjust_for_high_latitude(Event::Maghrib, raw, angle, Direction::Clockwise)
            }
        })
    }

    /// Returns Isha, by depression or as a fixed delay after Maghrib.
    ///
    /// With a fixed delay an undefined Maghrib is reported as is.
    pub fn get_isha(&self) -> EventResult {
        *self.isha.get_or_init(|| match self.request.method.isha() {
            IshaRule::MinutesAfterMaghrib(minutes) => self.get_maghrib().map(|maghrib| maghrib + minutes / MINUTES_PER_DAY),
            IshaRule::Angle(angle) => {
                let raw = self.event_at_depression(Event::Isha, angle, Direction::Clockwise);
                self.adjust_for_high_latitude(Event::Isha, raw, angle, Direction::Clockwise)
            }
        })
    }

    pub fn get_event(&self, event: Event) -> EventResult {
        match event {
            Event::Fajr => self.get_fajr(),
            Event::Sunrise => self.get_sunrise(),
            Event::SolarNoon => Ok(self.get_solar_noon()),
            Event::Asr => self.get_asr(),
            Event::Sunset => self.get_sunset(),
            Event::Maghrib => self.get_maghrib(),
            Event::Isha => self.get_isha(),
        }
    }

    /// Computes (or reads back) every event.
    pub fn calculate(&self) -> EventTimes {
        EventTimes {
            solar_noon: self.get_solar_noon(),
            sunrise: self.get_sunrise(),
            sunset: self.get_sunset(),
            fajr: self.get_fajr(),
            asr: self.get_asr(),
            maghrib: self.get_maghrib(),
            isha: self.get_isha(),
        }
    }

    /// Returns the event as a date-time at the request's UTC offset.
    ///
    /// # Errors
    ///
    /// The event's own error, or [`CalculationError::TimeConversionError`] when
    /// the offset is not a valid fixed offset.
    pub fn get_local_datetime(&self, event: Event) -> Result<DateTime<FixedOffset>, CalculationError> {
        let fraction = self.get_event(event)?;
        to_local_datetime(self.date, fraction, self.request.utc_offset_hours)
            .ok_or(CalculationError::TimeConversionError)
    }

    /// Returns the time between sunrise and sunset, in minutes.
    pub fn get_sunlight_duration(&self) -> EventResult {
        let hour_angle = self.get_ephemeris().sunrise_hour_angle.map_err(|reason| {
            CalculationError::UndefinedHourAngle {
                event: Event::Sunrise,
                depression: self.sunrise_depression(),
                reason,
            }
        })?;
        Ok(2.0 * MINUTES_PER_DEGREE * hour_angle)
    }

    /// Returns the time from sunset to the next sunrise, as a fraction of a day.
    pub fn get_night_duration(&self) -> EventResult {
        Ok(night_duration(self.get_sunrise()?, self.get_sunset()?))
    }

    /// Returns where the sun stands at `time_of_day` (a local day fraction).
    ///
    /// Uses the day's noon declination and equation of time, so accuracy drops
    /// slowly away from midday.
    pub fn get_solar_position(&self, time_of_day: f64) -> SolarPosition {
        let ephemeris = self.get_ephemeris();
        SolarPosition::new(
            time_of_day,
            self.request.latitude,
            self.request.longitude,
            self.request.utc_offset_hours,
            ephemeris.declination,
            ephemeris.equation_of_time,
        )
    }

    fn sunrise_depression(&self) -> f64 {
        sunrise_depression(self.request.elevation, self.request.horizon_model)
    }

    /// Day fraction `hour_angle` degrees from solar noon.
    fn time_at_hour_angle(&self, hour_angle: f64) -> f64 {
        (self.get_solar_noon() * MINUTES_PER_DAY + hour_angle * MINUTES_PER_DEGREE) / MINUTES_PER_DAY
    }

    fn signed(hour_angle: f64, direction: Direction) -> f64 {
        match direction {
            Direction::Clockwise => hour_angle,
            Direction::CounterClockwise => -hour_angle,
        }
    }

    fn horizon_event(&self, event: Event, direction: Direction) -> EventResult {
        match self.get_ephemeris().sunrise_hour_angle {
            Ok(hour_angle) => Ok(self.time_at_hour_angle(Self::signed(hour_angle, direction))),
            Err(reason) => Err(self.undefined(event, self.sunrise_depression(), reason)),
        }
    }

    fn event_at_depression(&self, event: Event, depression: f64, direction: Direction) -> EventResult {
        match hour_angle(depression, self.request.latitude, self.get_ephemeris().declination) {
            Ok(hour_angle) => Ok(self.time_at_hour_angle(Self::signed(hour_angle, direction))),
            Err(reason) => Err(self.undefined(event, depression, reason)),
        }
    }

    fn undefined(&self, event: Event, depression: f64, reason: Unreachable) -> CalculationError {
        debug!(
            "{event} undefined on {} at latitude {}: {reason}",
            self.date, self.request.latitude
        );
        CalculationError::UndefinedHourAngle {
            event,
            depression,
            reason,
        }
    }

    /// Bounds a twilight event to a portion of the night measured from its
    /// anchor: sunrise for Fajr, sunset for Maghrib and Isha.
    fn adjust_for_high_latitude(&self, event: Event, raw: EventResult, angle: f64, direction: Direction) -> EventResult {
        let adjustment = self.request.high_latitude_adjustment;
        if adjustment == HighLatitudeAdjustment::None {
            return raw;
        }
        let (Ok(sunrise), Ok(sunset)) = (self.get_sunrise(), self.get_sunset()) else {
            return raw;
        };
        let anchor = match direction {
            Direction::Clockwise => sunset,
            Direction::CounterClockwise => sunrise,
        };
        let portion = night_portion(adjustment, angle, night_duration(sunrise, sunset));
        let adjusted = clamp_to_portion(raw.ok(), anchor, portion, direction);
        if raw != Ok(adjusted) {
            debug!("{event}: {adjustment:?} adjustment moved {raw:?} to {adjusted}");
        }
        Ok(adjusted)
    }
}
