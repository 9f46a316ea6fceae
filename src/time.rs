use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone};
#[allow(unused_imports)]
use core_maths::CoreFloat;
use core::fmt;

use crate::math::normalize_unit_interval;

/// Julian day of the 1899-12-30 epoch at local midnight, as used by the ordinal date count.
const ORDINAL_EPOCH_JULIAN_DAY: f64 = 2_415_018.5;

/// Julian day of the J2000.0 epoch (2000-01-01 12:00 UT).
pub(crate) const J2000_JULIAN_DAY: f64 = 2_451_545.0;

const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

pub(crate) const MINUTES_PER_DAY: f64 = 1440.0;

/// Returns the 1899-12-30 epoch date.
fn ordinal_epoch() -> NaiveDate {
    // 1899-12-30 is always representable; the fallback only exists to keep this infallible.
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

/// Number of days between 1899-12-30 and `date` in the proleptic Gregorian calendar.
///
/// Negative for dates before the epoch.
pub fn date_ordinal(date: NaiveDate) -> i64 {
    date.signed_duration_since(ordinal_epoch()).num_days()
}

/// Converts a clock time into a fraction of a day.
///
/// Values outside the usual ranges are accepted and simply scale, so
/// `fractional_time_of_day(24, 0, 0) == 1.0`.
pub fn fractional_time_of_day(hour: u32, minute: u32, second: u32) -> f64 {
    f64::from(hour) / 24.0 + f64::from(minute) / MINUTES_PER_DAY + f64::from(second) / 86_400.0
}

/// Julian day for a date ordinal, a local time of day, and a UTC offset in hours.
///
/// ```
/// use chrono::NaiveDate;
/// use prayer_times::{date_ordinal, julian_day};
///
/// let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
/// assert_eq!(julian_day(date_ordinal(date), 0.5, 0.0), 2_451_545.0);
/// ```
pub fn julian_day(date_ordinal: i64, fractional_time: f64, utc_offset_hours: f64) -> f64 {
    date_ordinal as f64 + ORDINAL_EPOCH_JULIAN_DAY + fractional_time - utc_offset_hours / 24.0
}

/// Julian century (T) from the given Julian Day (JD),
/// measured in Julian centuries since the J2000.0 epoch.
pub fn julian_century(julian_day: f64) -> f64 {
    (julian_day - J2000_JULIAN_DAY) / DAYS_PER_JULIAN_CENTURY
}

/// A clock reading decomposed from a day fraction.
///
/// This is a display view only; the calculator always works on day fractions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourMinuteSecond {
    /// Hour of the day, 0-23
    pub hour: u32,
    /// Minute of the hour, 0-59
    pub minute: u32,
    /// Second of the minute, 0-59
    pub second: u32,
}

impl HourMinuteSecond {
    /// Decomposes a day fraction into hours, minutes and seconds, truncating each step.
    ///
    /// The fraction is first wrapped into [0, 1), so -0.25 reads as 18:00:00.
    ///
    /// ```
    /// use prayer_times::HourMinuteSecond;
    ///
    /// let hms = HourMinuteSecond::from_day_fraction(0.75);
    /// assert_eq!((hms.hour, hms.minute, hms.second), (18, 0, 0));
    /// ```
    pub fn from_day_fraction(fraction: f64) -> Self {
        let hour_float = normalize_unit_interval(fraction) * 24.0;
        let hour = hour_float.floor();
        let minute_float = (hour_float - hour) * 60.0;
        let minute = minute_float.floor();
        let second = ((minute_float - minute) * 60.0).floor();
        Self {
            hour: (hour as u32).min(23),
            minute: (minute as u32).min(59),
            second: (second as u32).min(59),
        }
    }

    /// Recomposes the reading into a day fraction.
    pub fn to_day_fraction(self) -> f64 {
        fractional_time_of_day(self.hour, self.minute, self.second)
    }

    pub fn to_naive_time(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, self.second)
    }
}

impl fmt::Display for HourMinuteSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Places a day fraction on the local calendar.
///
/// `fraction` counts from local midnight of `date`; values below 0 or at or
/// above 1 land on the previous or following days. The result carries the
/// fixed offset `utc_offset_hours`, rounded to the second.
///
/// Returns `None` when the offset is not a valid `FixedOffset` (beyond ±24 h)
/// or the instant is outside chrono's range.
pub fn to_local_datetime(date: NaiveDate, fraction: f64, utc_offset_hours: f64) -> Option<DateTime<FixedOffset>> {
    if !fraction.is_finite() || !utc_offset_hours.is_finite() {
        return None;
    }
    let offset = FixedOffset::east_opt((utc_offset_hours * 3600.0).round() as i32)?;
    let millis = (fraction * 86_400_000.0).round() as i64;
    let local = date.and_time(NaiveTime::MIN).checked_add_signed(TimeDelta::try_milliseconds(millis)?)?;
    offset.from_local_datetime(&local).single()
}
