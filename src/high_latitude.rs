//! Bounding twilight events to a portion of the night when the sun barely sets.

use crate::math::normalize_unit_interval;
use crate::types::HighLatitudeAdjustment;

/// Which way round the clock an event lies from its anchor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    /// After the anchor (Maghrib and Isha after sunset)
    Clockwise,
    /// Before the anchor (Fajr before sunrise)
    CounterClockwise,
}

/// Length of the night as a fraction of the day, measured from sunset across midnight to sunrise.
pub(crate) fn night_duration(sunrise: f64, sunset: f64) -> f64 {
    1.0 - (sunset - sunrise)
}

/// The largest fraction of the day an event may lie from its anchor.
pub(crate) fn night_portion(adjustment: HighLatitudeAdjustment, angle: f64, night: f64) -> f64 {
    match adjustment {
        HighLatitudeAdjustment::AngleBased => angle / 60.0 * night,
        HighLatitudeAdjustment::NightMiddle => 0.5 * night,
        HighLatitudeAdjustment::OneSeventh => night / 7.0,
        HighLatitudeAdjustment::None => 0.0,
    }
}

/// Distance from `anchor` to `time` walking in `direction`, in [0, 1).
pub(crate) fn distance_from_anchor(anchor: f64, time: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Clockwise => normalize_unit_interval(time - anchor),
        Direction::CounterClockwise => normalize_unit_interval(anchor - time),
    }
}

/// Pulls `time` back to `anchor ± portion` when it lies further away, or
/// places it there when the event has no raw time.
pub(crate) fn clamp_to_portion(time: Option<f64>, anchor: f64, portion: f64, direction: Direction) -> f64 {
    let bound = match direction {
        Direction::Clockwise => anchor + portion,
        Direction::CounterClockwise => anchor - portion,
    };
    match time {
        Some(time) if distance_from_anchor(anchor, time, direction) <= portion => time,
        _ => bound,
    }
}
