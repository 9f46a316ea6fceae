#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]
#[allow(unused_imports)]
use core_maths::CoreFloat;

mod golden_tests;
mod high_latitude_tests;

use crate::{AsrMethod, CalculationMethod, HighLatitudeAdjustment, ObservationRequest, PrayerCalculator};

/// One second as a fraction of a day.
pub(crate) const ONE_SECOND: f64 = 1.0 / 86_400.0;

pub(crate) fn cairo_solstice() -> ObservationRequest {
    ObservationRequest::new(
        2024,
        6,
        21,
        2.0,
        30.0444,
        31.2357,
        23.0,
        CalculationMethod::Egypt,
        AsrMethod::Standard,
        HighLatitudeAdjustment::None,
    )
}

pub(crate) fn london(month: u32, day: u32, adjustment: HighLatitudeAdjustment) -> ObservationRequest {
    ObservationRequest::new(
        2024,
        month,
        day,
        if (4..=10).contains(&month) { 1.0 } else { 0.0 },
        51.5074,
        -0.1278,
        11.0,
        CalculationMethod::MuslimWorldLeague,
        AsrMethod::Standard,
        adjustment,
    )
}

pub(crate) fn calculator(request: ObservationRequest) -> PrayerCalculator {
    PrayerCalculator::new(request).expect("valid date")
}

/// Asserts two day fractions agree to within `seconds`.
pub(crate) fn assert_time_close(actual: f64, expected: f64, seconds: f64, what: &str) {
    let diff = (actual - expected).abs() / ONE_SECOND;
    assert!(
        diff <= seconds,
        "{what}: expected {expected} ({}), got {actual} ({}), off by {diff:.2} s",
        crate::HourMinuteSecond::from_day_fraction(expected),
        crate::HourMinuteSecond::from_day_fraction(actual),
    );
}
