use approx::assert_abs_diff_eq;

use super::{cairo_solstice, calculator, london};
use crate::high_latitude::{clamp_to_portion, distance_from_anchor, night_duration, night_portion, Direction};
use crate::{
    AsrMethod, CalculationError, CalculationMethod, HighLatitudeAdjustment, ObservationRequest, Unreachable,
};

fn polar(latitude: f64, month: u32, adjustment: HighLatitudeAdjustment) -> ObservationRequest {
    ObservationRequest::new(
        2024,
        month,
        21,
        1.0,
        latitude,
        15.0,
        0.0,
        CalculationMethod::MuslimWorldLeague,
        AsrMethod::Standard,
        adjustment,
    )
}

#[test]
fn night_portions() {
    let night = night_duration(0.25, 0.75);
    assert_eq!(night, 0.5);
    assert_eq!(night_portion(HighLatitudeAdjustment::NightMiddle, 18.0, night), 0.25);
    assert_eq!(night_portion(HighLatitudeAdjustment::AngleBased, 18.0, night), 0.15);
    assert_abs_diff_eq!(night_portion(HighLatitudeAdjustment::OneSeventh, 18.0, night), 0.5 / 7.0);
    assert_eq!(night_portion(HighLatitudeAdjustment::None, 18.0, night), 0.0);
}

#[test]
fn distance_wraps_around_midnight() {
    // Isha shortly after midnight, counted from the previous evening's sunset.
    assert_abs_diff_eq!(distance_from_anchor(0.9, 1.05, Direction::Clockwise), 0.15, epsilon = 1e-12);
    assert_abs_diff_eq!(distance_from_anchor(0.9, 0.05, Direction::Clockwise), 0.15, epsilon = 1e-12);
    // Fajr shortly before midnight, counted back from the next sunrise.
    assert_abs_diff_eq!(distance_from_anchor(0.2, -0.02, Direction::CounterClockwise), 0.22, epsilon = 1e-12);
    assert_abs_diff_eq!(distance_from_anchor(0.2, 0.1, Direction::CounterClockwise), 0.1, epsilon = 1e-12);
}

#[test]
fn clamping_keeps_close_times_and_bounds_far_ones() {
    assert_eq!(clamp_to_portion(Some(1.05), 0.9, 0.2, Direction::Clockwise), 1.05);
    assert_abs_diff_eq!(clamp_to_portion(Some(1.2), 0.9, 0.2, Direction::Clockwise), 1.1, epsilon = 1e-12);
    assert_abs_diff_eq!(clamp_to_portion(None, 0.9, 0.2, Direction::Clockwise), 1.1, epsilon = 1e-12);

    assert_eq!(clamp_to_portion(Some(0.15), 0.2, 0.1, Direction::CounterClockwise), 0.15);
    assert_abs_diff_eq!(clamp_to_portion(Some(-0.02), 0.2, 0.1, Direction::CounterClockwise), 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(clamp_to_portion(None, 0.2, 0.1, Direction::CounterClockwise), 0.1, epsilon = 1e-12);
}

#[test]
fn night_middle_meets_at_midnight() {
    let calc = calculator(london(6, 21, HighLatitudeAdjustment::NightMiddle));
    let fajr = calc.get_fajr().unwrap();
    let isha = calc.get_isha().unwrap();
    assert_abs_diff_eq!(isha - fajr, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(fajr, 0.043352092133884856, epsilon = 1e-9);

    let night = calc.get_night_duration().unwrap();
    assert_abs_diff_eq!(calc.get_sunrise().unwrap() - fajr, night / 2.0, epsilon = 1e-12);
}

#[test]
fn angle_based_takes_the_angle_over_sixty() {
    let calc = calculator(london(6, 21, HighLatitudeAdjustment::AngleBased));
    let night = calc.get_night_duration().unwrap();
    assert_abs_diff_eq!(
        calc.get_sunrise().unwrap() - calc.get_fajr().unwrap(),
        18.0 / 60.0 * night,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        calc.get_isha().unwrap() - calc.get_sunset().unwrap(),
        17.0 / 60.0 * night,
        epsilon = 1e-12
    );
}

#[test]
fn one_seventh_is_symmetric() {
    let calc = calculator(london(6, 21, HighLatitudeAdjustment::OneSeventh));
    let night = calc.get_night_duration().unwrap();
    let before_sunrise = calc.get_sunrise().unwrap() - calc.get_fajr().unwrap();
    let after_sunset = calc.get_isha().unwrap() - calc.get_sunset().unwrap();
    assert_abs_diff_eq!(before_sunrise, night / 7.0, epsilon = 1e-12);
    assert_abs_diff_eq!(after_sunset, night / 7.0, epsilon = 1e-12);
}

#[test]
fn ordinary_nights_are_left_alone() {
    let raw = calculator(cairo_solstice()).calculate();
    for adjustment in [HighLatitudeAdjustment::NightMiddle, HighLatitudeAdjustment::AngleBased] {
        let adjusted = calculator(ObservationRequest {
            high_latitude_adjustment: adjustment,
            ..cairo_solstice()
        })
        .calculate();
        assert_eq!(adjusted, raw, "{adjustment:?}");
    }

    // A seventh of a short summer night is tighter than Cairo's twilight angles.
    let calc = calculator(ObservationRequest {
        high_latitude_adjustment: HighLatitudeAdjustment::OneSeventh,
        ..cairo_solstice()
    });
    let night = calc.get_night_duration().unwrap();
    let fajr = calc.get_fajr().unwrap();
    let isha = calc.get_isha().unwrap();
    assert!(fajr > raw.fajr.unwrap());
    assert!(isha < raw.isha.unwrap());
    assert_abs_diff_eq!(calc.get_sunrise().unwrap() - fajr, night / 7.0, epsilon = 1e-12);
    assert_abs_diff_eq!(isha - calc.get_sunset().unwrap(), night / 7.0, epsilon = 1e-12);
    assert_eq!(calc.get_maghrib(), raw.maghrib);
}

#[test]
fn winter_twilight_within_the_portion_is_kept() {
    let raw = calculator(london(12, 21, HighLatitudeAdjustment::None)).calculate();
    let adjusted = calculator(london(12, 21, HighLatitudeAdjustment::AngleBased)).calculate();
    assert_eq!(adjusted.fajr, raw.fajr);
    assert_eq!(adjusted.isha, raw.isha);
}

#[test]
fn fixed_delay_isha_follows_maghrib() {
    let calc = calculator(ObservationRequest {
        method: CalculationMethod::Makkah,
        ..london(6, 21, HighLatitudeAdjustment::NightMiddle)
    });
    let sunset = calc.get_sunset().unwrap();
    assert_eq!(calc.get_maghrib().unwrap(), sunset);
    assert_abs_diff_eq!(calc.get_isha().unwrap() - sunset, 90.0 / 1440.0, epsilon = 1e-12);
    // 18.5° is never reached in a London June night, so Fajr is placed.
    let night = calc.get_night_duration().unwrap();
    assert_abs_diff_eq!(calc.get_sunrise().unwrap() - calc.get_fajr().unwrap(), night / 2.0, epsilon = 1e-12);
}

#[test]
fn maghrib_angle_is_adjusted_from_sunset() {
    let calc = calculator(ObservationRequest::new(
        2024,
        6,
        10,
        2.0,
        59.3293,
        18.0686,
        0.0,
        CalculationMethod::Tehran,
        AsrMethod::Standard,
        HighLatitudeAdjustment::NightMiddle,
    ));
    let sunset = calc.get_sunset().unwrap();
    let maghrib = calc.get_maghrib().unwrap();
    let isha = calc.get_isha().unwrap();
    assert!(maghrib > sunset && maghrib < isha);
    assert_abs_diff_eq!(isha - calc.get_fajr().unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn polar_night_leaves_twilight_unadjusted() {
    // At 75°N in December the sun never rises but still reaches 18° below the horizon.
    let raw = calculator(polar(75.0, 12, HighLatitudeAdjustment::None)).calculate();
    let adjusted = calculator(polar(75.0, 12, HighLatitudeAdjustment::AngleBased)).calculate();

    assert!(matches!(
        adjusted.sunrise,
        Err(CalculationError::UndefinedHourAngle {
            reason: Unreachable::SunAlwaysBelow,
            ..
        })
    ));
    assert!(matches!(
        adjusted.asr,
        Err(CalculationError::UndefinedHourAngle {
            reason: Unreachable::SunAlwaysBelow,
            ..
        })
    ));
    assert!(adjusted.fajr.is_ok());
    assert!(adjusted.isha.is_ok());
    assert_eq!(adjusted, raw);

    // The southern mirror in June.
    let southern = calculator(polar(-75.0, 6, HighLatitudeAdjustment::NightMiddle)).calculate();
    assert!(southern.sunrise.is_err());
    assert!(southern.fajr.is_ok());
}

#[test]
fn midnight_sun_has_nothing_to_anchor_to() {
    let calc = calculator(polar(70.0, 6, HighLatitudeAdjustment::NightMiddle));
    assert!(matches!(
        calc.get_sunrise(),
        Err(CalculationError::UndefinedHourAngle {
            reason: Unreachable::SunAlwaysAbove,
            ..
        })
    ));
    assert!(calc.get_fajr().is_err());
    assert!(calc.get_isha().is_err());
    assert!(calc.get_asr().is_ok());
}
