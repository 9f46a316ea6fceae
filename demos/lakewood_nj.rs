#![allow(missing_docs, clippy::unwrap_used)]
use chrono::{Datelike, Offset, TimeZone, Utc};
use prayer_times::{
    AsrMethod, CalculationError, CalculationMethod, Event, HighLatitudeAdjustment, HourMinuteSecond, ObservationRequest,
    PrayerCalculator,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Lakewood, NJ coordinates
    let latitude = 40.070591415768035;
    let longitude: f64 = -74.20516698767808;
    let elevation = 23.0; // meters above sea level

    // Today in New York, with the UTC offset in force at local noon (EST or EDT)
    let tz = chrono_tz::America::New_York;
    let today = Utc::now().with_timezone(&tz).date_naive();
    let noon = tz
        .from_local_datetime(&today.and_hms_opt(12, 0, 0).ok_or("Invalid noon")?)
        .single()
        .ok_or("Ambiguous local noon")?;
    let utc_offset_hours = f64::from(noon.offset().fix().local_minus_utc()) / 3600.0;

    println!("Prayer Times Example - Lakewood, NJ");
    println!("Location: {:.5}°N, {:.5}°W", latitude, longitude.abs());
    println!("Date: {} ({})", today.format("%B %d, %Y"), noon.format("UTC%:z"));
    println!("Method: ISNA, Asr: standard");
    println!("{:=<60}", "");

    let request = ObservationRequest::new(
        today.year(),
        today.month(),
        today.day(),
        utc_offset_hours,
        latitude,
        longitude,
        elevation,
        CalculationMethod::Isna,
        AsrMethod::Standard,
        HighLatitudeAdjustment::AngleBased,
    );
    let calc = PrayerCalculator::new(request)?;

    for event in Event::ALL {
        match calc.get_local_datetime(event) {
            Ok(time) => println!("{:<12} {}", event.to_string(), time.format("%H:%M:%S")),
            Err(CalculationError::UndefinedHourAngle { reason, .. }) => {
                println!("{:<12} N/A ({reason})", event.to_string())
            }
            Err(e) => return Err(e.into()),
        }
    }
    println!();

    let ephemeris = calc.get_ephemeris();
    println!("Declination: {:.4}°", ephemeris.declination);
    println!("Equation of time: {:.2} minutes", ephemeris.equation_of_time);
    if let Ok(minutes) = calc.get_sunlight_duration() {
        let daylight = HourMinuteSecond::from_day_fraction(minutes / 1440.0);
        println!("Daylight: {}", daylight);
    }

    // Where the sun stands at solar noon
    let position = calc.get_solar_position(calc.get_solar_noon());
    println!("Noon elevation: {:.2}° (apparent {:.2}°)", position.elevation, position.apparent_elevation);
    println!("Noon azimuth: {:.2}°", position.azimuth);
    Ok(())
}
