use std::string::String;

use chrono::{Datelike, NaiveDate};

use super::assert_time_close;
use crate::{
    AsrMethod, CalculationMethod, Event, EventResult, HighLatitudeAdjustment, ObservationRequest, PrayerCalculator,
};

/// One row of `test_data/prayer_times_golden.csv`. Empty cells are undefined events.
#[derive(Debug, serde::Deserialize)]
struct GoldenRow {
    city: String,
    date: String,
    utc_offset: f64,
    latitude: f64,
    longitude: f64,
    method: String,
    asr: String,
    high_latitude: String,
    solar_noon: f64,
    sunrise: Option<f64>,
    sunset: Option<f64>,
    fajr: Option<f64>,
    asr_time: Option<f64>,
    maghrib: Option<f64>,
    isha: Option<f64>,
}

impl GoldenRow {
    fn request(&self) -> ObservationRequest {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .unwrap_or_else(|e| std::panic!("{}: bad date {}: {}", self.city, self.date, e));
        ObservationRequest::new(
            date.year(),
            date.month(),
            date.day(),
            self.utc_offset,
            self.latitude,
            self.longitude,
            0.0,
            self.method.parse::<CalculationMethod>().unwrap(),
            self.asr.parse::<AsrMethod>().unwrap(),
            self.high_latitude.parse::<HighLatitudeAdjustment>().unwrap(),
        )
    }

    fn expected(&self, event: Event) -> Option<f64> {
        match event {
            Event::Fajr => self.fajr,
            Event::Sunrise => self.sunrise,
            Event::SolarNoon => Some(self.solar_noon),
            Event::Asr => self.asr_time,
            Event::Sunset => self.sunset,
            Event::Maghrib => self.maghrib,
            Event::Isha => self.isha,
        }
    }
}

fn check(row: &GoldenRow, event: Event, actual: EventResult) {
    let label = format!("{} {} {} {}", row.city, row.date, row.method, event);
    match (row.expected(event), actual) {
        // Both sides use IEEE doubles; only libm rounding separates them.
        (Some(expected), Ok(actual)) => assert_time_close(actual, expected, 0.01, &label),
        (None, Err(_)) => {}
        (expected, actual) => std::panic!("{label}: expected {expected:?}, got {actual:?}"),
    }
}

#[test]
fn test_against_golden_data() {
    let csv_path = "test_data/prayer_times_golden.csv";
    let mut rdr =
        csv::Reader::from_path(csv_path).unwrap_or_else(|e| std::panic!("Failed to open CSV file {}: {}", csv_path, e));

    let mut total_rows = 0;
    for (row_num, result) in rdr.deserialize().enumerate() {
        let row: GoldenRow =
            result.unwrap_or_else(|e| std::panic!("Failed to parse CSV row {}: {}", row_num + 2, e));
        let calc = PrayerCalculator::new(row.request())
            .unwrap_or_else(|e| std::panic!("Failed to create calculator for row {}: {}", row_num + 2, e));

        for event in Event::ALL {
            check(&row, event, calc.get_event(event));
        }
        total_rows += 1;
    }
    assert!(total_rows >= 18, "only {total_rows} golden rows");
}

#[test]
fn golden_rows_through_compute_prayer_times() {
    let mut rdr = csv::Reader::from_path("test_data/prayer_times_golden.csv").unwrap();
    for result in rdr.deserialize() {
        let row: GoldenRow = result.unwrap();
        let times = crate::compute_prayer_times(&row.request()).unwrap();
        for event in Event::ALL {
            check(&row, event, times.get(event));
        }
    }
}
