//! Appointment request validation
//!
//! Dates are `YYYY-MM-DD` with a year in 2021..=2030, a month in 1..=12 and a
//! day in 1..=31. The day is not checked against the month, so `2024-02-31`
//! is accepted. Times are `HH:MM` with an hour in 0..=24 (24 included) and a
//! minute in 0..=59. Every segment must have its exact width and contain only
//! ASCII digits.

use std::ops::RangeInclusive;

use crate::models::AppointmentRequest;

const YEARS: RangeInclusive<u32> = 2021..=2030;
const MONTHS: RangeInclusive<u32> = 1..=12;
const DAYS: RangeInclusive<u32> = 1..=31;
const HOURS: RangeInclusive<u32> = 0..=24;
const MINUTES: RangeInclusive<u32> = 0..=59;

/// Check a `YYYY-MM-DD` calendar date
pub fn is_valid_date(date: &str) -> bool {
    let segments: Vec<&str> = date.split('-').collect();
    let [year, month, day] = segments.as_slice() else {
        return false;
    };

    segment_in_range(year, 4, &YEARS)
        && segment_in_range(month, 2, &MONTHS)
        && segment_in_range(day, 2, &DAYS)
}

/// Check an `HH:MM` clock time
pub fn is_valid_time(time: &str) -> bool {
    let segments: Vec<&str> = time.split(':').collect();
    let [hour, minute] = segments.as_slice() else {
        return false;
    };

    segment_in_range(hour, 2, &HOURS) && segment_in_range(minute, 2, &MINUTES)
}

fn segment_in_range(segment: &str, width: usize, range: &RangeInclusive<u32>) -> bool {
    segment.len() == width
        && segment.bytes().all(|b| b.is_ascii_digit())
        && segment
            .parse::<u32>()
            .is_ok_and(|value| range.contains(&value))
}

/// Appointment fields that were all present in a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredFields<'a> {
    pub clinic: &'a str,
    pub doctor: &'a str,
    pub appttype: &'a str,
    pub date: &'a str,
    pub time: &'a str,
}

impl RequiredFields<'_> {
    /// Date and time joined into the stored timestamp text
    pub fn datetime(&self) -> String {
        format!("{}T{}", self.date, self.time)
    }
}

/// Extract every required field, or `None` if any is missing or blank
pub fn required_fields(request: &AppointmentRequest) -> Option<RequiredFields<'_>> {
    Some(RequiredFields {
        clinic: present(&request.clinic)?,
        doctor: present(&request.doctor)?,
        appttype: present(&request.appttype)?,
        date: present(&request.date)?,
        time: present(&request.time)?,
    })
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
