use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::errors::AppError;

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 100;
pub const MIN_DURATION_MINUTES: i64 = 15;
pub const MAX_DURATION_MINUTES: i64 = 180;
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Trims a display name and checks its length in characters.
pub fn validate_name(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(AppError::validation(format!(
            "{field} must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    let s = s.trim();
    if !has_shape(s, &[4, 2, 2], '-') {
        return Err(AppError::validation(format!(
            "invalid date format: {s} (expected YYYY-MM-DD)"
        )));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("invalid calendar date: {s}")))
}

/// Parses a strict 24-hour `HH:MM` time of day.
pub fn parse_time(s: &str) -> Result<NaiveTime, AppError> {
    let s = s.trim();
    if !has_shape(s, &[2, 2], ':') {
        return Err(AppError::validation(format!(
            "invalid time format: {s} (expected HH:MM, 24-hour)"
        )));
    }
    let hour: u32 = s[..2]
        .parse()
        .map_err(|_| AppError::validation(format!("invalid hour in: {s}")))?;
    let minute: u32 = s[3..]
        .parse()
        .map_err(|_| AppError::validation(format!("invalid minute in: {s}")))?;
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| AppError::validation(format!("time out of range: {s}")))
}

pub fn validate_duration(minutes: i64) -> Result<u32, AppError> {
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        return Err(AppError::validation(format!(
            "duration must be between {MIN_DURATION_MINUTES} and {MAX_DURATION_MINUTES} minutes, got {minutes}"
        )));
    }
    Ok(minutes as u32)
}

/// Appointments never cross midnight: `time + duration` must be at most 24:00.
pub fn validate_same_day(time: NaiveTime, duration: u32) -> Result<(), AppError> {
    let end = minute_of_day(time) + duration as i64;
    if end > MINUTES_PER_DAY {
        return Err(AppError::validation(format!(
            "appointment at {} for {duration} minutes would end after midnight",
            time.format("%H:%M")
        )));
    }
    Ok(())
}

pub fn minute_of_day(time: NaiveTime) -> i64 {
    (time.hour() * 60 + time.minute()) as i64
}

fn has_shape(s: &str, widths: &[usize], sep: char) -> bool {
    let parts: Vec<&str> = s.split(sep).collect();
    parts.len() == widths.len()
        && parts
            .iter()
            .zip(widths)
            .all(|(p, w)| p.len() == *w && p.chars().all(|c| c.is_ascii_digit()))
}
