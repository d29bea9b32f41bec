//! Double-booking detection.
//!
//! Windows are half-open minute ranges `[start, end)` measured from midnight of
//! the appointment's date. Only the candidate window is widened by the buffer,
//! so two zero-buffer appointments that merely touch do not overlap.

use chrono::{NaiveDate, NaiveTime};

use crate::errors::AppError;
use crate::models::validation::{minute_of_day, parse_date, parse_time};
use crate::models::{Appointment, AppointmentDetails};

pub const DEFAULT_BUFFER_MINUTES: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn widen(self, buffer_minutes: i64) -> Self {
        Self::new(
            self.start.saturating_sub(buffer_minutes),
            self.end.saturating_add(buffer_minutes),
        )
    }

    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// A proposed slot for one doctor on one calendar date.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub doctor_name: &'a str,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: u32,
}

impl<'a> Candidate<'a> {
    /// Builds a candidate from raw strings, failing on anything malformed
    /// instead of letting it slip through as "no conflict".
    pub fn parse(
        doctor_name: &'a str,
        date: &str,
        time: &str,
        duration: i64,
    ) -> Result<Self, AppError> {
        let date = parse_date(date)?;
        let time = parse_time(time)?;
        let duration = u32::try_from(duration)
            .ok()
            .filter(|d| *d > 0)
            .ok_or_else(|| {
                AppError::validation(format!("duration must be positive, got {duration}"))
            })?;
        Ok(Self {
            doctor_name,
            date,
            time,
            duration,
        })
    }

    pub fn from_details(d: &'a AppointmentDetails) -> Self {
        Self {
            doctor_name: &d.doctor_name,
            date: d.date,
            time: d.time,
            duration: d.duration,
        }
    }

    pub fn from_appointment(a: &'a Appointment) -> Self {
        Self {
            doctor_name: &a.doctor_name,
            date: a.date,
            time: a.time,
            duration: a.duration,
        }
    }

    pub fn window(&self) -> TimeWindow {
        let start = minute_of_day(self.time);
        TimeWindow::new(start, start + self.duration as i64)
    }
}

fn window_of(apt: &Appointment) -> TimeWindow {
    TimeWindow::new(apt.start_minute(), apt.end_minute())
}

fn same_doctor(a: &str, b: &str) -> bool {
    a.trim() == b.trim()
}

/// Returns the first existing appointment the candidate would collide with.
///
/// Records are skipped when they are `exclude_id` itself, belong to another
/// doctor or date, or are cancelled.
pub fn find_conflict<'e, I>(
    candidate: &Candidate<'_>,
    existing: I,
    exclude_id: Option<&str>,
    buffer_minutes: i64,
) -> Option<&'e Appointment>
where
    I: IntoIterator<Item = &'e Appointment>,
{
    let wanted = candidate.window().widen(buffer_minutes);

    existing.into_iter().find(|apt| {
        if exclude_id.is_some_and(|id| id == apt.id) {
            return false;
        }
        if apt.date != candidate.date || !same_doctor(&apt.doctor_name, candidate.doctor_name) {
            return false;
        }
        if apt.is_cancelled() {
            return false;
        }

        let hit = wanted.overlaps(&window_of(apt));
        if hit {
            tracing::debug!(
                appointment_id = %apt.id,
                doctor = %apt.doctor_name,
                date = %apt.date,
                existing_start = apt.start_minute(),
                existing_end = apt.end_minute(),
                candidate_start = wanted.start,
                candidate_end = wanted.end,
                "buffered window overlaps existing appointment"
            );
        }
        hit
    })
}

pub fn has_conflict<'e, I>(
    candidate: &Candidate<'_>,
    existing: I,
    exclude_id: Option<&str>,
    buffer_minutes: i64,
) -> bool
where
    I: IntoIterator<Item = &'e Appointment>,
{
    find_conflict(candidate, existing, exclude_id, buffer_minutes).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentStatus, NewAppointment};

    fn apt(doctor: &str, date: &str, time: &str, duration: i64) -> Appointment {
        let details = NewAppointment {
            patient_name: "Existing Patient".to_string(),
            date: date.to_string(),
            time: time.to_string(),
            duration,
            doctor_name: doctor.to_string(),
            mode: "In-person".to_string(),
            status: Some("Confirmed".to_string()),
        }
        .validate()
        .unwrap();
        Appointment::create(details)
    }

    fn cand<'a>(doctor: &'a str, date: &str, time: &str, duration: i64) -> Candidate<'a> {
        Candidate::parse(doctor, date, time, duration).unwrap()
    }

    #[test]
    fn test_window_overlap_is_half_open() {
        let a = TimeWindow::new(540, 570);
        assert!(!a.overlaps(&TimeWindow::new(570, 600)));
        assert!(!a.overlaps(&TimeWindow::new(510, 540)));
        assert!(a.overlaps(&TimeWindow::new(569, 600)));
        assert!(a.overlaps(&TimeWindow::new(550, 560)));
    }

    #[test]
    fn test_no_existing_appointments() {
        let existing: Vec<Appointment> = Vec::new();
        let c = cand("Dr. A", "2025-12-28", "09:00", 30);
        assert!(!has_conflict(&c, &existing, None, DEFAULT_BUFFER_MINUTES));
    }

    #[test]
    fn test_direct_overlap() {
        let existing = vec![apt("Dr. A", "2025-12-28", "09:00", 30)];
        let c = cand("Dr. A", "2025-12-28", "09:15", 30);
        assert!(has_conflict(&c, &existing, None, 0));
    }

    #[test]
    fn test_candidate_enclosing_existing() {
        let existing = vec![apt("Dr. A", "2025-12-28", "10:00", 15)];
        let c = cand("Dr. A", "2025-12-28", "09:30", 90);
        assert!(has_conflict(&c, &existing, None, 0));
    }

    #[test]
    fn test_back_to_back_depends_on_buffer() {
        let existing = vec![apt("Dr. A", "2025-12-28", "09:00", 30)];
        let c = cand("Dr. A", "2025-12-28", "09:30", 30);
        assert!(!has_conflict(&c, &existing, None, 0));
        assert!(has_conflict(&c, &existing, None, 5));

        let before = cand("Dr. A", "2025-12-28", "08:30", 30);
        assert!(!has_conflict(&before, &existing, None, 0));
        assert!(has_conflict(&before, &existing, None, 5));
    }

    #[test]
    fn test_gap_equal_to_buffer_is_allowed() {
        let existing = vec![apt("Dr. A", "2025-12-28", "09:00", 30)];
        let c = cand("Dr. A", "2025-12-28", "09:35", 30);
        assert!(!has_conflict(&c, &existing, None, 5));
        let c = cand("Dr. A", "2025-12-28", "09:34", 30);
        assert!(has_conflict(&c, &existing, None, 5));
    }

    #[test]
    fn test_cancelled_never_blocks() {
        let existing =
            vec![apt("Dr. A", "2025-12-28", "09:00", 30).with_status(AppointmentStatus::Cancelled)];
        let c = cand("Dr. A", "2025-12-28", "09:00", 30);
        assert!(!has_conflict(&c, &existing, None, DEFAULT_BUFFER_MINUTES));
    }

    #[test]
    fn test_other_statuses_block() {
        for status in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Upcoming,
            AppointmentStatus::Completed,
        ] {
            let existing = vec![apt("Dr. A", "2025-12-28", "09:00", 30).with_status(status)];
            let c = cand("Dr. A", "2025-12-28", "09:10", 15);
            assert!(has_conflict(&c, &existing, None, 0), "{status} should block");
        }
    }

    #[test]
    fn test_self_exclusion() {
        let own = apt("Dr. A", "2025-12-28", "09:00", 30);
        let existing = vec![own.clone()];
        let c = cand("Dr. A", "2025-12-28", "09:10", 30);
        assert!(has_conflict(&c, &existing, None, 5));
        assert!(!has_conflict(&c, &existing, Some(own.id.as_str()), 5));
        assert!(has_conflict(&c, &existing, Some("someone-else"), 5));
    }

    #[test]
    fn test_cross_doctor_independence() {
        let existing = vec![apt("Dr. A", "2025-12-28", "09:00", 30)];
        let c = cand("Dr. B", "2025-12-28", "09:00", 30);
        assert!(!has_conflict(&c, &existing, None, DEFAULT_BUFFER_MINUTES));
    }

    #[test]
    fn test_doctor_match_is_exact() {
        let existing = vec![apt("Dr. A", "2025-12-28", "09:00", 30)];
        let c = cand("dr. a", "2025-12-28", "09:00", 30);
        assert!(!has_conflict(&c, &existing, None, 0));

        let c = cand("  Dr. A ", "2025-12-28", "09:00", 30);
        assert!(has_conflict(&c, &existing, None, 0));
    }

    #[test]
    fn test_cross_date_independence() {
        let existing = vec![apt("Dr. A", "2025-12-28", "09:00", 30)];
        let c = cand("Dr. A", "2025-12-29", "09:00", 30);
        assert!(!has_conflict(&c, &existing, None, DEFAULT_BUFFER_MINUTES));
    }

    #[test]
    fn test_find_conflict_reports_first_hit() {
        let existing = vec![
            apt("Dr. A", "2025-12-28", "08:00", 30),
            apt("Dr. A", "2025-12-28", "10:00", 30),
        ];
        let c = cand("Dr. A", "2025-12-28", "10:15", 30);
        let hit = find_conflict(&c, &existing, None, 0).unwrap();
        assert_eq!(hit.id, existing[1].id);
    }

    #[test]
    fn test_buffer_near_midnight_does_not_wrap() {
        let existing = vec![apt("Dr. A", "2025-12-28", "23:30", 30)];
        let c = cand("Dr. A", "2025-12-28", "00:00", 15);
        assert!(!has_conflict(&c, &existing, None, 60));
    }

    #[test]
    fn test_huge_buffer_saturates() {
        let w = TimeWindow::new(540, 570).widen(i64::MAX);
        assert_eq!(w.start, 540 - i64::MAX);
        assert_eq!(w.end, i64::MAX);

        let existing = vec![apt("Dr. A", "2025-12-28", "09:00", 30)];
        let c = cand("Dr. A", "2025-12-28", "18:00", 15);
        assert!(has_conflict(&c, &existing, None, i64::MAX));
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        assert!(matches!(
            Candidate::parse("Dr. A", "2025-12-28", "9am", 30),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            Candidate::parse("Dr. A", "2025-02-31", "09:00", 30),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            Candidate::parse("Dr. A", "2025-12-28", "09:00", 0),
            Err(AppError::Validation(_))
        ));
    }
}
