use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    minute_of_day, parse_date, parse_time, validate_duration, validate_name, validate_same_day,
};
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub duration: u32,
    pub mode: AppointmentMode,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
}

impl Appointment {
    /// Builds a fresh record with a system-assigned id and creation time.
    pub fn create(details: AppointmentDetails) -> Self {
        Self::from_details(
            uuid::Uuid::new_v4().to_string(),
            Utc::now().naive_utc(),
            details,
        )
    }

    /// Produces the replacement record for an update; id and created_at carry over.
    pub fn revised(&self, details: AppointmentDetails) -> Self {
        Self::from_details(self.id.clone(), self.created_at, details)
    }

    pub fn with_status(&self, status: AppointmentStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    fn from_details(id: String, created_at: NaiveDateTime, d: AppointmentDetails) -> Self {
        Self {
            id,
            patient_name: d.patient_name,
            doctor_name: d.doctor_name,
            date: d.date,
            time: d.time,
            duration: d.duration,
            mode: d.mode,
            status: d.status,
            created_at,
        }
    }

    pub fn start_minute(&self) -> i64 {
        minute_of_day(self.time)
    }

    pub fn end_minute(&self) -> i64 {
        self.start_minute() + self.duration as i64
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Cancelled
    }

    pub fn details(&self) -> AppointmentDetails {
        AppointmentDetails {
            patient_name: self.patient_name.clone(),
            doctor_name: self.doctor_name.clone(),
            date: self.date,
            time: self.time,
            duration: self.duration,
            mode: self.mode,
            status: self.status,
        }
    }
}

/// Validated appointment fields, everything but the system-assigned ones.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDetails {
    pub patient_name: String,
    pub doctor_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: u32,
    pub mode: AppointmentMode,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentMode {
    #[serde(rename = "In-person")]
    InPerson,
    Video,
    Phone,
}

impl AppointmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentMode::InPerson => "In-person",
            AppointmentMode::Video => "Video",
            AppointmentMode::Phone => "Phone",
        }
    }
}

impl FromStr for AppointmentMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in-person" => Ok(AppointmentMode::InPerson),
            "video" => Ok(AppointmentMode::Video),
            "phone" => Ok(AppointmentMode::Phone),
            _ => Err(AppError::validation(format!(
                "invalid mode: {s} (expected In-person, Video or Phone)"
            ))),
        }
    }
}

impl fmt::Display for AppointmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Upcoming,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Upcoming,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Upcoming => "Upcoming",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "invalid status: {s} (expected Scheduled, Confirmed, Upcoming, Completed or Cancelled)"
                ))
            })
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client input for `createAppointment`. Fields arrive as raw strings so that
/// malformed values surface as validation errors rather than decode failures.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAppointment {
    pub patient_name: String,
    pub date: String,
    pub time: String,
    pub duration: i64,
    pub doctor_name: String,
    pub mode: String,
    pub status: Option<String>,
}

impl NewAppointment {
    pub fn validate(&self) -> Result<AppointmentDetails, AppError> {
        let time = parse_time(&self.time)?;
        let duration = validate_duration(self.duration)?;
        validate_same_day(time, duration)?;

        Ok(AppointmentDetails {
            patient_name: validate_name("patient_name", &self.patient_name)?,
            doctor_name: validate_name("doctor_name", &self.doctor_name)?,
            date: parse_date(&self.date)?,
            time,
            duration,
            mode: self.mode.parse()?,
            status: match self.status.as_deref() {
                Some(s) if !s.trim().is_empty() => s.parse()?,
                _ => AppointmentStatus::default(),
            },
        })
    }
}

/// Client input for `updateAppointment`; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentUpdate {
    pub patient_name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration: Option<i64>,
    pub doctor_name: Option<String>,
    pub mode: Option<String>,
    pub status: Option<String>,
}

impl AppointmentUpdate {
    pub fn merge(&self, current: &Appointment) -> Result<AppointmentDetails, AppError> {
        let mut d = current.details();

        if let Some(name) = &self.patient_name {
            d.patient_name = validate_name("patient_name", name)?;
        }
        if let Some(name) = &self.doctor_name {
            d.doctor_name = validate_name("doctor_name", name)?;
        }
        if let Some(date) = &self.date {
            d.date = parse_date(date)?;
        }
        if let Some(time) = &self.time {
            d.time = parse_time(time)?;
        }
        if let Some(duration) = self.duration {
            d.duration = validate_duration(duration)?;
        }
        if let Some(mode) = &self.mode {
            d.mode = mode.parse()?;
        }
        if let Some(status) = &self.status {
            d.status = status.parse()?;
        }
        validate_same_day(d.time, d.duration)?;

        Ok(d)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentFilter {
    pub date: Option<String>,
    pub status: Option<String>,
    pub doctor_name: Option<String>,
}

impl AppointmentFilter {
    /// AND of every supplied criterion; blank criteria are ignored.
    pub fn matches(&self, apt: &Appointment) -> bool {
        if let Some(date) = supplied(&self.date) {
            if apt.date.format("%Y-%m-%d").to_string() != date {
                return false;
            }
        }
        if let Some(status) = supplied(&self.status) {
            if !apt.status.as_str().eq_ignore_ascii_case(status) {
                return false;
            }
        }
        if let Some(doctor) = supplied(&self.doctor_name) {
            if apt.doctor_name.to_lowercase() != doctor.to_lowercase() {
                return false;
            }
        }
        true
    }
}

fn supplied(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A slot to test against the calendar without booking it.
#[derive(Debug, Clone, Deserialize)]
pub struct ConflictQuery {
    pub doctor_name: String,
    pub date: String,
    pub time: String,
    pub duration: i64,
    #[serde(default)]
    pub exclude_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AppointmentStats {
    pub total_appointments: usize,
    pub scheduled: usize,
    pub confirmed: usize,
    pub upcoming: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl AppointmentStats {
    pub fn tally<'a>(appointments: impl IntoIterator<Item = &'a Appointment>) -> Self {
        let mut stats = Self::default();
        for apt in appointments {
            stats.total_appointments += 1;
            match apt.status {
                AppointmentStatus::Scheduled => stats.scheduled += 1,
                AppointmentStatus::Confirmed => stats.confirmed += 1,
                AppointmentStatus::Upcoming => stats.upcoming += 1,
                AppointmentStatus::Completed => stats.completed += 1,
                AppointmentStatus::Cancelled => stats.cancelled += 1,
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteResult {
    pub success: bool,
    pub message: String,
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
