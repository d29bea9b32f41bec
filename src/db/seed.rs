use crate::errors::AppError;
use crate::models::{Appointment, NewAppointment};

use super::AppointmentRepository;

// (patient, date, time, duration, doctor, status, mode)
const DEMO_APPOINTMENTS: &[(&str, &str, &str, i64, &str, &str, &str)] = &[
    ("Rajesh Kumar", "2025-12-28", "09:00", 30, "Dr. Sarah Johnson", "Confirmed", "In-person"),
    ("Priya Sharma", "2025-12-28", "09:30", 45, "Dr. Rajesh Verma", "Scheduled", "Video"),
    ("Amit Patel", "2025-12-28", "10:00", 30, "Dr. Sarah Johnson", "Upcoming", "In-person"),
    ("Sneha Reddy", "2025-12-28", "14:00", 60, "Dr. Anjali Desai", "Confirmed", "Phone"),
    ("Vikram Singh", "2025-12-29", "10:00", 30, "Dr. Sarah Johnson", "Scheduled", "In-person"),
    ("Ananya Iyer", "2025-12-29", "11:00", 45, "Dr. Rajesh Verma", "Confirmed", "Video"),
    ("Karan Malhotra", "2025-12-30", "09:00", 30, "Dr. Anjali Desai", "Scheduled", "In-person"),
    ("Deepika Nair", "2025-12-30", "15:00", 60, "Dr. Sarah Johnson", "Confirmed", "Video"),
    ("Arjun Chopra", "2025-12-31", "10:30", 45, "Dr. Rajesh Verma", "Scheduled", "Phone"),
    ("Meera Gupta", "2026-01-02", "09:00", 30, "Dr. Anjali Desai", "Scheduled", "In-person"),
    ("Rohit Sharma", "2025-12-26", "09:00", 30, "Dr. Sarah Johnson", "Completed", "In-person"),
    ("Kavya Menon", "2025-12-26", "14:00", 45, "Dr. Rajesh Verma", "Completed", "Video"),
    ("Sanjay Deshmukh", "2025-12-27", "10:00", 30, "Dr. Anjali Desai", "Completed", "In-person"),
    ("Pooja Bhat", "2025-12-27", "11:00", 60, "Dr. Sarah Johnson", "Cancelled", "Phone"),
    ("Nikhil Rao", "2025-12-25", "09:30", 45, "Dr. Rajesh Verma", "Completed", "Video"),
];

/// Loads the demo data set. Records are inserted directly; the set is known
/// to be free of double bookings.
pub fn seed_demo_data(repo: &mut AppointmentRepository) -> Result<usize, AppError> {
    for (patient, date, time, duration, doctor, status, mode) in DEMO_APPOINTMENTS {
        let details = NewAppointment {
            patient_name: patient.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            duration: *duration,
            doctor_name: doctor.to_string(),
            mode: mode.to_string(),
            status: Some(status.to_string()),
        }
        .validate()?;
        repo.insert(Appointment::create(details))?;
    }
    Ok(DEMO_APPOINTMENTS.len())
}
