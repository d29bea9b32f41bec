pub mod appointment;
pub mod validation;

pub use appointment::{
    Appointment, AppointmentDetails, AppointmentFilter, AppointmentMode, AppointmentStats,
    AppointmentStatus, AppointmentUpdate, ConflictQuery, DeleteResult, NewAppointment,
};
