pub mod appointments;
pub mod conflict;

pub use appointments::AppointmentService;
