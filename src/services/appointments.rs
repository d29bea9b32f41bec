use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::db::AppointmentRepository;
use crate::errors::AppError;
use crate::models::{
    Appointment, AppointmentDetails, AppointmentFilter, AppointmentStats, AppointmentStatus,
    AppointmentUpdate, ConflictQuery, DeleteResult, NewAppointment,
};

use super::conflict::{find_conflict, has_conflict, Candidate};

/// Owns the repository behind a single reader-writer lock.
///
/// Every write takes the write lock for the whole check-then-commit sequence,
/// so two writers can never both pass the conflict check for the same slot.
pub struct AppointmentService {
    repo: RwLock<AppointmentRepository>,
    buffer_minutes: i64,
}

impl AppointmentService {
    pub fn new(repo: AppointmentRepository, buffer_minutes: i64) -> Self {
        Self {
            repo: RwLock::new(repo),
            buffer_minutes,
        }
    }

    pub fn buffer_minutes(&self) -> i64 {
        self.buffer_minutes
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, AppointmentRepository>, AppError> {
        self.repo.read().map_err(|_| AppError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, AppointmentRepository>, AppError> {
        self.repo.write().map_err(|_| AppError::LockPoisoned)
    }

    pub fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppError> {
        Ok(self.read()?.list(filter))
    }

    pub fn get_appointment(&self, id: &str) -> Result<Option<Appointment>, AppError> {
        Ok(self.read()?.get(id).cloned())
    }

    pub fn stats(&self) -> Result<AppointmentStats, AppError> {
        Ok(AppointmentStats::tally(self.read()?.iter()))
    }

    /// Answers whether a slot is taken without booking it.
    pub fn check_conflict(&self, query: &ConflictQuery) -> Result<bool, AppError> {
        let candidate = Candidate::parse(
            query.doctor_name.trim(),
            &query.date,
            &query.time,
            query.duration,
        )?;
        let repo = self.read()?;
        Ok(has_conflict(
            &candidate,
            repo.iter(),
            query.exclude_id.as_deref(),
            self.buffer_minutes,
        ))
    }

    pub fn create_appointment(&self, input: &NewAppointment) -> Result<Appointment, AppError> {
        let details = input.validate()?;

        let mut repo = self.write()?;
        self.ensure_free(&repo, &details, None)?;

        let appointment = Appointment::create(details);
        repo.insert(appointment.clone())?;

        tracing::info!(
            appointment_id = %appointment.id,
            doctor = %appointment.doctor_name,
            date = %appointment.date,
            time = %appointment.time.format("%H:%M"),
            "appointment created"
        );
        Ok(appointment)
    }

    pub fn update_appointment(
        &self,
        id: &str,
        update: &AppointmentUpdate,
    ) -> Result<Option<Appointment>, AppError> {
        let mut repo = self.write()?;
        let Some(current) = repo.get(id) else {
            return Ok(None);
        };

        let details = update.merge(current)?;
        let revised = current.revised(details);
        self.ensure_free(&repo, &revised.details(), Some(id))?;

        repo.replace(id, revised.clone())?;
        tracing::info!(appointment_id = %id, "appointment updated");
        Ok(Some(revised))
    }

    /// Any status may move to any other. Leaving `Cancelled` re-admits the
    /// slot, so that one transition is conflict-checked.
    pub fn update_appointment_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Option<Appointment>, AppError> {
        let status: AppointmentStatus = status.parse()?;

        let mut repo = self.write()?;
        let Some(current) = repo.get(id) else {
            return Ok(None);
        };

        let revised = current.with_status(status);
        if current.is_cancelled() && !revised.is_cancelled() {
            self.ensure_free(&repo, &revised.details(), Some(id))?;
        }

        let from = current.status;
        repo.replace(id, revised.clone())?;
        tracing::info!(appointment_id = %id, %from, to = %status, "appointment status changed");
        Ok(Some(revised))
    }

    pub fn delete_appointment(&self, id: &str) -> Result<DeleteResult, AppError> {
        let removed = self.write()?.delete(id);

        if removed {
            tracing::info!(appointment_id = %id, "appointment deleted");
            Ok(DeleteResult {
                success: true,
                message: format!("Appointment {id} deleted successfully"),
            })
        } else {
            Ok(DeleteResult {
                success: false,
                message: format!("Appointment {id} not found"),
            })
        }
    }

    fn ensure_free(
        &self,
        repo: &AppointmentRepository,
        details: &AppointmentDetails,
        exclude_id: Option<&str>,
    ) -> Result<(), AppError> {
        let candidate = Candidate::from_details(details);
        let blocking = find_conflict(&candidate, repo.iter(), exclude_id, self.buffer_minutes);
        if let Some(existing) = blocking {
            tracing::warn!(
                doctor = %details.doctor_name,
                date = %details.date,
                time = %details.time.format("%H:%M"),
                blocking_id = %existing.id,
                "rejected double booking"
            );
            return Err(AppError::Conflict {
                doctor_name: details.doctor_name.clone(),
                date: details.date.format("%Y-%m-%d").to_string(),
                time: details.time.format("%H:%M").to_string(),
            });
        }
        Ok(())
    }
}
