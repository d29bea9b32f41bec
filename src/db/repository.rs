use std::collections::HashMap;

use crate::errors::AppError;
use crate::models::{Appointment, AppointmentFilter};

/// In-memory appointment store keyed by id. All mutation goes through here.
#[derive(Debug, Default)]
pub struct AppointmentRepository {
    appointments: HashMap<String, Appointment>,
}

impl AppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, appointment: Appointment) -> Result<(), AppError> {
        if self.appointments.contains_key(&appointment.id) {
            return Err(AppError::DuplicateId(appointment.id));
        }
        self.appointments.insert(appointment.id.clone(), appointment);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.get(id)
    }

    /// Records matching every supplied filter, ordered by `(date, time)`.
    pub fn list(&self, filter: &AppointmentFilter) -> Vec<Appointment> {
        let mut matched: Vec<Appointment> = self
            .appointments
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        matched.sort_by(|a, b| (a.date, a.time, &a.id).cmp(&(b.date, b.time, &b.id)));
        matched
    }

    /// Overwrites the record stored under `id`. The record must keep that id.
    pub fn replace(&mut self, id: &str, record: Appointment) -> Result<(), AppError> {
        if record.id != id {
            return Err(AppError::validation(format!(
                "record id {} does not match {id}",
                record.id
            )));
        }
        match self.appointments.get_mut(id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(AppError::NotFound(format!("appointment {id}"))),
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.appointments.remove(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.values()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}
