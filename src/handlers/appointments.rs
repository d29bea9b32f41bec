use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{
    Appointment, AppointmentFilter, AppointmentUpdate, ConflictQuery, DeleteResult,
    NewAppointment,
};
use crate::state::AppState;

// GET /api/appointments?date=&status=&doctor_name=
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = state.appointments.list_appointments(&filter)?;
    Ok(Json(appointments))
}

// GET /api/appointments/conflicts?doctor_name=&date=&time=&duration=&exclude_id=
pub async fn check_conflict(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConflictQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let conflict = state.appointments.check_conflict(&query)?;
    Ok(Json(serde_json::json!({"conflict": conflict})))
}

// GET /api/appointments/:id
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    state
        .appointments
        .get_appointment(&id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("appointment {id}")))
}

// POST /api/appointments
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewAppointment>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let created = state.appointments.create_appointment(&body)?;
    Ok((StatusCode::CREATED, Json(created)))
}

// PUT /api/appointments/:id
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<AppointmentUpdate>,
) -> Result<Json<Appointment>, AppError> {
    state
        .appointments
        .update_appointment(&id, &body)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("appointment {id}")))
}

// PATCH /api/appointments/:id/status
#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    state
        .appointments
        .update_appointment_status(&id, &body.status)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("appointment {id}")))
}

// DELETE /api/appointments/:id
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, AppError> {
    let result = state.appointments.delete_appointment(&id)?;
    Ok(Json(result))
}
