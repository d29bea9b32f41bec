pub mod appointments;
pub mod health;

use std::sync::Arc;

use axum::routing::{get, patch};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route(
            "/api/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route("/api/appointments/conflicts", get(appointments::check_conflict))
        .route(
            "/api/appointments/:id",
            get(appointments::get_appointment)
                .put(appointments::update_appointment)
                .delete(appointments::delete_appointment),
        )
        .route(
            "/api/appointments/:id/status",
            patch(appointments::update_appointment_status),
        )
}
