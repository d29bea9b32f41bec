use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("Time conflict: {doctor_name} already has an appointment at {time} on {date}")]
    Conflict {
        doctor_name: String,
        date: String,
        time: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("duplicate appointment id: {0}")]
    DuplicateId(String),

    #[error("appointment store lock poisoned")]
    LockPoisoned,
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateId(_) => StatusCode::CONFLICT,
            AppError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
