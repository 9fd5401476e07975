use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Invalid service: {0}")]
    InvalidService(String),
    #[error("Requested time is in the past")]
    PastDate,
    #[error("Outside business hours: {0}")]
    OutOfHours(String),
    #[error("Slot unavailable: {0}")]
    SlotUnavailable(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable discriminator carried next to the human message.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Database(_) => "storage_failure",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidService(_) => "invalid_service",
            AppError::PastDate => "past_date",
            AppError::OutOfHours(_) => "out_of_hours",
            AppError::SlotUnavailable(_) => "slot_unavailable",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    let code = db_err.code().unwrap_or_default();

                    // 2067 = SQLite Unique Constraint
                    if code == "2067" {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "kind": "slot_unavailable", "error": "Resource already exists (duplicate entry)" }))
                        ).into_response();
                    }
                }

                error!("Database error: {:?}", e);
                (StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidService(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PastDate => (StatusCode::BAD_REQUEST, "Requested time is in the past".to_string()),
            AppError::OutOfHours(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::SlotUnavailable(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        let body = Json(json!({
            "kind": self.kind(),
            "error": message
        }));

        (status, body).into_response()
    }
}
