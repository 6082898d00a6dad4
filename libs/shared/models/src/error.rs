use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::availability::CapacityExceeded;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(CapacityExceeded),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    /// Body, path or query could not be extracted; keeps the extractor's status.
    #[error("Rejected request: {1}")]
    Rejected(StatusCode, String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::CapacityExceeded(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected(status, _) => *status,
        }
    }

    /// The human readable message sent back as `detail`.
    pub fn detail(&self) -> String {
        match self {
            AppError::Auth(msg)
            | AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::Database(msg)
            | AppError::Internal(msg)
            | AppError::Rejected(_, msg) => msg.clone(),
            AppError::CapacityExceeded(exceeded) => exceeded.to_string(),
        }
    }
}

impl From<CapacityExceeded> for AppError {
    fn from(exceeded: CapacityExceeded) -> Self {
        AppError::CapacityExceeded(exceeded)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.detail();

        if status.is_server_error() {
            tracing::error!("Error: {}: {}", status, detail);
        } else {
            tracing::warn!("Error: {}: {}", status, detail);
        }

        let body = match &self {
            AppError::CapacityExceeded(exceeded) => json!({
                "detail": detail,
                "alcance": exceeded.scope,
                "nombre": exceeded.name,
                "fecha": exceeded.date,
                "turnos_ocupados": exceeded.occupied,
                "turnos_totales": exceeded.total,
            }),
            _ => json!({ "detail": detail }),
        };

        (status, Json(body)).into_response()
    }
}
