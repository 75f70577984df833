use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    /// Could not open a connection: refused, unresolvable host, rejected credentials.
    StorageUnavailable(sqlx::Error),
    /// Connected, but the statement itself failed.
    QueryFailed(sqlx::Error),
}

impl AppError {
    /// Client-facing text. The driver error is only ever logged.
    pub fn message(&self) -> &'static str {
        match self {
            AppError::StorageUnavailable(_) => "Database unavailable",
            AppError::QueryFailed(_) => "Database query failed",
        }
    }

    pub fn log(&self) {
        match self {
            AppError::StorageUnavailable(e) => tracing::error!("Database unavailable: {e}"),
            AppError::QueryFailed(e) => tracing::error!("Database query failed: {e}"),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::StorageUnavailable(e) => write!(f, "database unavailable: {e}"),
            AppError::QueryFailed(e) => write!(f, "database query failed: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::StorageUnavailable(e) | AppError::QueryFailed(e) => Some(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error", "message": self.message() })),
        )
            .into_response()
    }
}
