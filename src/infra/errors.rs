use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::media::records::RecordStoreError;
use crate::telegram::client::BotApiError;

pub type AppResult<T> = Result<T, AppError>;

/// Request-level error carrying the HTTP status it maps to. Bodies are plain
/// text; the service's whole surface is plain-text messages and redirects.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

// Convert from the typed leaf errors
impl From<RecordStoreError> for AppError {
    fn from(err: RecordStoreError) -> Self {
        tracing::error!(error = ?err, "database operation failed");
        Self::internal("database operation failed")
    }
}

impl From<BotApiError> for AppError {
    fn from(err: BotApiError) -> Self {
        tracing::error!(error = ?err, "telegram api call failed");
        Self::bad_gateway("telegram api call failed")
    }
}
