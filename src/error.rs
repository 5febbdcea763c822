//! Typed errors and HTTP mapping.

use crate::response::StatusMessage;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Startup configuration failures. Fatal; reported before the listener starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

/// Request-level failures. Not-found on update/delete is deliberately absent:
/// those handlers report zero matches as a 200 status message.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field was absent or empty. Fixed message, 400.
    #[error("{0}")]
    Validation(&'static str),
    /// A storage call failed. Message from the database error, 500.
    #[error("{message}")]
    Persistence { message: String },
}

impl AppError {
    /// Replace an empty persistence message with `fallback`.
    pub fn or_fallback(self, fallback: &str) -> Self {
        match self {
            AppError::Persistence { message } if message.is_empty() => AppError::Persistence {
                message: fallback.to_string(),
            },
            other => other,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Persistence {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(StatusMessage::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let resp = AppError::Validation("Name can not be empty!").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn persistence_maps_to_server_error() {
        let resp = AppError::Persistence {
            message: "connection refused".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn or_fallback_keeps_non_empty_message() {
        let err = AppError::Persistence {
            message: "duplicate key".into(),
        }
        .or_fallback("Some error occurred");
        assert_eq!(err.to_string(), "duplicate key");
    }
}
