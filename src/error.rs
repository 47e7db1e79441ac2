//! Application error type shared by both services.
//!
//! Every failure surfaced over HTTP is one of five kinds, each with a fixed
//! status code. The response body follows the platform-wide shape
//! `{errors, message, reason, status, timestamp}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub errors: Vec<String>,
    pub message: String,
    pub reason: String,
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input, caught before domain logic runs.
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },
    /// Requested entity does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Business rule violated (wrong actor, terminal state, limit reached).
    #[error("{0}")]
    IllegalState(String),
    /// Uniqueness or referential conflict with existing data.
    #[error("{0}")]
    Conflict(String),
    /// Unexpected infrastructure failure.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, reason, message, errors) = match self {
            AppError::Validation { message, errors } => (
                StatusCode::BAD_REQUEST,
                "Incorrectly made request.",
                message,
                errors,
            ),
            AppError::IllegalState(message) => (
                StatusCode::BAD_REQUEST,
                "For the requested operation the conditions are not met.",
                message,
                Vec::new(),
            ),
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                "The required object was not found.",
                message,
                Vec::new(),
            ),
            AppError::Conflict(message) => (
                StatusCode::CONFLICT,
                "Integrity constraint has been violated.",
                message,
                Vec::new(),
            ),
            AppError::Internal(message) => {
                tracing::error!("internal error: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.",
                    message,
                    Vec::new(),
                )
            }
        };

        let body = ApiError {
            errors,
            message,
            reason: reason.to_string(),
            status: status
                .canonical_reason()
                .unwrap_or("UNKNOWN")
                .to_uppercase()
                .replace(' ', "_"),
            timestamp: Utc::now()
                .naive_utc()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                let constraint = db.constraint().unwrap_or("unknown");
                return AppError::conflict(format!("Unique constraint {constraint} violated"));
            }
        }

        match e {
            sqlx::Error::RowNotFound => AppError::not_found("Requested row was not found"),
            other => AppError::internal(format!("Database error: {other}")),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let errors = e
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: {}", err.code),
                })
            })
            .collect();

        AppError::Validation {
            message: "Request validation failed".to_string(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let (status, json) = body_json(AppError::not_found("Event with id 7 was not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["status"], "NOT_FOUND");
        assert_eq!(json["message"], "Event with id 7 was not found");
        assert_eq!(json["reason"], "The required object was not found.");
    }

    #[tokio::test]
    async fn conflict_maps_to_409() {
        let (status, json) = body_json(AppError::conflict("Category Music already exists")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["status"], "CONFLICT");
    }

    #[tokio::test]
    async fn illegal_state_maps_to_400() {
        let (status, _) = body_json(AppError::illegal_state("Participant limit reached")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn validation_carries_field_errors() {
        let (status, json) = body_json(AppError::Validation {
            message: "Request validation failed".to_string(),
            errors: vec!["title: length".to_string()],
        })
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"][0], "title: length");
        assert!(json["timestamp"].as_str().is_some());
    }

    #[test]
    fn sqlx_row_not_found_becomes_not_found() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
