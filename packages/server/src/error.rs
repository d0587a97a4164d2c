//! Application-level error type returned by handlers.
//!
//! All variants serialise to the [`ErrorResponse`] JSON format and map to the
//! appropriate HTTP status code.

use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quill_api::error::codes;
use quill_api::ErrorResponse;

use crate::service::ServiceError;
use crate::storage::StorageError;

/// An error that a handler can return; converts directly to an HTTP response.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Field name to message, one entry per failed field.
    Validation(BTreeMap<String, String>),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorResponse::new(codes::NOT_FOUND, msg))
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(codes::BAD_REQUEST, msg))
            }
            AppError::Validation(fields) => {
                let summary = fields
                    .iter()
                    .map(|(field, msg)| format!("{field}: {msg}"))
                    .collect::<Vec<_>>()
                    .join("; ");
                let body = ErrorResponse::new(
                    codes::VALIDATION_FAILED,
                    format!("validation failed: {summary}"),
                )
                .with_fields(fields);
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorResponse::new(codes::CONFLICT, msg))
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(codes::INTERNAL_ERROR, "internal server error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::ResourceNotFound { .. } => AppError::NotFound(e.to_string()),
            ServiceError::BadRequest(msg) => AppError::BadRequest(msg),
            ServiceError::Validation(errors) => AppError::Validation(
                errors
                    .field_messages()
                    .map(|(field, msg)| (field.to_string(), msg))
                    .collect(),
            ),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            ServiceError::Storage(e) => e.into(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound => AppError::NotFound("not found".into()),
            StorageError::Conflict(msg) => AppError::Conflict(msg),
            StorageError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}
