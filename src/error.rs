//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Message returned to clients for any failure that is not theirs to fix.
pub const INTERNAL_MESSAGE: &str = "Erro interno do servidor";
pub const RESOURCE_NOT_FOUND: &str = "Recurso não encontrado";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Failures raised by a [`Store`](crate::store::Store) implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Insert of an owned row whose `user_id` does not reference an existing user.
    #[error("owner does not exist")]
    MissingOwner,
    /// Delete of a row that other rows still reference.
    #[error("row is still referenced")]
    Referenced,
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    MethodNotAllowed(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    /// Carries the detail for the server log; the client only sees [`INTERNAL_MESSAGE`].
    #[error("internal: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingOwner => AppError::NotFound("Usuário não encontrado".into()),
            StoreError::Referenced => {
                AppError::Conflict("Registro possui dependências vinculadas".into())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

// Body over the configured limit keeps its 413; every other body problem is a 400.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(rejection.body_text()),
            _ => AppError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

// A path segment that is not an integer never names a resource.
impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        AppError::NotFound(RESOURCE_NOT_FOUND.into())
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let error = match self {
            AppError::Internal(detail) => {
                tracing::error!(detail = %detail, "request failed");
                INTERNAL_MESSAGE.to_string()
            }
            other => {
                tracing::debug!(status = %status, error = %other, "request rejected");
                other.to_string()
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_owner_becomes_not_found() {
        let err = AppError::from(StoreError::MissingOwner);
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Usuário não encontrado"));
    }

    #[test]
    fn database_failure_hides_detail() {
        let err = AppError::from(StoreError::Database(sqlx::Error::PoolTimedOut));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_keeps_message() {
        let err = AppError::Validation("Data de expiração é obrigatória.".into());
        assert_eq!(err.to_string(), "Data de expiração é obrigatória.");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
