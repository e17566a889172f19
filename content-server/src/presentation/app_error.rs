use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(err) => {
                let (status, msg) = match &err {
                    DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                    DomainError::MissingToken
                    | DomainError::InvalidToken
                    | DomainError::TokenExpired
                    | DomainError::InvalidCredentials => {
                        (StatusCode::UNAUTHORIZED, err.to_string())
                    }
                    DomainError::Forbidden => (StatusCode::FORBIDDEN, err.to_string()),
                    DomainError::ActorNotFound | DomainError::NotFound(_) => {
                        (StatusCode::NOT_FOUND, err.to_string())
                    }
                    DomainError::PasswordMismatch | DomainError::EmailTaken => {
                        (StatusCode::CONFLICT, err.to_string())
                    }
                    DomainError::StorageUnavailable(_) => {
                        error!("storage unavailable: {err}");
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            "storage unavailable".to_string(),
                        )
                    }
                    DomainError::DefaultRoleNotConfigured(_) => {
                        error!("deployment fault: {err}");
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "internal error".to_string(),
                        )
                    }
                    DomainError::Unexpected(_) => {
                        error!("unexpected domain error: {err}");
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "internal error".to_string(),
                        )
                    }
                };
                (status, msg)
            }
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(err) => {
                error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: msg })).into_response()
    }
}
