use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("token not found")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("token expired")]
    TokenExpired,

    #[error("acting user not found")]
    ActorNotFound,

    #[error("forbidden")]
    Forbidden,

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("email already registered")]
    EmailTaken,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("default role '{0}' is not configured")]
    DefaultRoleNotConfigured(&'static str),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
