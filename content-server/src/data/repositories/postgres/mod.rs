use crate::domain::error::DomainError;

pub(crate) mod post_repository;
pub(crate) mod role_repository;
pub(crate) mod user_repository;

/// Connectivity failures surface as a distinct kind; everything else
/// is unexpected and scoped to the single request.
pub(super) fn map_db_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Io(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => DomainError::StorageUnavailable(err.to_string()),
        _ => DomainError::Unexpected(err.to_string()),
    }
}
