pub mod group_repository;
pub mod post_repository;
pub mod user_repository;

use tracing::error;

use crate::domain::error::DomainError;

pub(crate) fn db_error(op: &str, err: sqlx::Error) -> DomainError {
    error!("{op}: {err}");
    DomainError::Internal(format!("database error: {err}"))
}
