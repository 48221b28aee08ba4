use thiserror::Error;

use crate::domain::bill::BillItemError;
use crate::repository::errors::RepositoryError;

/// Result type returned by every service function.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced at the service seam, mapped to HTTP statuses by the
/// route layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input, rejected before any mutation.
    #[error("{0}")]
    Validation(String),
    /// Absent, or present but owned by someone else. Indistinguishable.
    #[error("not found")]
    NotFound,
    /// A stock adjustment would have gone negative.
    #[error("insufficient stock")]
    InsufficientStock,
    /// A non-premium account tried to own a second business.
    #[error("premium plan required")]
    PremiumRequired,
    /// Every requested bill line failed; nothing was persisted.
    #[error("no valid items to bill")]
    NoValidItems(Vec<BillItemError>),
    /// Internal failure that is not the caller's fault. Logged at the
    /// route boundary, never detailed to the caller.
    #[error("{0}")]
    Internal(String),
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::InsufficientStock => ServiceError::InsufficientStock,
            other => ServiceError::Repository(other),
        }
    }
}
