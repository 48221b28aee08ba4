use thiserror::Error;

/// Result type returned by every repository operation.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced at the persistent-store seam.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The entity does not exist, or exists under a different business.
    /// The two cases are deliberately indistinguishable.
    #[error("entity not found")]
    NotFound,
    /// A stock decrement would have driven the stock level negative.
    #[error("insufficient stock")]
    InsufficientStock,
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => RepositoryError::NotFound,
            other => RepositoryError::Database(other),
        }
    }
}

impl RepositoryError {
    /// Whether the underlying failure was a unique-constraint violation.
    /// Used by the catalog service to retry barcode generation.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            RepositoryError::Database(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ))
        )
    }
}
