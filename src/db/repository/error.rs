//! Error types for repository operations.
//!
//! Store failures are never collapsed into empty results: callers can always
//! tell `Ok(None)` (the row does not exist) apart from `Err(_)` (the store
//! itself failed).

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Connection pool or database connection errors.
    #[error("Connection error: {0}")]
    Connection(String),

    /// SQL query execution errors.
    #[error("Query error: {0}")]
    Query(String),

    /// An insert or update collided with the unique CPF constraint.
    #[error("Unique violation: {0}")]
    UniqueViolation(String),

    /// Configuration or initialization error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal/unexpected errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            Error::DatabaseError(_, info) => Self::Query(info.message().to_string()),
            other => Self::Query(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = RepositoryError::connection("pool exhausted");
        assert_eq!(err.to_string(), "Connection error: pool exhausted");

        let err = RepositoryError::UniqueViolation("duplicate cpf".to_string());
        assert_eq!(err.to_string(), "Unique violation: duplicate cpf");
    }

    #[test]
    fn helper_constructors_pick_the_right_variant() {
        assert!(matches!(
            RepositoryError::query("boom"),
            RepositoryError::Query(_)
        ));
        assert!(matches!(
            RepositoryError::configuration("missing url"),
            RepositoryError::Configuration(_)
        ));
        assert!(matches!(
            RepositoryError::internal("oops"),
            RepositoryError::Internal(_)
        ));
    }
}
