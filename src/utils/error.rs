use sqlx::error::ErrorKind;
use thiserror::Error;
use tracing::error;

/// SQLSTATE raised by Postgres when a statement is cancelled or times out.
const QUERY_CANCELED: &str = "57014";

/// Failure reported by a [`Store`](crate::store::Store).
///
/// This is the only error type that crosses the store seam; repositories
/// turn every variant into an [`Outcome`](crate::utils::outcome::Outcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Unique constraint violated: {constraint:?}")]
    UniqueViolation { constraint: Option<String> },

    #[error("Foreign key constraint violated: {constraint:?}")]
    ForeignKeyViolation { constraint: Option<String> },

    #[error("Check constraint violated: {constraint:?}")]
    CheckViolation { constraint: Option<String> },

    #[error("Store operation cancelled")]
    Cancelled,

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    pub fn unique(constraint: &str) -> Self {
        StoreError::UniqueViolation {
            constraint: Some(constraint.to_string()),
        }
    }

    pub fn foreign_key(constraint: &str) -> Self {
        StoreError::ForeignKeyViolation {
            constraint: Some(constraint.to_string()),
        }
    }

    pub fn check(constraint: &str) -> Self {
        StoreError::CheckViolation {
            constraint: Some(constraint.to_string()),
        }
    }

    pub fn constraint(&self) -> Option<&str> {
        match self {
            StoreError::UniqueViolation { constraint }
            | StoreError::ForeignKeyViolation { constraint }
            | StoreError::CheckViolation { constraint } => constraint.as_deref(),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StoreError::UniqueViolation { .. } => "UNIQUE_VIOLATION",
            StoreError::ForeignKeyViolation { .. } => "FOREIGN_KEY_VIOLATION",
            StoreError::CheckViolation { .. } => "CHECK_VIOLATION",
            StoreError::Cancelled => "CANCELLED",
            StoreError::Unavailable(_) => "UNAVAILABLE",
            StoreError::Database(_) => "DATABASE_ERROR",
        }
    }

    pub fn log(&self, operation: &str) {
        match self {
            StoreError::Unavailable(msg) | StoreError::Database(msg) => {
                error!(operation, code = self.code(), message = %msg, "Store error");
            }
            _ => {
                error!(operation, code = self.code(), error = ?self, "Store error");
            }
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => {
                let constraint = db.constraint().map(str::to_owned);
                match db.kind() {
                    ErrorKind::UniqueViolation => StoreError::UniqueViolation { constraint },
                    ErrorKind::ForeignKeyViolation => {
                        StoreError::ForeignKeyViolation { constraint }
                    }
                    ErrorKind::CheckViolation => StoreError::CheckViolation { constraint },
                    _ if db.code().as_deref() == Some(QUERY_CANCELED) => StoreError::Cancelled,
                    _ => StoreError::Database(db.message().to_string()),
                }
            }
            sqlx::Error::PoolTimedOut => StoreError::Cancelled,
            other @ (sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_)) => {
                StoreError::Unavailable(other.to_string())
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_is_exposed_for_constraint_errors() {
        assert_eq!(
            StoreError::unique("ux_users_email").constraint(),
            Some("ux_users_email")
        );
        assert_eq!(StoreError::Cancelled.constraint(), None);
    }

    #[test]
    fn test_pool_timeout_is_cancellation() {
        assert_eq!(StoreError::from(sqlx::Error::PoolTimedOut), StoreError::Cancelled);
        assert_eq!(
            StoreError::from(sqlx::Error::RowNotFound).code(),
            "DATABASE_ERROR"
        );
    }
}
