use thiserror::Error;

/// Field-level failures raised by the create shapes before any statement is issued.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    Missing(&'static str),

    #[error("field `{field}` {reason}")]
    Malformed { field: &'static str, reason: String },

    #[error("field `{field}`: `{value}` is not a valid email address")]
    InvalidEmail { field: &'static str, value: String },
}

/// Errors surfaced by [`crate::db::Database`] operations.
///
/// Validation failures happen before any storage access; constraint
/// violations come back from the engine at write time. Nothing is retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Duplicate value in a UNIQUE column (user email, invoice number).
    #[error("unique constraint violated: {0}")]
    Unique(String),

    /// A write referenced a nonexistent parent row, or a delete would have
    /// left dependents behind.
    #[error("foreign key constraint violated: {0}")]
    ForeignKey(String),

    #[error("row not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return StoreError::NotFound;
        }
        if let sqlx::Error::Database(ref db_err) = err {
            match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    return StoreError::Unique(db_err.message().to_string());
                }
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    return StoreError::ForeignKey(db_err.message().to_string());
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}
