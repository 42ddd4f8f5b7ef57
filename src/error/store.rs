use thiserror::Error as ThisError;

/// Failure talking to the store, either in SQL or on the way to the actor that owns the connection.
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Ractor error: {0}")]
    RactorError(String),
}

impl StoreError {
    /// True when the statement was rejected by a `UNIQUE` constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StoreError::DatabaseError(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}
