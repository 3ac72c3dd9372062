use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::RowNotFound => RepositoryError::NotFound,
            SqlxError::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::AlreadyExists(db.message().to_string())
            }
            SqlxError::Database(ref db) if db.is_foreign_key_violation() => {
                RepositoryError::ForeignKey(db.message().to_string())
            }
            other => RepositoryError::Sqlx(other),
        }
    }
}
