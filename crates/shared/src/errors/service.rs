use crate::errors::{repository::RepositoryError, upstream::UpstreamError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Internal error: {0}")]
    Internal(String),
}
