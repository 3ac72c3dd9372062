use std::time::Duration;
use thiserror::Error;

/// Failures of a single fetch against the upstream product API.
///
/// Every variant is fatal to the sync run that produced it.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Unable to connect to the upstream API: {0}")]
    Connection(String),

    #[error("Upstream API did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Authentication rejected by the upstream API: username or password is wrong")]
    Unauthorized,

    #[error("Access to the upstream resource is forbidden")]
    Forbidden,

    #[error("Upstream API returned HTTP {0}")]
    Status(u16),

    #[error("Upstream response is not valid JSON: {0}")]
    Decode(String),

    #[error("Upstream request failed: {0}")]
    Request(String),
}
