use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SyncRequest {
    /// Full upstream username; overrides the derived one for this run.
    #[serde(default)]
    #[schema(example = "tesprogrammer161026C23")]
    pub username: Option<String>,
}
