use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Decoded upstream body, untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse(pub Value);

impl RawResponse {
    pub fn collection(&self) -> Option<&Vec<Value>> {
        self.0.get(super::COLLECTION_FIELD).and_then(Value::as_array)
    }

    pub fn has_collection(&self) -> bool {
        self.collection().is_some()
    }

    pub fn item_count(&self) -> usize {
        self.collection().map(Vec::len).unwrap_or(0)
    }
}

/// A parsed product observation that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub price: i64,
    pub category: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductChange {
    Created,
    Updated,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub product_id: i32,
    pub change: ProductChange,
    pub category_created: bool,
    pub status_created: bool,
}
