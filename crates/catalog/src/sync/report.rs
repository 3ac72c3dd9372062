use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CandidateFailure {
    pub name: String,
    pub reason: String,
}

/// Outcome of one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SyncReport {
    /// Entries in the upstream collection.
    pub received: usize,
    /// Candidates that survived parsing.
    pub accepted: usize,
    /// Entries discarded by the parser.
    pub dropped: usize,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub categories_created: usize,
    pub statuses_created: usize,
    pub failures: Vec<CandidateFailure>,
    /// The upstream body had no `data` array at all.
    pub collection_missing: bool,
}

impl SyncReport {
    /// Products inserted or overwritten.
    pub fn touched(&self) -> usize {
        self.created + self.updated
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "received={} accepted={} dropped={} created={} updated={} unchanged={} \
             categories_created={} statuses_created={} failures={}",
            self.received,
            self.accepted,
            self.dropped,
            self.created,
            self.updated,
            self.unchanged,
            self.categories_created,
            self.statuses_created,
            self.failures.len()
        )
    }
}
