use crate::sync::{CandidateRecord, Credentials, RawResponse, SyncReport, UpsertOutcome};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError, UpstreamError},
};
use std::sync::Arc;

pub type DynClock = Arc<dyn Clock + Send + Sync>;
pub type DynUpstreamClient = Arc<dyn UpstreamClientTrait + Send + Sync>;
pub type DynSyncRepository = Arc<dyn SyncRepositoryTrait + Send + Sync>;
pub type DynSyncService = Arc<dyn SyncServiceTrait + Send + Sync>;

/// Source of the calendar date credentials are derived from.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[async_trait]
pub trait UpstreamClientTrait {
    async fn fetch(&self, credentials: &Credentials) -> Result<RawResponse, UpstreamError>;
}

#[async_trait]
pub trait SyncRepositoryTrait {
    /// Finds or creates the candidate's category and status, then inserts or
    /// updates the product with the same name. All or nothing per candidate.
    async fn upsert_candidate(
        &self,
        candidate: &CandidateRecord,
    ) -> Result<UpsertOutcome, RepositoryError>;
}

#[async_trait]
pub trait SyncServiceTrait {
    async fn run(
        &self,
        username_override: Option<&str>,
    ) -> Result<ApiResponse<SyncReport>, ServiceError>;
}
