use crate::{
    domain::response::reference::{CategoryResponse, StatusResponse},
    model::{Category, Status},
};
use async_trait::async_trait;
use shared::{
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError},
};
use std::sync::Arc;

pub type DynCategoryRepository = Arc<dyn CategoryRepositoryTrait + Send + Sync>;
pub type DynStatusRepository = Arc<dyn StatusRepositoryTrait + Send + Sync>;
pub type DynReferenceQueryService = Arc<dyn ReferenceQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CategoryRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepositoryError>;
}

#[async_trait]
pub trait StatusRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<Status>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Status>, RepositoryError>;
}

#[async_trait]
pub trait ReferenceQueryServiceTrait {
    async fn find_categories(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError>;
    async fn find_statuses(&self) -> Result<ApiResponse<Vec<StatusResponse>>, ServiceError>;
}
