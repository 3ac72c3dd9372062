use crate::{
    abstract_trait::reference::{
        DynCategoryRepository, DynStatusRepository, ReferenceQueryServiceTrait,
    },
    domain::response::reference::{CategoryResponse, StatusResponse},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils},
};
use tokio::time::Instant;
use tracing::{error, info};

/// Read-only access to categories and statuses.
#[derive(Clone)]
pub struct ReferenceQueryService {
    pub category: DynCategoryRepository,
    pub status: DynStatusRepository,
    pub metrics: Metrics,
}

impl ReferenceQueryService {
    pub fn new(
        category: DynCategoryRepository,
        status: DynStatusRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "reference_query_service");

        Self {
            category,
            status,
            metrics,
        }
    }
}

#[async_trait]
impl ReferenceQueryServiceTrait for ReferenceQueryService {
    async fn find_categories(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError> {
        let start = Instant::now();

        let categories = self.category.find_all().await.map_err(|e| {
            error!("❌ Failed to fetch categories: {e:?}");
            self.metrics
                .record(Method::Get, StatusUtils::Error, start.elapsed().as_secs_f64());
            ServiceError::Repo(e)
        })?;

        info!("✅ Retrieved {} categories", categories.len());
        self.metrics
            .record(Method::Get, StatusUtils::Success, start.elapsed().as_secs_f64());

        Ok(ApiResponse::success(
            "Categories retrieved successfully",
            categories.into_iter().map(CategoryResponse::from).collect(),
        ))
    }

    async fn find_statuses(&self) -> Result<ApiResponse<Vec<StatusResponse>>, ServiceError> {
        let start = Instant::now();

        let statuses = self.status.find_all().await.map_err(|e| {
            error!("❌ Failed to fetch statuses: {e:?}");
            self.metrics
                .record(Method::Get, StatusUtils::Error, start.elapsed().as_secs_f64());
            ServiceError::Repo(e)
        })?;

        info!("✅ Retrieved {} statuses", statuses.len());
        self.metrics
            .record(Method::Get, StatusUtils::Success, start.elapsed().as_secs_f64());

        Ok(ApiResponse::success(
            "Statuses retrieved successfully",
            statuses.into_iter().map(StatusResponse::from).collect(),
        ))
    }
}
