use crate::{
    abstract_trait::{
        product::{repository::DynProductQueryRepository, service::ProductQueryServiceTrait},
        reference::DynCategoryRepository,
    },
    domain::{
        requests::product::FindAllProducts,
        response::product::{ProductCounts, ProductResponse},
    },
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status as StatusUtils},
};
use tokio::time::Instant;
use tracing::{error, info};

/// Read side of the catalog. Listings only show products whose status
/// matches `sellable_status`.
#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    pub category: DynCategoryRepository,
    pub sellable_status: String,
    pub metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(
        query: DynProductQueryRepository,
        category: DynCategoryRepository,
        sellable_status: impl Into<String>,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service");

        Self {
            query,
            category,
            sellable_status: sellable_status.into(),
            metrics,
        }
    }

    fn complete_success(&self, start: Instant, message: &str) {
        info!("✅ {message}");
        self.metrics.record(
            Method::Get,
            StatusUtils::Success,
            start.elapsed().as_secs_f64(),
        );
    }

    fn complete_error(&self, start: Instant, message: &str) {
        error!("❌ {message}");
        self.metrics.record(
            Method::Get,
            StatusUtils::Error,
            start.elapsed().as_secs_f64(),
        );
    }

    async fn sellable(
        &self,
        req: &FindAllProducts,
        start: Instant,
    ) -> Result<Vec<ProductResponse>, ServiceError> {
        match self.query.find_by_status(&self.sellable_status, req).await {
            Ok(products) => {
                self.complete_success(
                    start,
                    &format!("Retrieved {} sellable products", products.len()),
                );
                Ok(products.into_iter().map(ProductResponse::from).collect())
            }
            Err(e) => {
                self.complete_error(start, &format!("Failed to fetch products: {e:?}"));
                Err(ServiceError::Repo(e))
            }
        }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_sellable(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        info!(
            "🔍 Finding sellable products | Search: '{}', Category: {:?}",
            req.search, req.category_id
        );

        let start = Instant::now();
        let data = self.sellable(req, start).await?;

        Ok(ApiResponse::success("Products retrieved successfully", data))
    }

    async fn find_by_category(
        &self,
        category_id: i32,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        info!("🗂️ Finding sellable products in category {category_id}");

        let start = Instant::now();

        let category = match self.category.find_by_id(category_id).await {
            Ok(Some(category)) => category,
            Ok(None) => {
                self.complete_error(start, &format!("Category {category_id} not found"));
                return Err(ServiceError::Repo(RepositoryError::NotFound));
            }
            Err(e) => {
                self.complete_error(start, &format!("Failed to fetch category: {e:?}"));
                return Err(ServiceError::Repo(e));
            }
        };

        let req = FindAllProducts {
            category_id: Some(category.category_id),
            ..FindAllProducts::default()
        };
        let data = self.sellable(&req, start).await?;

        Ok(ApiResponse::success(
            format!("Products in category '{}' retrieved successfully", category.name),
            data,
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let start = Instant::now();

        match self.query.find_by_id(id).await {
            Ok(Some(product)) => {
                self.complete_success(start, &format!("Product {id} retrieved"));
                Ok(ApiResponse::success(
                    "Product retrieved successfully",
                    ProductResponse::from(product),
                ))
            }
            Ok(None) => {
                self.complete_error(start, &format!("Product {id} not found"));
                Err(ServiceError::Repo(RepositoryError::NotFound))
            }
            Err(e) => {
                self.complete_error(start, &format!("Failed to fetch product {id}: {e:?}"));
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn count_products(&self) -> Result<ApiResponse<ProductCounts>, ServiceError> {
        let start = Instant::now();

        let counts = async {
            let total = self.query.count_all().await?;
            let sellable = self.query.count_by_status(&self.sellable_status).await?;
            Ok::<_, RepositoryError>(ProductCounts { total, sellable })
        }
        .await;

        match counts {
            Ok(counts) => {
                self.complete_success(
                    start,
                    &format!("Counted {} products, {} sellable", counts.total, counts.sellable),
                );
                Ok(ApiResponse::success("Product counts retrieved", counts))
            }
            Err(e) => {
                self.complete_error(start, &format!("Failed to count products: {e:?}"));
                Err(ServiceError::Repo(e))
            }
        }
    }
}
