use crate::{
    abstract_trait::product::{
        repository::DynProductCommandRepository, service::ProductCommandServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::ProductResponse,
    },
    validation::error_messages,
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
use validator::Validate;

#[derive(Clone)]
pub struct ProductCommandService {
    pub command: DynProductCommandRepository,
    pub metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(command: DynProductCommandRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service");

        Self { command, metrics }
    }

    fn complete(&self, method: Method, start: Instant, is_success: bool, message: &str) {
        let status = if is_success {
            info!("✅ {message}");
            StatusUtils::Success
        } else {
            error!("❌ {message}");
            StatusUtils::Error
        };

        self.metrics
            .record(method, status, start.elapsed().as_secs_f64());
    }

    fn validate_request(&self, req: &impl Validate) -> Result<(), ServiceError> {
        req.validate()
            .map_err(|errors| ServiceError::Validation(error_messages(&errors)))
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆕 Creating product: {}", req.name);

        let start = Instant::now();
        self.validate_request(req)?;
        let req = req.trimmed();

        match self.command.create_product(&req).await {
            Ok(product) => {
                self.complete(
                    Method::Post,
                    start,
                    true,
                    &format!("Product created with ID {}", product.product_id),
                );
                Ok(ApiResponse::success(
                    "Product created successfully",
                    ProductResponse::from(product),
                ))
            }
            Err(e) => {
                self.complete(
                    Method::Post,
                    start,
                    false,
                    &format!("Failed to create product: {e:?}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let Some(id) = req.id else {
            return Err(ServiceError::Validation(vec![
                "id: Product ID is required.".to_string(),
            ]));
        };

        info!("🔄 Updating product ID: {id}");

        let start = Instant::now();
        self.validate_request(req)?;
        let req = req.trimmed();

        match self.command.update_product(&req).await {
            Ok(product) => {
                self.complete(Method::Put, start, true, &format!("Product {id} updated"));
                Ok(ApiResponse::success(
                    "Product updated successfully",
                    ProductResponse::from(product),
                ))
            }
            Err(e) => {
                self.complete(
                    Method::Put,
                    start,
                    false,
                    &format!("Failed to update product {id}: {e:?}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn delete_product(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting product ID: {id}");

        let start = Instant::now();

        match self.command.delete_product(id).await {
            Ok(()) => {
                self.complete(Method::Delete, start, true, &format!("Product {id} deleted"));
                Ok(ApiResponse::success("Product deleted successfully", ()))
            }
            Err(e) => {
                self.complete(
                    Method::Delete,
                    start,
                    false,
                    &format!("Failed to delete product {id}: {e:?}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }
}
