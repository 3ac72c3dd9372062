use crate::{
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::ProductDetail,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductDetail, RepositoryError>;
    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ProductDetail, RepositoryError>;
    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError>;
}
