use crate::{domain::requests::product::FindAllProducts, model::ProductDetail};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    /// Products whose status name equals `status`, newest first.
    async fn find_by_status(
        &self,
        status: &str,
        req: &FindAllProducts,
    ) -> Result<Vec<ProductDetail>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductDetail>, RepositoryError>;
    async fn count_all(&self) -> Result<i64, RepositoryError>;
    async fn count_by_status(&self, status: &str) -> Result<i64, RepositoryError>;
}
