use super::DETAIL_COLUMNS;
use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    domain::requests::product::FindAllProducts, model::ProductDetail,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

/// `%term%` with LIKE wildcards in the term escaped.
fn search_pattern(search: &str) -> Option<String> {
    let term = search.trim();
    if term.is_empty() {
        return None;
    }

    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_by_status(
        &self,
        status: &str,
        req: &FindAllProducts,
    ) -> Result<Vec<ProductDetail>, RepositoryError> {
        info!(
            "🔍 Fetching products with status {status:?}, search: {:?}, category: {:?}",
            req.search, req.category_id
        );

        let sql = format!(
            r#"
            SELECT {DETAIL_COLUMNS}
            FROM products p
            JOIN categories c ON c.category_id = p.category_id
            JOIN statuses s ON s.status_id = p.status_id
            WHERE s.name = $1
              AND ($2::TEXT IS NULL OR p.name ILIKE $2 ESCAPE '\')
              AND ($3::INT IS NULL OR p.category_id = $3)
            ORDER BY p.created_at DESC, p.product_id DESC
            "#
        );

        let products = sqlx::query_as::<_, ProductDetail>(&sql)
            .bind(status)
            .bind(search_pattern(&req.search))
            .bind(req.category_id)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })?;

        info!("✅ Found {} products", products.len());
        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductDetail>, RepositoryError> {
        info!("🆔 Fetching product by ID: {id}");

        let sql = format!(
            r#"
            SELECT {DETAIL_COLUMNS}
            FROM products p
            JOIN categories c ON c.category_id = p.category_id
            JOIN statuses s ON s.status_id = p.status_id
            WHERE p.product_id = $1
            "#
        );

        let product = sqlx::query_as::<_, ProductDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product {id}: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(product)
    }

    async fn count_all(&self) -> Result<i64, RepositoryError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.db)
            .await?;

        Ok(total)
    }

    async fn count_by_status(&self, status: &str) -> Result<i64, RepositoryError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM products p
            JOIN statuses s ON s.status_id = p.status_id
            WHERE s.name = $1
            "#,
        )
        .bind(status)
        .fetch_one(&self.db)
        .await?;

        Ok(total)
    }
}
