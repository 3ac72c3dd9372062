use super::DETAIL_COLUMNS;
use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::ProductDetail,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductDetail, RepositoryError> {
        info!("🆕 Creating product: {}", req.name);

        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO products (name, price, category_id, status_id, description)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT {DETAIL_COLUMNS}
            FROM p
            JOIN categories c ON c.category_id = p.category_id
            JOIN statuses s ON s.status_id = p.status_id
            "#
        );

        let product = sqlx::query_as::<_, ProductDetail>(&sql)
            .bind(&req.name)
            .bind(req.price)
            .bind(req.category_id)
            .bind(req.status_id)
            .bind(&req.description)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to create product {}: {:?}", req.name, e);
                RepositoryError::from(e)
            })?;

        info!("✅ Product created with ID: {}", product.product_id);
        Ok(product)
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ProductDetail, RepositoryError> {
        let id = req
            .id
            .ok_or_else(|| RepositoryError::Custom("Product ID is required".into()))?;

        info!("🔄 Updating product ID: {id}");

        let sql = format!(
            r#"
            WITH p AS (
                UPDATE products
                SET name = $2,
                    price = $3,
                    category_id = $4,
                    status_id = $5,
                    description = $6,
                    updated_at = CURRENT_TIMESTAMP
                WHERE product_id = $1
                RETURNING *
            )
            SELECT {DETAIL_COLUMNS}
            FROM p
            JOIN categories c ON c.category_id = p.category_id
            JOIN statuses s ON s.status_id = p.status_id
            "#
        );

        let product = sqlx::query_as::<_, ProductDetail>(&sql)
            .bind(id)
            .bind(&req.name)
            .bind(req.price)
            .bind(req.category_id)
            .bind(req.status_id)
            .bind(&req.description)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to update product {id}: {:?}", e);
                RepositoryError::from(e)
            })?
            .ok_or(RepositoryError::NotFound)?;

        info!("✅ Product {id} updated");
        Ok(product)
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting product ID: {id}");

        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {id}: {:?}", e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("✅ Product {id} deleted");
        Ok(())
    }
}
