use crate::{
    abstract_trait::reference::{CategoryRepositoryTrait, StatusRepositoryTrait},
    model::{Category, Status},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};

#[derive(Clone)]
pub struct CategoryRepository {
    db: ConnectionPool,
}

impl CategoryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT category_id, name, created_at, updated_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, Category>(
            "SELECT category_id, name, created_at, updated_at FROM categories WHERE category_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }
}

#[derive(Clone)]
pub struct StatusRepository {
    db: ConnectionPool,
}

impl StatusRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StatusRepositoryTrait for StatusRepository {
    async fn find_all(&self) -> Result<Vec<Status>, RepositoryError> {
        let rows = sqlx::query_as::<_, Status>(
            "SELECT status_id, name, created_at, updated_at FROM statuses ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Status>, RepositoryError> {
        let row = sqlx::query_as::<_, Status>(
            "SELECT status_id, name, created_at, updated_at FROM statuses WHERE status_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }
}
