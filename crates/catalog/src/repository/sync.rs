use crate::{
    abstract_trait::sync::SyncRepositoryTrait,
    sync::{CandidateRecord, ProductChange, UpsertOutcome},
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::PgConnection;
use tracing::{debug, error};

const INSERT_CATEGORY: &str =
    "INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING RETURNING category_id";
const SELECT_CATEGORY: &str = "SELECT category_id FROM categories WHERE name = $1";
const INSERT_STATUS: &str =
    "INSERT INTO statuses (name) VALUES ($1) ON CONFLICT (name) DO NOTHING RETURNING status_id";
const SELECT_STATUS: &str = "SELECT status_id FROM statuses WHERE name = $1";
/// Serializes upserts of the same product name until the transaction ends,
/// including names that have no row yet.
const LOCK_PRODUCT_NAME: &str = "SELECT pg_advisory_xact_lock(hashtext($1))";

#[derive(Clone)]
pub struct SyncRepository {
    db: ConnectionPool,
}

impl SyncRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

/// Returns the id for `name`, inserting the row if it does not exist yet.
/// The flag is true when this call created it.
async fn find_or_create(
    conn: &mut PgConnection,
    insert_sql: &str,
    select_sql: &str,
    name: &str,
) -> Result<(i32, bool), RepositoryError> {
    let inserted = sqlx::query_scalar::<_, i32>(insert_sql)
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(id) = inserted {
        return Ok((id, true));
    }

    let id = sqlx::query_scalar::<_, i32>(select_sql)
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

    Ok((id, false))
}

#[async_trait]
impl SyncRepositoryTrait for SyncRepository {
    async fn upsert_candidate(
        &self,
        candidate: &CandidateRecord,
    ) -> Result<UpsertOutcome, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        sqlx::query(LOCK_PRODUCT_NAME)
            .bind(&candidate.name)
            .execute(&mut *tx)
            .await?;

        let price = Decimal::from(candidate.price);

        let (category_id, category_created) =
            find_or_create(&mut tx, INSERT_CATEGORY, SELECT_CATEGORY, &candidate.category).await?;
        let (status_id, status_created) =
            find_or_create(&mut tx, INSERT_STATUS, SELECT_STATUS, &candidate.status).await?;

        let existing = sqlx::query_as::<_, (i32, Decimal, i32, i32)>(
            r#"
            SELECT product_id, price, category_id, status_id
            FROM products
            WHERE name = $1
            ORDER BY product_id
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(&candidate.name)
        .fetch_optional(&mut *tx)
        .await?;

        let (product_id, change) = match existing {
            Some((id, stored, cat, st))
                if stored == price && cat == category_id && st == status_id =>
            {
                (id, ProductChange::Unchanged)
            }
            Some((id, _, _, _)) => {
                sqlx::query(
                    r#"
                    UPDATE products
                    SET price = $2,
                        category_id = $3,
                        status_id = $4,
                        updated_at = CURRENT_TIMESTAMP
                    WHERE product_id = $1
                    "#,
                )
                .bind(id)
                .bind(price)
                .bind(category_id)
                .bind(status_id)
                .execute(&mut *tx)
                .await?;

                (id, ProductChange::Updated)
            }
            None => {
                let id = sqlx::query_scalar::<_, i32>(
                    r#"
                    INSERT INTO products (name, price, category_id, status_id)
                    VALUES ($1, $2, $3, $4)
                    RETURNING product_id
                    "#,
                )
                .bind(&candidate.name)
                .bind(price)
                .bind(category_id)
                .bind(status_id)
                .fetch_one(&mut *tx)
                .await?;

                (id, ProductChange::Created)
            }
        };

        tx.commit().await?;

        debug!("{:?} product {product_id} {:?}", change, candidate.name);

        Ok(UpsertOutcome {
            product_id,
            change,
            category_created,
            status_created,
        })
    }
}
