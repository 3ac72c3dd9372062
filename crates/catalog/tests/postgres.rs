//! Runs only when `DATABASE_URL` points at a disposable PostgreSQL database.

use catalog::{
    abstract_trait::{
        product::repository::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
        sync::SyncRepositoryTrait,
    },
    domain::requests::product::CreateProductRequest,
    repository::{ProductCommandRepository, ProductQueryRepository, SyncRepository},
    run_migrations,
    sync::{CandidateRecord, ProductChange},
};
use chrono::Utc;
use rust_decimal::Decimal;
use shared::config::{ConnectionManager, ConnectionPool};

async fn database() -> Option<ConnectionPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };

    let pool = ConnectionManager::new_pool(&url, 10).await.unwrap();
    run_migrations(&pool).await.unwrap();
    Some(pool)
}

/// Keeps rows from different runs against the same database apart.
fn unique(label: &str) -> String {
    format!("{label} {}", Utc::now().format("%Y%m%d%H%M%S%f"))
}

async fn cleanup(pool: &ConnectionPool, product: &str, category: &str, status: &str) {
    sqlx::query("DELETE FROM products WHERE name = $1")
        .bind(product)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("DELETE FROM categories WHERE name = $1")
        .bind(category)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("DELETE FROM statuses WHERE name = $1")
        .bind(status)
        .execute(pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn concurrent_upserts_of_one_name_create_one_row() {
    let Some(pool) = database().await else {
        return;
    };

    let candidate = CandidateRecord {
        name: unique("Pen"),
        price: 5000,
        category: unique("Stationery"),
        status: unique("sellable"),
    };
    let repo = SyncRepository::new(pool.clone());

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            let candidate = candidate.clone();
            tokio::spawn(async move { repo.upsert_candidate(&candidate).await })
        })
        .collect();

    let mut created = 0;
    let mut product_ids = Vec::new();
    for task in tasks {
        let outcome = task.await.unwrap().unwrap();
        if outcome.change == ProductChange::Created {
            created += 1;
        }
        product_ids.push(outcome.product_id);
    }

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE name = $1")
        .bind(&candidate.name)
        .fetch_one(&pool)
        .await
        .unwrap();

    cleanup(&pool, &candidate.name, &candidate.category, &candidate.status).await;

    assert_eq!(created, 1);
    assert_eq!(rows, 1);
    assert!(product_ids.iter().all(|id| *id == product_ids[0]));
}

#[tokio::test]
async fn prices_keep_two_decimal_places() {
    let Some(pool) = database().await else {
        return;
    };

    let candidate = CandidateRecord {
        name: unique("Ink"),
        price: 7000,
        category: unique("Printer Supplies"),
        status: unique("sellable"),
    };
    let outcome = SyncRepository::new(pool.clone())
        .upsert_candidate(&candidate)
        .await
        .unwrap();

    let synced = ProductQueryRepository::new(pool.clone())
        .find_by_id(outcome.product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(synced.price.to_string(), "7000.00");

    let created = ProductCommandRepository::new(pool.clone())
        .create_product(&CreateProductRequest {
            name: candidate.name.clone(),
            price: Decimal::new(500050, 2),
            category_id: synced.category_id,
            status_id: synced.status_id,
            description: None,
        })
        .await
        .unwrap();

    cleanup(&pool, &candidate.name, &candidate.category, &candidate.status).await;

    assert_eq!(created.price, Decimal::new(500050, 2));
    assert_eq!(created.price.to_string(), "5000.50");
}
