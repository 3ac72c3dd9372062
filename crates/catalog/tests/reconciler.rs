use async_trait::async_trait;
use catalog::{
    abstract_trait::sync::SyncRepositoryTrait,
    repository::InMemoryCatalog,
    sync::{CandidateRecord, CatalogReconciler, ProductChange, UpsertOutcome},
};
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use std::sync::Arc;

fn candidate(name: &str, price: i64, category: &str, status: &str) -> CandidateRecord {
    CandidateRecord {
        name: name.into(),
        price,
        category: category.into(),
        status: status.into(),
    }
}

fn batch() -> Vec<CandidateRecord> {
    vec![
        candidate("Pen", 5000, "Stationery", "sellable"),
        candidate("Ink Cartridge", 75000, "Printer Supplies", "sellable"),
        candidate("Stapler", 32000, "Stationery", "not sellable"),
    ]
}

#[tokio::test]
async fn first_run_creates_everything() {
    let store = InMemoryCatalog::new();
    let reconciler = CatalogReconciler::new(Arc::new(store.clone()));

    let report = reconciler.reconcile(&batch()).await;

    assert_eq!(report.accepted, 3);
    assert_eq!(report.received, 0);
    assert_eq!(report.dropped, 0);
    assert_eq!(report.created, 3);
    assert_eq!(report.updated, 0);
    assert_eq!(report.categories_created, 2);
    assert_eq!(report.statuses_created, 2);
    assert!(report.failures.is_empty());
    assert_eq!(report.touched(), 3);
    assert_eq!(store.products().unwrap().len(), 3);
}

#[tokio::test]
async fn second_run_changes_nothing() {
    let store = InMemoryCatalog::new();
    let reconciler = CatalogReconciler::new(Arc::new(store.clone()));

    reconciler.reconcile(&batch()).await;
    let before = store.products().unwrap();

    let report = reconciler.reconcile(&batch()).await;

    assert_eq!(report.created, 0);
    assert_eq!(report.updated, 0);
    assert_eq!(report.unchanged, 3);
    assert_eq!(report.categories_created, 0);
    assert_eq!(report.statuses_created, 0);
    assert_eq!(report.touched(), 0);
    assert_eq!(store.products().unwrap(), before);
}

#[tokio::test]
async fn same_name_updates_in_place() {
    let store = InMemoryCatalog::new();
    let reconciler = CatalogReconciler::new(Arc::new(store.clone()));

    reconciler
        .reconcile(&[candidate("Pen", 5000, "Stationery", "sellable")])
        .await;
    let report = reconciler
        .reconcile(&[candidate("Pen", 5500, "Office", "not sellable")])
        .await;

    assert_eq!(report.created, 0);
    assert_eq!(report.updated, 1);
    assert_eq!(report.categories_created, 1);
    assert_eq!(report.statuses_created, 1);

    let products = store.products().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Pen");
    assert_eq!(products[0].price, Decimal::from(5500));
    assert_eq!(products[0].price.to_string(), "5500.00");
}

#[tokio::test]
async fn invalid_candidates_are_reported_not_written() {
    let store = InMemoryCatalog::new();
    let reconciler = CatalogReconciler::new(Arc::new(store.clone()));

    let report = reconciler
        .reconcile(&[
            candidate("Pe", 5000, "Stationery", "sellable"),
            candidate("Notebook", 12000, "", "sellable"),
            candidate("Pen", 1_000_000_000_000, "Stationery", "sellable"),
            candidate("Eraser", 2000, "Stationery", "sellable"),
        ])
        .await;

    assert_eq!(report.created, 1);
    assert_eq!(report.failures.len(), 3);
    assert_eq!(report.failures[0].name, "Pe");
    assert!(report.failures[0].reason.contains("at least 3 characters"));
    assert!(report.failures[1].reason.starts_with("category:"));
    assert!(report.failures[2].reason.contains("Price is too large."));

    let products = store.products().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Eraser");
}

/// Fails every candidate named `Broken` and stores the rest.
struct FlakyRepository {
    inner: InMemoryCatalog,
}

#[async_trait]
impl SyncRepositoryTrait for FlakyRepository {
    async fn upsert_candidate(
        &self,
        candidate: &CandidateRecord,
    ) -> Result<UpsertOutcome, RepositoryError> {
        if candidate.name == "Broken" {
            return Err(RepositoryError::Custom("connection reset".into()));
        }
        self.inner.upsert_candidate(candidate).await
    }
}

#[tokio::test]
async fn storage_failure_skips_only_that_candidate() {
    let store = InMemoryCatalog::new();
    let reconciler = CatalogReconciler::new(Arc::new(FlakyRepository {
        inner: store.clone(),
    }));

    let report = reconciler
        .reconcile(&[
            candidate("Pen", 5000, "Stationery", "sellable"),
            candidate("Broken", 100, "Stationery", "sellable"),
            candidate("Stapler", 32000, "Stationery", "sellable"),
        ])
        .await;

    assert_eq!(report.created, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "Broken");
    assert!(report.failures[0].reason.contains("connection reset"));
    assert_eq!(store.products().unwrap().len(), 2);
}

#[tokio::test]
async fn upsert_reports_what_changed() {
    let store = InMemoryCatalog::new();
    let pen = candidate("Pen", 5000, "Stationery", "sellable");

    let first = store.upsert_candidate(&pen).await.unwrap();
    let second = store.upsert_candidate(&pen).await.unwrap();

    assert_eq!(first.change, ProductChange::Created);
    assert!(first.category_created && first.status_created);
    assert_eq!(second.change, ProductChange::Unchanged);
    assert_eq!(second.product_id, first.product_id);
    assert!(!second.category_created && !second.status_created);
}
