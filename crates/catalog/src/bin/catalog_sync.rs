use anyhow::{Context, Result};
use catalog::{
    config::{DatabaseConfig, UpstreamConfig, sellable_status_from},
    di::{DependenciesInject, DependenciesInjectDeps},
    domain::requests::product::FindAllProducts,
    repository::{InMemoryCatalog, Repositories},
    run_migrations,
    sync::{CredentialDeriver, LocalClock, SyncReport, UpstreamClient},
};
use clap::Parser;
use prometheus_client::registry::Registry;
use shared::{config::ConnectionManager, utils::init_logger};
use std::sync::Arc;
use tracing::info;

const SAMPLE_SIZE: usize = 5;

/// Fetch the upstream product list once and merge it into the catalog.
#[derive(Debug, Parser)]
#[command(name = "catalog-sync", version)]
struct Args {
    /// Full upstream username; replaces the derived one.
    #[arg(long)]
    username: Option<String>,

    /// Reconcile into a throwaway in-memory catalog instead of PostgreSQL.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let _guard = init_logger("catalog-sync", is_dev, false);

    let upstream = UpstreamConfig::init().context("Failed to load upstream configuration")?;
    let sellable_status = sellable_status_from(|key| std::env::var(key).ok());

    let repositories = if args.dry_run {
        info!("🧪 Dry run: reconciling into an in-memory catalog");
        Repositories::in_memory(&InMemoryCatalog::new())
    } else {
        let database = DatabaseConfig::init().context("Failed to load database configuration")?;
        let pool = ConnectionManager::new_pool(&database.database_url, database.max_connections)
            .await
            .context("Failed to initialize database pool")?;

        if database.run_migrations {
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
        }

        Repositories::new(pool)
    };

    let client = UpstreamClient::new(&upstream).context("Failed to build upstream client")?;

    let deps = DependenciesInjectDeps {
        repositories,
        clock: Arc::new(LocalClock),
        client: Arc::new(client),
        deriver: CredentialDeriver::from_config(&upstream),
        sellable_status: sellable_status.clone(),
    };
    let di = DependenciesInject::new(deps, &mut Registry::default());

    let response = di
        .sync
        .run(args.username.as_deref())
        .await
        .context("Catalog sync failed")?;

    print_report(&response.data);

    let counts = di.product_query.count_products().await?.data;
    let categories = di.reference_query.find_categories().await?.data;
    let statuses = di.reference_query.find_statuses().await?.data;
    let sellable = di
        .product_query
        .find_sellable(&FindAllProducts::default())
        .await?
        .data;

    println!();
    println!("Database stats:");
    println!("  Products:   {}", counts.total);
    println!("  Categories: {}", categories.len());
    println!("  Statuses:   {}", statuses.len());
    println!("  {sellable_status:?}: {}", counts.sellable);

    if !sellable.is_empty() {
        println!();
        println!("Sample products ({sellable_status}):");
        for product in sellable.iter().take(SAMPLE_SIZE) {
            println!(
                "  - {} ({}) - {} [{}]",
                product.name, product.category, product.price, product.status
            );
        }
    }

    Ok(())
}

fn print_report(report: &SyncReport) {
    println!("Sync finished");
    println!("  Received:           {}", report.received);
    println!("  Accepted:           {}", report.accepted);
    println!("  Dropped:            {}", report.dropped);
    println!("  Created:            {}", report.created);
    println!("  Updated:            {}", report.updated);
    println!("  Unchanged:          {}", report.unchanged);
    println!("  Categories created: {}", report.categories_created);
    println!("  Statuses created:   {}", report.statuses_created);

    if report.collection_missing {
        println!("  Warning: upstream response had no `data` collection");
    }

    if !report.failures.is_empty() {
        println!("  Failures:");
        for failure in &report.failures {
            println!("    - {}: {}", failure.name, failure.reason);
        }
    }
}
