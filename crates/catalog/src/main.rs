use anyhow::{Context, Result};
use catalog::{config::Config, handler::AppRouter, run_migrations, state::AppState};
use shared::{config::ConnectionManager, utils::init_logger};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let _guard = init_logger("catalog-service", is_dev, is_enable_file);

    info!("🚀 Starting Catalog Service initialization...");

    let config = Config::init().context("Failed to load configuration")?;

    let db_pool = ConnectionManager::new_pool(
        &config.database.database_url,
        config.database.max_connections,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.database.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
        info!("✅ Database migrations applied");
    }

    let state = AppState::new(db_pool, &config).context("Failed to create AppState")?;

    info!("✅ Application setup completed successfully.");

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("✅ Catalog Service shutdown complete.");
    Ok(())
}
