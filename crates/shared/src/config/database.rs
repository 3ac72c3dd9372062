use anyhow::{Context, Result};
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::info;

pub type ConnectionPool = Pool<Postgres>;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct ConnectionManager;

impl ConnectionManager {
    /// Connects a bounded PostgreSQL pool; fails fast if the database is
    /// unreachable.
    pub async fn new_pool(connection_string: &str, max_connections: u32) -> Result<ConnectionPool> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(connection_string)
            .await
            .context("Failed to create database connection pool")?;

        info!("🗄️ Database pool ready (max {max_connections} connections)");
        Ok(pool)
    }
}
