use anyhow::{Context, Result, anyhow};
use std::time::Duration;

pub const DEFAULT_UPSTREAM_URL: &str = "https://recruitment.fastprint.co.id/tes/api_tes_programmer";
pub const DEFAULT_SELLABLE_STATUS: &str = "sellable";

const DEFAULT_UPSTREAM_SECRET: &str = "bisacoding";
const DEFAULT_USERNAME_PREFIX: &str = "tesprogrammer";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_MAX_CONN: u32 = 5;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub run_migrations: bool,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url =
            lookup("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref().unwrap_or("true") {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let max_connections = match lookup("DB_MAX_CONN") {
            Some(value) => value
                .parse::<u32>()
                .context("DB_MAX_CONN must be a valid u32 integer")?,
            None => DEFAULT_DB_MAX_CONN,
        };

        Ok(Self {
            database_url,
            run_migrations,
            max_connections,
        })
    }
}

/// Settings for talking to the upstream product API.
///
/// `username_suffix` is the server-assigned daily counter appended to the
/// date-based username. It cannot be derived and has no default.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub api_url: String,
    pub secret: String,
    pub username_prefix: String,
    pub username_suffix: Option<String>,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_UPSTREAM_URL.to_string(),
            secret: DEFAULT_UPSTREAM_SECRET.to_string(),
            username_prefix: DEFAULT_USERNAME_PREFIX.to_string(),
            username_suffix: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl UpstreamConfig {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value
                    .parse::<u64>()
                    .context("UPSTREAM_TIMEOUT_SECS must be a valid u64 integer")?;
                if secs == 0 {
                    return Err(anyhow!("UPSTREAM_TIMEOUT_SECS must be greater than zero"));
                }
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        Ok(Self {
            api_url: lookup("UPSTREAM_API_URL").unwrap_or(defaults.api_url),
            secret: lookup("UPSTREAM_SECRET").unwrap_or(defaults.secret),
            username_prefix: lookup("UPSTREAM_USERNAME_PREFIX").unwrap_or(defaults.username_prefix),
            username_suffix: lookup("UPSTREAM_USERNAME_SUFFIX").filter(|s| !s.trim().is_empty()),
            timeout,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub sellable_status: String,
    pub database: DatabaseConfig,
    pub upstream: UpstreamConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = lookup("PORT")
            .context("Missing environment variable: PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let database = DatabaseConfig::from_lookup(&lookup).context("Invalid database config")?;
        let upstream = UpstreamConfig::from_lookup(&lookup).context("Invalid upstream config")?;

        Ok(Self {
            port,
            sellable_status: sellable_status_from(&lookup),
            database,
            upstream,
        })
    }
}

pub fn sellable_status_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("SELLABLE_STATUS")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SELLABLE_STATUS.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn upstream_defaults_leave_suffix_unset() {
        let config = UpstreamConfig::from_lookup(env(&[])).unwrap();

        assert_eq!(config.api_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.secret, "bisacoding");
        assert_eq!(config.username_prefix, "tesprogrammer");
        assert_eq!(config.username_suffix, None);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn upstream_overrides_are_read() {
        let config = UpstreamConfig::from_lookup(env(&[
            ("UPSTREAM_API_URL", "http://127.0.0.1:9000/api"),
            ("UPSTREAM_USERNAME_SUFFIX", "C23"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.username_suffix.as_deref(), Some("C23"));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = UpstreamConfig::from_lookup(env(&[("UPSTREAM_TIMEOUT_SECS", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn server_config_requires_port_and_database_url() {
        assert!(Config::from_lookup(env(&[("PORT", "8000")])).is_err());
        assert!(Config::from_lookup(env(&[("DATABASE_URL", "postgres://x")])).is_err());

        let config = Config::from_lookup(env(&[
            ("PORT", "8000"),
            ("DATABASE_URL", "postgres://x"),
            ("RUN_MIGRATIONS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8000);
        assert!(!config.database.run_migrations);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.sellable_status, DEFAULT_SELLABLE_STATUS);
    }

    #[test]
    fn run_migrations_must_be_a_boolean_word() {
        let result = DatabaseConfig::from_lookup(env(&[
            ("DATABASE_URL", "postgres://x"),
            ("RUN_MIGRATIONS", "yes"),
        ]));
        assert!(result.is_err());
    }
}
