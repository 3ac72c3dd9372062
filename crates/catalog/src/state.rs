use crate::{
    config::Config,
    di::{DependenciesInject, DependenciesInjectDeps},
    repository::Repositories,
    sync::{CredentialDeriver, LocalClock, UpstreamClient},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("registry", &self.registry)
            .finish()
    }
}

impl AppState {
    pub fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let client =
            UpstreamClient::new(&config.upstream).context("Failed to build upstream client")?;

        let deps = DependenciesInjectDeps {
            repositories: Repositories::new(pool),
            clock: Arc::new(LocalClock),
            client: Arc::new(client),
            deriver: CredentialDeriver::from_config(&config.upstream),
            sellable_status: config.sellable_status.clone(),
        };

        Ok(Self::from_deps(deps))
    }

    pub fn from_deps(deps: DependenciesInjectDeps) -> Self {
        let mut registry = Registry::default();
        let di_container = DependenciesInject::new(deps, &mut registry);

        Self {
            di_container,
            registry: Arc::new(registry),
        }
    }
}
