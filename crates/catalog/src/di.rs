use crate::{
    abstract_trait::{
        product::service::{DynProductCommandService, DynProductQueryService},
        reference::DynReferenceQueryService,
        sync::{DynClock, DynSyncService, DynUpstreamClient},
    },
    repository::Repositories,
    service::{
        CatalogSyncService, ProductCommandService, ProductQueryService, ReferenceQueryService,
    },
    sync::CredentialDeriver,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub reference_query: DynReferenceQueryService,
    pub sync: DynSyncService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .field("reference_query", &"ReferenceQueryService")
            .field("sync", &"CatalogSyncService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub repositories: Repositories,
    pub clock: DynClock,
    pub client: DynUpstreamClient,
    pub deriver: CredentialDeriver,
    pub sellable_status: String,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            repositories,
            clock,
            client,
            deriver,
            sellable_status,
        } = deps;

        let product_query = Arc::new(ProductQueryService::new(
            repositories.product_query.clone(),
            repositories.category.clone(),
            sellable_status,
            registry,
        )) as DynProductQueryService;

        let product_command = Arc::new(ProductCommandService::new(
            repositories.product_command.clone(),
            registry,
        )) as DynProductCommandService;

        let reference_query = Arc::new(ReferenceQueryService::new(
            repositories.category.clone(),
            repositories.status.clone(),
            registry,
        )) as DynReferenceQueryService;

        let sync = Arc::new(CatalogSyncService::new(
            clock,
            deriver,
            client,
            repositories.sync.clone(),
            registry,
        )) as DynSyncService;

        Self {
            product_query,
            product_command,
            reference_query,
            sync,
        }
    }
}
