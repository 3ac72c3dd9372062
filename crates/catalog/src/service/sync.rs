use crate::{
    abstract_trait::sync::{DynClock, DynSyncRepository, DynUpstreamClient, SyncServiceTrait},
    sync::{CatalogReconciler, CredentialDeriver, SyncReport, parse},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, SyncMetrics},
};
use tokio::time::Instant;
use tracing::{error, info, warn};

/// Runs one upstream sync: clock, credentials, fetch, parse, reconcile.
#[derive(Clone)]
pub struct CatalogSyncService {
    clock: DynClock,
    deriver: CredentialDeriver,
    client: DynUpstreamClient,
    reconciler: CatalogReconciler,
    metrics: Metrics,
    sync_metrics: SyncMetrics,
}

impl CatalogSyncService {
    pub fn new(
        clock: DynClock,
        deriver: CredentialDeriver,
        client: DynUpstreamClient,
        repo: DynSyncRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "catalog_sync_service");

        let sync_metrics = SyncMetrics::default();
        sync_metrics.register(registry);

        Self {
            clock,
            deriver,
            client,
            reconciler: CatalogReconciler::new(repo),
            metrics,
            sync_metrics,
        }
    }

    async fn execute(&self, username_override: Option<&str>) -> Result<SyncReport, ServiceError> {
        let today = self.clock.today();
        let credentials = self.deriver.derive(today, username_override)?;

        info!(
            "🔄 Starting catalog sync for {today} as {}",
            credentials.username
        );

        let raw = self.client.fetch(&credentials).await?;

        let collection_missing = !raw.has_collection();
        if collection_missing {
            warn!("⚠️ Upstream response carried no product collection; nothing to sync");
        }

        let received = raw.item_count();
        let candidates = parse(&raw);

        let mut report = self.reconciler.reconcile(&candidates).await;
        report.received = received;
        report.dropped = received.saturating_sub(candidates.len());
        report.collection_missing = collection_missing;

        self.sync_metrics
            .products_created
            .inc_by(report.created as u64);
        self.sync_metrics
            .products_updated
            .inc_by(report.updated as u64);
        self.sync_metrics
            .candidates_dropped
            .inc_by(report.dropped as u64);
        self.sync_metrics
            .candidates_failed
            .inc_by(report.failures.len() as u64);

        Ok(report)
    }
}

#[async_trait]
impl SyncServiceTrait for CatalogSyncService {
    async fn run(
        &self,
        username_override: Option<&str>,
    ) -> Result<ApiResponse<SyncReport>, ServiceError> {
        let start = Instant::now();

        match self.execute(username_override).await {
            Ok(report) => {
                info!("✅ Catalog sync finished: {report}");
                self.metrics.record(
                    Method::Post,
                    StatusUtils::Success,
                    start.elapsed().as_secs_f64(),
                );
                Ok(ApiResponse::success(
                    format!("Synchronized {} products", report.touched()),
                    report,
                ))
            }
            Err(e) => {
                error!("❌ Catalog sync failed: {e}");
                self.metrics.record(
                    Method::Post,
                    StatusUtils::Error,
                    start.elapsed().as_secs_f64(),
                );
                Err(e)
            }
        }
    }
}
