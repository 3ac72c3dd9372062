use crate::{
    abstract_trait::sync::DynSyncRepository,
    sync::{CandidateFailure, CandidateRecord, ProductChange, SyncReport},
    validation::{error_messages, validate_candidate_fields},
};
use rust_decimal::Decimal;
use tracing::{debug, error, info};

/// Merges candidates into the catalog one at a time.
///
/// A candidate that fails validation or storage is recorded in the report
/// and the run moves on to the next one.
#[derive(Clone)]
pub struct CatalogReconciler {
    repo: DynSyncRepository,
}

impl CatalogReconciler {
    pub fn new(repo: DynSyncRepository) -> Self {
        Self { repo }
    }

    /// Fills the write-side counters of the report. `received` and
    /// `dropped` describe the upstream payload and are left to the caller.
    pub async fn reconcile(&self, candidates: &[CandidateRecord]) -> SyncReport {
        let mut report = SyncReport {
            accepted: candidates.len(),
            ..SyncReport::default()
        };

        for candidate in candidates {
            if let Err(errors) = validate_candidate_fields(
                &candidate.name,
                Decimal::from(candidate.price),
                &candidate.category,
                &candidate.status,
            ) {
                let reason = error_messages(&errors).join("; ");
                debug!("Skipping invalid candidate {:?}: {reason}", candidate.name);
                report.failures.push(CandidateFailure {
                    name: candidate.name.clone(),
                    reason,
                });
                continue;
            }

            match self.repo.upsert_candidate(candidate).await {
                Ok(outcome) => {
                    match outcome.change {
                        ProductChange::Created => report.created += 1,
                        ProductChange::Updated => report.updated += 1,
                        ProductChange::Unchanged => report.unchanged += 1,
                    }
                    if outcome.category_created {
                        report.categories_created += 1;
                    }
                    if outcome.status_created {
                        report.statuses_created += 1;
                    }
                }
                Err(e) => {
                    error!("❌ Failed to store candidate {:?}: {e}", candidate.name);
                    report.failures.push(CandidateFailure {
                        name: candidate.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "✅ Reconciled {} candidates: {} created, {} updated, {} unchanged, {} failed",
            report.accepted,
            report.created,
            report.updated,
            report.unchanged,
            report.failures.len()
        );

        report
    }
}
