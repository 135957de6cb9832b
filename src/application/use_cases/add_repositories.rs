use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{info, warn};

use crate::application::{RegistryStore, RepositoryValidator};
use crate::domain::{
    needs_validation, reconcile_add, CandidateBatch, DomainError, OperationKind, OperationReport,
    OutcomeKind, RepoId, Validation,
};

use super::commit::commit;

/// Use case for starting to track repositories mentioned in a message.
pub struct AddRepositoriesUseCase {
    store: Arc<dyn RegistryStore>,
    validator: Arc<dyn RepositoryValidator>,
}

impl AddRepositoriesUseCase {
    pub fn new(store: Arc<dyn RegistryStore>, validator: Arc<dyn RepositoryValidator>) -> Self {
        Self { store, validator }
    }

    pub async fn execute(&self, text: &str) -> Result<OperationReport, DomainError> {
        let batch = CandidateBatch::from_text(text)?;
        self.execute_batch(&batch).await
    }

    /// Reads the registry, validates the untracked candidates concurrently, and
    /// commits if anything was added.
    pub async fn execute_batch(&self, batch: &CandidateBatch) -> Result<OperationReport, DomainError> {
        let snapshot = self.store.read().await?;

        let pending = needs_validation(&snapshot.registry, batch);
        let results = join_all(pending.iter().map(|id| self.validate(id))).await;
        let validations: HashMap<RepoId, Validation> =
            pending.into_iter().cloned().zip(results).collect();

        let reconciliation = reconcile_add(&snapshot.registry, batch, &validations);
        let report = commit(
            self.store.as_ref(),
            OperationKind::Add,
            snapshot.version.as_ref(),
            reconciliation,
            false,
        )
        .await?;

        info!(
            "Add: {} added, {} already tracked, {} failed",
            report.count(OutcomeKind::Added),
            report.count(OutcomeKind::AlreadyTracked),
            report.count(OutcomeKind::Failed)
        );

        Ok(report)
    }

    async fn validate(&self, id: &RepoId) -> Validation {
        match self.validator.exists(id).await {
            Ok(true) => Validation::Exists,
            Ok(false) => Validation::Missing,
            Err(e) => {
                warn!("Validation of {} failed: {}", id, e);
                Validation::Errored(e.to_string())
            }
        }
    }
}
