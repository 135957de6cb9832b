use std::sync::Arc;

use tracing::info;

use crate::application::RegistryStore;
use crate::domain::{
    reconcile_remove, CandidateBatch, DomainError, OperationKind, OperationReport, OutcomeKind,
};

use super::commit::commit;

/// Use case for stopping tracking of repositories mentioned in a message.
pub struct RemoveRepositoriesUseCase {
    store: Arc<dyn RegistryStore>,
}

impl RemoveRepositoriesUseCase {
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, text: &str) -> Result<OperationReport, DomainError> {
        let batch = CandidateBatch::from_text(text)?;
        self.execute_batch(&batch).await
    }

    pub async fn execute_batch(&self, batch: &CandidateBatch) -> Result<OperationReport, DomainError> {
        let snapshot = self.store.read().await?;
        let reconciliation = reconcile_remove(&snapshot.registry, batch);

        let report = commit(
            self.store.as_ref(),
            OperationKind::Remove,
            snapshot.version.as_ref(),
            reconciliation,
            false,
        )
        .await?;

        info!(
            "Remove: {} removed, {} not tracked",
            report.count(OutcomeKind::Removed),
            report.count(OutcomeKind::NotTracked)
        );

        Ok(report)
    }
}
