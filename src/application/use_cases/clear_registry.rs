use std::sync::Arc;

use tracing::{info, warn};

use crate::application::RegistryStore;
use crate::domain::{reconcile_clear, DomainError, OperationKind, OperationReport};

use super::commit::commit;

/// Use case for emptying the registry. Only the configured owner may run it.
pub struct ClearRegistryUseCase {
    store: Arc<dyn RegistryStore>,
    owner: Option<String>,
}

impl ClearRegistryUseCase {
    pub fn new(store: Arc<dyn RegistryStore>, owner: Option<String>) -> Self {
        Self { store, owner }
    }

    pub async fn execute(&self, caller: Option<&str>) -> Result<OperationReport, DomainError> {
        let authorized = matches!(
            (self.owner.as_deref(), caller),
            (Some(owner), Some(caller)) if owner == caller
        );
        if !authorized {
            warn!("Clear refused for caller {:?}", caller);
            return Err(DomainError::unauthorized(
                "only the bot owner can clear the registry",
            ));
        }

        let snapshot = self.store.read().await?;
        let reconciliation = reconcile_clear(&snapshot.registry);

        let report = commit(
            self.store.as_ref(),
            OperationKind::Clear,
            snapshot.version.as_ref(),
            reconciliation,
            true,
        )
        .await?;

        info!("Cleared {} repositories", report.outcomes.len());

        Ok(report)
    }
}
