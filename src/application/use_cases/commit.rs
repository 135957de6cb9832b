use tracing::{debug, warn};

use crate::application::RegistryStore;
use crate::domain::{DomainError, OperationKind, OperationReport, Reconciliation, VersionToken};

/// Writes `reconciliation` back with the token of the read it was computed
/// from. Nothing is written when the registry is unchanged, unless `always`.
pub(crate) async fn commit(
    store: &dyn RegistryStore,
    operation: OperationKind,
    read_version: Option<&VersionToken>,
    reconciliation: Reconciliation,
    always: bool,
) -> Result<OperationReport, DomainError> {
    let changed = reconciliation.changed();
    let Reconciliation { registry, outcomes } = reconciliation;
    let report = OperationReport::new(operation, outcomes);

    if !changed && !always {
        debug!("{:?}: registry unchanged, skipping write", operation);
        return Ok(report);
    }

    match store.write(&registry, read_version).await {
        Ok(version) => {
            debug!(
                "{:?}: committed {} repositories at version {}",
                operation,
                registry.len(),
                version
            );
            Ok(report.with_commit(version))
        }
        Err(e) => {
            if e.is_concurrent_modification() {
                warn!("{:?}: discarding result, registry changed since read", operation);
            }
            Err(e)
        }
    }
}
