use async_trait::async_trait;

use crate::domain::{DomainError, Registry, RegistrySnapshot, VersionToken};

/// Durable storage for the registry, read and written as one document.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Fetch the current registry. A missing document is an empty registry
    /// with no version.
    async fn read(&self) -> Result<RegistrySnapshot, DomainError>;

    /// Replace the document, provided it is still at `expected`.
    ///
    /// `expected = None` means "no document exists yet". Fails with
    /// [`DomainError::ConcurrentModification`] when the precondition does not
    /// hold; never overwrites silently. Returns the new version.
    async fn write(
        &self,
        registry: &Registry,
        expected: Option<&VersionToken>,
    ) -> Result<VersionToken, DomainError>;
}
