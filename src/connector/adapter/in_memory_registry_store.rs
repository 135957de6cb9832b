use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::RegistryStore;
use crate::domain::{
    DomainError, Registry, RegistryDocument, RegistrySnapshot, VersionToken,
};

struct StoredDocument {
    bytes: Vec<u8>,
    version: VersionToken,
}

/// Registry store held in process memory.
///
/// Versions are the SHA-256 of the encoded document, so the conflict check
/// behaves like the remote store's content-hash precondition.
pub struct InMemoryRegistryStore {
    document: Arc<Mutex<Option<StoredDocument>>>,
    writes: AtomicUsize,
}

impl InMemoryRegistryStore {
    pub fn new() -> Self {
        Self {
            document: Arc::new(Mutex::new(None)),
            writes: AtomicUsize::new(0),
        }
    }

    /// A store that already holds `registry`. Does not count as a write.
    pub fn with_registry(registry: &Registry) -> Result<Self, DomainError> {
        let bytes = RegistryDocument::from_registry(registry).encode()?;
        let version = compute_version(&bytes);
        Ok(Self {
            document: Arc::new(Mutex::new(Some(StoredDocument { bytes, version }))),
            writes: AtomicUsize::new(0),
        })
    }

    /// Number of successful writes since construction.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryRegistryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryStore for InMemoryRegistryStore {
    async fn read(&self) -> Result<RegistrySnapshot, DomainError> {
        let document = self.document.lock().await;
        match document.as_ref() {
            None => Ok(RegistrySnapshot::empty()),
            Some(stored) => {
                let registry = RegistryDocument::decode(&stored.bytes)?.into_registry();
                Ok(RegistrySnapshot::new(registry, Some(stored.version.clone())))
            }
        }
    }

    async fn write(
        &self,
        registry: &Registry,
        expected: Option<&VersionToken>,
    ) -> Result<VersionToken, DomainError> {
        let mut document = self.document.lock().await;

        let current = document.as_ref().map(|stored| &stored.version);
        if current != expected {
            return Err(DomainError::concurrent_modification(format!(
                "expected version {}, found {}",
                expected.map(VersionToken::as_str).unwrap_or("<none>"),
                current.map(VersionToken::as_str).unwrap_or("<none>")
            )));
        }

        let bytes = RegistryDocument::from_registry(registry).encode()?;
        let version = compute_version(&bytes);
        *document = Some(StoredDocument {
            bytes,
            version: version.clone(),
        });
        self.writes.fetch_add(1, Ordering::SeqCst);

        debug!("Stored {} repositories in memory at {}", registry.len(), version);
        Ok(version)
    }
}

/// SHA-256 of the document bytes, hex encoded.
pub fn compute_version(bytes: &[u8]) -> VersionToken {
    VersionToken::new(format!("{:x}", Sha256::digest(bytes)))
}
