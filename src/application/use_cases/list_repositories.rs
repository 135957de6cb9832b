use std::sync::Arc;

use crate::application::RegistryStore;
use crate::domain::{DomainError, RepoId};

pub struct ListRepositoriesUseCase {
    store: Arc<dyn RegistryStore>,
}

impl ListRepositoriesUseCase {
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self { store }
    }

    /// Tracked identifiers in ascending order.
    pub async fn execute(&self) -> Result<Vec<RepoId>, DomainError> {
        Ok(self.store.read().await?.registry.to_vec())
    }
}
