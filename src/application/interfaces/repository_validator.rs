use async_trait::async_trait;

use crate::domain::{DomainError, RepoId};

/// Checks identifiers against the hosting provider.
#[async_trait]
pub trait RepositoryValidator: Send + Sync {
    /// `Ok(true)` if the repository exists and is accessible, `Ok(false)` if the
    /// provider says otherwise, `Err` if the lookup could not be made.
    async fn exists(&self, id: &RepoId) -> Result<bool, DomainError>;
}
