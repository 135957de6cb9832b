use async_trait::async_trait;

use crate::domain::{DomainError, ReleaseSummary, RepoId};

#[async_trait]
pub trait ReleaseProvider: Send + Sync {
    /// Most recent release of `id`, or `None` if it has none.
    async fn latest_release(&self, id: &RepoId) -> Result<Option<ReleaseSummary>, DomainError>;
}
