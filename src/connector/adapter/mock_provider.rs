use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tracing::debug;

use crate::application::{ReleaseProvider, RepositoryValidator};
use crate::domain::{DomainError, ReleaseSummary, RepoId};

/// Offline stand-in for the hosting provider.
///
/// With no known repositories configured every well-formed identifier is
/// accepted; otherwise only the known ones exist. Identifiers marked as
/// unreachable fail with a provider error, like a dropped connection.
#[derive(Default)]
pub struct MockRepositoryValidator {
    known: Option<HashSet<RepoId>>,
    unreachable: HashSet<RepoId>,
}

impl MockRepositoryValidator {
    pub fn accept_all() -> Self {
        Self::default()
    }

    pub fn with_known<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            known: Some(ids.into_iter().filter_map(|id| RepoId::parse(id).ok()).collect()),
            unreachable: HashSet::new(),
        }
    }

    pub fn with_unreachable<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.unreachable
            .extend(ids.into_iter().filter_map(|id| RepoId::parse(id).ok()));
        self
    }
}

#[async_trait]
impl RepositoryValidator for MockRepositoryValidator {
    async fn exists(&self, id: &RepoId) -> Result<bool, DomainError> {
        if self.unreachable.contains(id) {
            return Err(DomainError::provider(format!("lookup of {id} failed: unreachable")));
        }
        let exists = self.known.as_ref().map_or(true, |known| known.contains(id));
        debug!("Mock lookup {} -> {}", id, exists);
        Ok(exists)
    }
}

/// Offline release source with a fixed table of latest releases.
#[derive(Default)]
pub struct MockReleaseProvider {
    releases: HashMap<RepoId, ReleaseSummary>,
}

impl MockReleaseProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_release(mut self, id: &str, tag: &str) -> Self {
        if let Ok(id) = RepoId::parse(id) {
            self.releases.insert(
                id,
                ReleaseSummary {
                    tag_name: tag.to_string(),
                    name: None,
                    published_at: None,
                    html_url: None,
                },
            );
        }
        self
    }
}

#[async_trait]
impl ReleaseProvider for MockReleaseProvider {
    async fn latest_release(&self, id: &RepoId) -> Result<Option<ReleaseSummary>, DomainError> {
        Ok(self.releases.get(id).cloned())
    }
}
