use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::application::{RegistryStore, ReleaseProvider};
use crate::domain::{DomainError, ReleaseEntry, ReleasePage, RELEASES_PAGE_SIZE};

/// Use case for listing the latest release of each tracked repository, one
/// page at a time.
pub struct LatestReleasesUseCase {
    store: Arc<dyn RegistryStore>,
    releases: Arc<dyn ReleaseProvider>,
}

impl LatestReleasesUseCase {
    pub fn new(store: Arc<dyn RegistryStore>, releases: Arc<dyn ReleaseProvider>) -> Self {
        Self { store, releases }
    }

    pub async fn execute(&self, page: usize) -> Result<ReleasePage, DomainError> {
        let repos = self.store.read().await?.registry.to_vec();
        let total = repos.len();

        let start = page.saturating_mul(RELEASES_PAGE_SIZE).min(total);
        let end = (start + RELEASES_PAGE_SIZE).min(total);
        let subset = &repos[start..end];

        debug!("Fetching latest releases for {} repositories", subset.len());

        let fetches = subset.iter().map(|repo| async move {
            let release = match self.releases.latest_release(repo).await {
                Ok(release) => release,
                Err(e) => {
                    warn!("Failed to fetch latest release for {}: {}", repo, e);
                    None
                }
            };
            ReleaseEntry {
                repo: repo.clone(),
                release,
            }
        });
        let entries = join_all(fetches).await;

        Ok(ReleasePage {
            page,
            total,
            entries,
            has_next: end < total,
        })
    }
}
