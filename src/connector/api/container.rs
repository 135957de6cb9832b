use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::application::{ReleaseProvider, RegistryStore, RepositoryValidator};
use crate::{
    AddRepositoriesUseCase, ClearRegistryUseCase, GithubClient, HttpDocumentStore,
    InMemoryRegistryStore, LatestReleasesUseCase, ListRepositoriesUseCase,
    MockReleaseProvider, MockRepositoryValidator, RemoveRepositoriesUseCase, DEFAULT_API_URL,
};

pub struct ContainerConfig {
    /// Base URL of the GitHub REST API.
    pub github_api_url: String,
    pub github_token: Option<String>,
    /// Full URL of the registry document. Without it the registry lives in memory.
    pub store_url: Option<String>,
    pub store_token: Option<String>,
    /// Caller identity allowed to clear the registry.
    pub owner_id: Option<String>,
    /// Timeout applied to every outgoing HTTP request.
    pub timeout: Duration,
    pub memory_storage: bool,
    /// Use the offline provider instead of GitHub.
    pub mock_provider: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            github_api_url: DEFAULT_API_URL.to_string(),
            github_token: None,
            store_url: None,
            store_token: None,
            owner_id: None,
            timeout: Duration::from_secs(10),
            memory_storage: false,
            mock_provider: false,
        }
    }
}

pub struct Container {
    store: Arc<dyn RegistryStore>,
    validator: Arc<dyn RepositoryValidator>,
    releases: Arc<dyn ReleaseProvider>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let store: Arc<dyn RegistryStore> = match config.store_url.as_deref() {
            Some(url) if !config.memory_storage => {
                debug!("Using remote registry document at {}", url);
                Arc::new(HttpDocumentStore::new(
                    url,
                    config.store_token.clone(),
                    config.timeout,
                ))
            }
            Some(_) => {
                debug!("Using in-memory registry storage");
                Arc::new(InMemoryRegistryStore::new())
            }
            None => {
                if !config.memory_storage {
                    warn!("No registry store URL configured. Falling back to in-memory storage.");
                }
                Arc::new(InMemoryRegistryStore::new())
            }
        };

        let (validator, releases): (Arc<dyn RepositoryValidator>, Arc<dyn ReleaseProvider>) =
            if config.mock_provider {
                debug!("Using mock repository provider");
                (
                    Arc::new(MockRepositoryValidator::accept_all()),
                    Arc::new(MockReleaseProvider::new()),
                )
            } else {
                debug!("Using GitHub API at {}", config.github_api_url);
                let github = Arc::new(GithubClient::new(
                    config.github_api_url.clone(),
                    config.github_token.clone(),
                    config.timeout,
                ));
                (github.clone(), github)
            };

        Self {
            store,
            validator,
            releases,
            config,
        }
    }

    /// Assemble a container from ready-made adapters.
    pub fn with_adapters(
        config: ContainerConfig,
        store: Arc<dyn RegistryStore>,
        validator: Arc<dyn RepositoryValidator>,
        releases: Arc<dyn ReleaseProvider>,
    ) -> Self {
        Self {
            store,
            validator,
            releases,
            config,
        }
    }

    pub fn add_use_case(&self) -> AddRepositoriesUseCase {
        AddRepositoriesUseCase::new(self.store.clone(), self.validator.clone())
    }

    pub fn remove_use_case(&self) -> RemoveRepositoriesUseCase {
        RemoveRepositoriesUseCase::new(self.store.clone())
    }

    pub fn list_use_case(&self) -> ListRepositoriesUseCase {
        ListRepositoriesUseCase::new(self.store.clone())
    }

    pub fn clear_use_case(&self) -> ClearRegistryUseCase {
        ClearRegistryUseCase::new(self.store.clone(), self.config.owner_id.clone())
    }

    pub fn releases_use_case(&self) -> LatestReleasesUseCase {
        LatestReleasesUseCase::new(self.store.clone(), self.releases.clone())
    }
}
