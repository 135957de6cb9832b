use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::RequestBuilder;
use tracing::debug;

use crate::application::{ReleaseProvider, RepositoryValidator};
use crate::domain::{DomainError, ReleaseSummary, RepoId};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github+json";
const USER_AGENT_HEADER: &str = concat!("repowatch/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the GitHub REST API.
///
/// Serves both as the [`RepositoryValidator`] (`GET /repos/{owner}/{name}`) and
/// as the [`ReleaseProvider`] (`GET /repos/{owner}/{name}/releases`). A token is
/// optional; unauthenticated lookups work for public repositories.
pub struct GithubClient {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(api_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Self {
        let api_url: String = api_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    fn repo_url(&self, id: &RepoId) -> String {
        format!("{}/repos/{}/{}", self.api_url, id.owner(), id.name())
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_HEADER)
            .header(USER_AGENT, USER_AGENT_HEADER);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("token {token}")),
            None => request,
        }
    }
}

#[async_trait]
impl RepositoryValidator for GithubClient {
    async fn exists(&self, id: &RepoId) -> Result<bool, DomainError> {
        let response = self
            .get(&self.repo_url(id))
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("lookup of {id} failed: {e}")))?;

        let status = response.status();
        debug!("GitHub lookup {} -> {}", id, status);
        Ok(status.is_success())
    }
}

#[async_trait]
impl ReleaseProvider for GithubClient {
    async fn latest_release(&self, id: &RepoId) -> Result<Option<ReleaseSummary>, DomainError> {
        let url = format!("{}/releases?per_page=1", self.repo_url(id));
        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("release query for {id} failed: {e}")))?;

        if !response.status().is_success() {
            debug!("GitHub releases {} -> {}", id, response.status());
            return Ok(None);
        }

        let releases: Vec<ReleaseSummary> = response.json().await.map_err(|e| {
            DomainError::provider(format!("failed to parse releases of {id}: {e}"))
        })?;

        Ok(releases.into_iter().next())
    }
}
