use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::RegistryStore;
use crate::domain::{DomainError, Registry, RegistryDocument, RegistrySnapshot, VersionToken};

const USER_AGENT_HEADER: &str = concat!("repowatch/", env!("CARGO_PKG_VERSION"));

/// Body returned by `GET` on the document URL.
#[derive(Deserialize)]
struct RemoteDocument {
    /// Base64 of the JSON document; may contain line breaks.
    content: String,
    version: VersionToken,
}

#[derive(Serialize)]
struct PutRequest<'a> {
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a VersionToken>,
}

#[derive(Deserialize)]
struct PutResponse {
    version: VersionToken,
}

/// Registry store backed by a remote file API with optimistic concurrency.
///
/// `GET` returns `404` while the document does not exist. `PUT` carries the
/// version the writer read; the server answers `409`/`412` if it is stale.
pub struct HttpDocumentStore {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpDocumentStore {
    pub fn new(url: impl Into<String>, token: Option<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            url: url.into(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(USER_AGENT, USER_AGENT_HEADER);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    fn decode_content(content: &str) -> Result<Registry, DomainError> {
        let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(compact)
            .map_err(|e| DomainError::store_unavailable(format!("invalid document encoding: {e}")))?;
        let document = RegistryDocument::decode(&bytes)
            .map_err(|e| DomainError::store_unavailable(e.to_string()))?;
        Ok(document.into_registry())
    }
}

#[async_trait]
impl RegistryStore for HttpDocumentStore {
    async fn read(&self) -> Result<RegistrySnapshot, DomainError> {
        let response = self
            .authorize(self.client.get(&self.url))
            .send()
            .await
            .map_err(|e| DomainError::store_unavailable(format!("read failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Registry document absent at {}", self.url);
            return Ok(RegistrySnapshot::empty());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Registry read returned {status}: {body}");
            return Err(DomainError::store_unavailable(format!("read returned {status}")));
        }

        let remote: RemoteDocument = response
            .json()
            .await
            .map_err(|e| DomainError::store_unavailable(format!("failed to parse document: {e}")))?;

        let registry = Self::decode_content(&remote.content)?;
        debug!(
            "Read {} repositories at version {}",
            registry.len(),
            remote.version
        );
        Ok(RegistrySnapshot::new(registry, Some(remote.version)))
    }

    async fn write(
        &self,
        registry: &Registry,
        expected: Option<&VersionToken>,
    ) -> Result<VersionToken, DomainError> {
        let bytes = RegistryDocument::from_registry(registry).encode()?;
        let request = PutRequest {
            content: STANDARD.encode(bytes),
            version: expected,
        };

        let response = self
            .authorize(self.client.put(&self.url))
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::store_unavailable(format!("write failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::CONFLICT || status == StatusCode::PRECONDITION_FAILED {
            return Err(DomainError::concurrent_modification(format!(
                "store rejected version {}",
                expected.map(VersionToken::as_str).unwrap_or("<none>")
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Registry write returned {status}: {body}");
            return Err(DomainError::store_unavailable(format!("write returned {status}")));
        }

        let written: PutResponse = response
            .json()
            .await
            .map_err(|e| DomainError::store_unavailable(format!("failed to parse write response: {e}")))?;

        debug!("Wrote {} repositories, version {}", registry.len(), written.version);
        Ok(written.version)
    }
}
