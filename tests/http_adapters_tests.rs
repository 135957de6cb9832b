//! HTTP adapter tests.
//!
//! Each test starts throwaway axum servers on 127.0.0.1 that stand in for the
//! GitHub API and the remote document store.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use repowatch::connector::api::http_server;
use repowatch::{
    AddRepositoriesUseCase, Container, ContainerConfig, DomainError, GithubClient,
    HttpDocumentStore, InMemoryRegistryStore, MockReleaseProvider, MockRepositoryValidator,
    OutcomeKind, Registry, RegistryDocument, RegistryStore, ReleaseProvider, RepoId,
    RepositoryValidator, VersionToken,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn id(value: &str) -> RepoId {
    RepoId::parse(value).expect("valid identifier")
}

async fn spawn(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });
    format!("http://{addr}")
}

// --- fake document store ---

#[derive(Default)]
struct DocumentState {
    /// Base64 content and numeric version of the stored document.
    document: Option<(String, u64)>,
    broken: bool,
    /// Answer version mismatches with 412 instead of 409.
    precondition_failed: bool,
}

type SharedDocument = Arc<Mutex<DocumentState>>;

async fn get_document(State(state): State<SharedDocument>) -> Response {
    let state = state.lock().await;
    if state.broken {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    match &state.document {
        None => StatusCode::NOT_FOUND.into_response(),
        Some((content, version)) => {
            // Wrap lines the way file APIs usually do.
            let wrapped: Vec<String> = content
                .as_bytes()
                .chunks(60)
                .map(|c| String::from_utf8_lossy(c).into_owned())
                .collect();
            Json(json!({ "content": wrapped.join("\n"), "version": version.to_string() }))
                .into_response()
        }
    }
}

async fn put_document(State(state): State<SharedDocument>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().await;
    if state.broken {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let expected = body.get("version").and_then(Value::as_str).map(String::from);
    let current = state.document.as_ref().map(|(_, v)| v.to_string());
    if expected != current {
        return if state.precondition_failed {
            StatusCode::PRECONDITION_FAILED.into_response()
        } else {
            StatusCode::CONFLICT.into_response()
        };
    }

    let next = state.document.as_ref().map_or(1, |(_, v)| v + 1);
    let content = body["content"].as_str().unwrap_or_default().to_string();
    state.document = Some((content, next));
    (StatusCode::OK, Json(json!({ "version": next.to_string() }))).into_response()
}

async fn spawn_document_store() -> (String, SharedDocument) {
    let state: SharedDocument = Arc::new(Mutex::new(DocumentState::default()));
    let app = axum::Router::new()
        .route("/files/registry.json", get(get_document).put(put_document))
        .with_state(state.clone());
    let base = spawn(app).await;
    (format!("{base}/files/registry.json"), state)
}

async fn stored_registry(state: &SharedDocument) -> Registry {
    let state = state.lock().await;
    let (content, _) = state.document.as_ref().expect("document was written");
    let bytes = STANDARD.decode(content).expect("valid base64");
    RegistryDocument::decode(&bytes).expect("valid document").into_registry()
}

// --- fake GitHub ---

async fn get_repo(Path((owner, name)): Path<(String, String)>, headers: HeaderMap) -> StatusCode {
    if headers.get("user-agent").is_none() {
        return StatusCode::FORBIDDEN;
    }
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("token secret");

    match (owner.as_str(), name.as_str()) {
        ("octocat", "Hello-World") => StatusCode::OK,
        ("private", "repo") if authorized => StatusCode::OK,
        _ => StatusCode::NOT_FOUND,
    }
}

async fn get_releases(Path((owner, name)): Path<(String, String)>) -> Response {
    match (owner.as_str(), name.as_str()) {
        ("octocat", "Hello-World") => Json(json!([{
            "id": 1,
            "tag_name": "v1.0.0",
            "name": "First",
            "published_at": "2024-01-02T03:04:05Z",
            "html_url": "https://github.com/octocat/Hello-World/releases/tag/v1.0.0",
            "assets": []
        }]))
        .into_response(),
        ("octocat", "empty") => Json(json!([])).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_github() -> String {
    // The API root answers 200, like the real one.
    let app = axum::Router::new()
        .route("/", get(|| async { StatusCode::OK }))
        .route("/repos/{owner}/{name}", get(get_repo))
        .route("/repos/{owner}/{name}/releases", get(get_releases));
    spawn(app).await
}

// --- document store ---

#[tokio::test]
async fn test_absent_document_reads_as_empty() {
    let (url, _) = spawn_document_store().await;
    let store = HttpDocumentStore::new(url, None, TIMEOUT);

    let snapshot = store.read().await.expect("read failed");
    assert!(snapshot.registry.is_empty());
    assert!(snapshot.version.is_none());
}

#[tokio::test]
async fn test_document_round_trip() {
    let (url, state) = spawn_document_store().await;
    let store = HttpDocumentStore::new(url, None, TIMEOUT);

    let empty = store.read().await.unwrap();
    let first = store
        .write(&Registry::new(vec![id("a/b")]), empty.version.as_ref())
        .await
        .expect("create failed");

    let read = store.read().await.unwrap();
    assert_eq!(read.version.as_ref(), Some(&first));

    let mut next = read.registry.clone();
    next.insert(id("x/y"));
    let second = store.write(&next, read.version.as_ref()).await.unwrap();
    assert_ne!(first, second);

    let after = store.read().await.unwrap();
    assert!(after.registry.contains(&id("x/y")));
    assert_eq!(after.version, Some(second));
    assert_eq!(stored_registry(&state).await.len(), 2);
}

#[tokio::test]
async fn test_stale_version_is_rejected() {
    let (url, state) = spawn_document_store().await;
    let store = HttpDocumentStore::new(url, None, TIMEOUT);
    store.write(&Registry::default(), None).await.unwrap();

    let a = store.read().await.unwrap();
    let b = store.read().await.unwrap();

    store
        .write(&Registry::new(vec![id("first/writer")]), a.version.as_ref())
        .await
        .unwrap();
    let err = store
        .write(&Registry::new(vec![id("second/writer")]), b.version.as_ref())
        .await
        .unwrap_err();

    assert!(err.is_concurrent_modification());
    let stored = stored_registry(&state).await;
    assert!(stored.contains(&id("first/writer")));
    assert!(!stored.contains(&id("second/writer")));
}

#[tokio::test]
async fn test_precondition_failed_is_a_conflict() {
    let (url, state) = spawn_document_store().await;
    state.lock().await.precondition_failed = true;
    let store = HttpDocumentStore::new(url, None, TIMEOUT);

    let first = store.write(&Registry::new(vec![id("a/b")]), None).await.unwrap();
    let stale = VersionToken::new("0");
    assert_ne!(first, stale);

    let err = store
        .write(&Registry::new(vec![id("c/d")]), Some(&stale))
        .await
        .unwrap_err();
    assert!(err.is_concurrent_modification());
    assert_eq!(stored_registry(&state).await.to_vec(), vec![id("a/b")]);
}

#[tokio::test]
async fn test_create_over_existing_document_is_a_conflict() {
    let (url, state) = spawn_document_store().await;
    let store = HttpDocumentStore::new(url, None, TIMEOUT);

    // Both writers saw the document absent.
    let a = store.read().await.unwrap();
    let b = store.read().await.unwrap();
    assert!(a.version.is_none() && b.version.is_none());

    store
        .write(&Registry::new(vec![id("first/writer")]), a.version.as_ref())
        .await
        .unwrap();
    let err = store
        .write(&Registry::new(vec![id("second/writer")]), b.version.as_ref())
        .await
        .unwrap_err();

    assert!(err.is_concurrent_modification());
    assert_eq!(stored_registry(&state).await.to_vec(), vec![id("first/writer")]);
}

#[tokio::test]
async fn test_server_errors_are_store_unavailable() {
    let (url, state) = spawn_document_store().await;
    state.lock().await.broken = true;
    let store = HttpDocumentStore::new(url, None, TIMEOUT);

    assert!(store.read().await.unwrap_err().is_store_unavailable());
    assert!(store
        .write(&Registry::default(), None)
        .await
        .unwrap_err()
        .is_store_unavailable());
}

#[tokio::test]
async fn test_add_use_case_against_remote_store() {
    let (url, state) = spawn_document_store().await;
    let store = Arc::new(HttpDocumentStore::new(url, None, TIMEOUT));
    let use_case = AddRepositoriesUseCase::new(
        store,
        Arc::new(MockRepositoryValidator::with_known(["octocat/Hello-World"])),
    );

    let report = use_case
        .execute("https://github.com/octocat/Hello-World nope/missing")
        .await
        .unwrap();
    assert_eq!(report.count(OutcomeKind::Added), 1);
    assert_eq!(report.count(OutcomeKind::Failed), 1);

    let stored = stored_registry(&state).await;
    assert_eq!(stored.to_vec(), vec![id("octocat/Hello-World")]);
}

// --- GitHub client ---

#[tokio::test]
async fn test_github_lookup() {
    let base = spawn_github().await;
    let client = GithubClient::new(base, None, TIMEOUT);

    assert!(client.exists(&id("octocat/Hello-World")).await.unwrap());
    assert!(!client
        .exists(&id("nonexistent-user-xyz/no-such-repo"))
        .await
        .unwrap());
    assert!(!client.exists(&id("private/repo")).await.unwrap());
}

#[tokio::test]
async fn test_github_lookup_sends_token() {
    let base = spawn_github().await;
    let client = GithubClient::new(format!("{base}/"), Some("secret".to_string()), TIMEOUT);

    assert!(client.exists(&id("private/repo")).await.unwrap());
}

#[tokio::test]
async fn test_dot_segment_links_never_reach_the_api() {
    let base = spawn_github().await;
    let store = Arc::new(InMemoryRegistryStore::new());
    let use_case = AddRepositoriesUseCase::new(
        store.clone(),
        Arc::new(GithubClient::new(base, None, TIMEOUT)),
    );

    let err = use_case
        .execute("https://github.com/../../releases")
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NoIdentifiersFound));
    assert_eq!(store.write_count(), 0);
    assert!(store.read().await.unwrap().registry.is_empty());
}

#[tokio::test]
async fn test_github_transport_failure_is_an_error() {
    let client = GithubClient::new("http://127.0.0.1:1", None, Duration::from_secs(2));
    let err = client.exists(&id("octocat/Hello-World")).await.unwrap_err();
    assert!(matches!(err, DomainError::Provider(_)));
}

#[tokio::test]
async fn test_github_latest_release() {
    let base = spawn_github().await;
    let client = GithubClient::new(base, None, TIMEOUT);

    let release = client
        .latest_release(&id("octocat/Hello-World"))
        .await
        .unwrap()
        .expect("release present");
    assert_eq!(release.tag_name, "v1.0.0");
    assert_eq!(release.published_date(), Some("2024-01-02"));

    assert!(client.latest_release(&id("octocat/empty")).await.unwrap().is_none());
    assert!(client.latest_release(&id("no/such")).await.unwrap().is_none());
}

// --- command endpoint ---

async fn spawn_command_endpoint() -> String {
    let config = ContainerConfig {
        owner_id: Some("owner".to_string()),
        ..ContainerConfig::default()
    };
    let container = Container::with_adapters(
        config,
        Arc::new(InMemoryRegistryStore::new()),
        Arc::new(MockRepositoryValidator::accept_all()),
        Arc::new(MockReleaseProvider::new()),
    );
    spawn(http_server::app(Arc::new(container))).await
}

#[tokio::test]
async fn test_command_endpoint() {
    let base = spawn_command_endpoint().await;
    let client = reqwest::Client::new();

    let health = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(health.text().await.unwrap(), "ok");

    let added: Value = client
        .post(format!("{base}/commands"))
        .json(&json!({ "caller": "user", "text": "a/b c/d" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(added["output"]["type"], "report");
    assert_eq!(added["output"]["report"]["outcomes"][0]["status"], "added");
    assert_eq!(added["output"]["report"]["committed"], true);
    assert!(added["text"].as_str().unwrap().contains("Started tracking c/d."));

    let denied = client
        .post(format!("{base}/commands"))
        .json(&json!({ "caller": "user", "text": "/clear" }))
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status(), reqwest::StatusCode::FORBIDDEN);
    let body: Value = denied.json().await.unwrap();
    assert_eq!(body["error"], "unauthorized");

    let listed: Value = client
        .post(format!("{base}/commands"))
        .json(&json!({ "text": "/list" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["output"]["repos"], json!(["a/b", "c/d"]));
}

#[tokio::test]
async fn test_command_endpoint_rejects_large_batches() {
    let base = spawn_command_endpoint().await;
    let text: Vec<String> = (0..25).map(|i| format!("o/r{i}")).collect();

    let response = reqwest::Client::new()
        .post(format!("{base}/commands"))
        .json(&json!({ "text": format!("/add {}", text.join(",")) }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "batch_too_large");
}
