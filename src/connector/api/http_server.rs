use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::domain::DomainError;

use super::command::BotCommand;
use super::container::Container;
use super::output::CommandOutput;
use super::router::Router;

/// A chat message forwarded by the transport.
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    /// Identity of the sender, if the transport knows it.
    #[serde(default)]
    pub caller: Option<String>,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub output: CommandOutput,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

/// Routes: `POST /commands`, `GET /health`.
pub fn app(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route("/commands", post(handle_command))
        .route("/health", get(health))
        .with_state(container)
}

pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Command endpoint listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(container)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn handle_command(
    State(container): State<Arc<Container>>,
    Json(request): Json<CommandRequest>,
) -> Response {
    let command = BotCommand::parse(&request.text);
    debug!("Command from {:?}: {:?}", request.caller, command);

    let router = Router::new(&container);
    match router.route(command, request.caller.as_deref()).await {
        Ok(output) => {
            let text = output.render();
            (StatusCode::OK, Json(CommandResponse { output, text })).into_response()
        }
        Err(e) => error_response(&e).into_response(),
    }
}

fn error_response(err: &anyhow::Error) -> (StatusCode, Json<ErrorResponse>) {
    let Some(domain) = err.downcast_ref::<DomainError>() else {
        error!("Command failed: {err:#}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "internal",
                message: err.to_string(),
            }),
        );
    };

    let status = match domain {
        DomainError::NoIdentifiersFound | DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DomainError::BatchTooLarge { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Unauthorized(_) => StatusCode::FORBIDDEN,
        DomainError::ConcurrentModification(_) => StatusCode::CONFLICT,
        DomainError::StoreUnavailable(_) | DomainError::Provider(_) => StatusCode::BAD_GATEWAY,
        DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!("Command failed: {domain}");
    }

    (
        status,
        Json(ErrorResponse {
            error: domain.kind(),
            message: domain.to_string(),
        }),
    )
}
