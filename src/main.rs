use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use repowatch::cli::Commands;
use repowatch::connector::api::http_server;
use repowatch::{Container, ContainerConfig, Router, DEFAULT_API_URL};

#[derive(Parser)]
#[command(name = "repowatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Identity the command runs as (checked by `clear`)
    #[arg(long, global = true, env = "REPOWATCH_CALLER")]
    caller: Option<String>,

    /// Identity allowed to clear the registry
    #[arg(long, global = true, env = "REPOWATCH_OWNER_ID")]
    owner_id: Option<String>,

    #[arg(long, global = true, env = "REPOWATCH_GITHUB_API", default_value = DEFAULT_API_URL)]
    github_api: String,

    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// URL of the registry document on the remote file store
    #[arg(long, global = true, env = "REPOWATCH_STORE_URL")]
    store_url: Option<String>,

    #[arg(long, global = true, env = "REPOWATCH_STORE_TOKEN", hide_env_values = true)]
    store_token: Option<String>,

    /// Timeout for every outgoing HTTP request, in seconds
    #[arg(long, global = true, default_value = "10")]
    timeout: u64,

    #[arg(long, global = true)]
    memory_storage: bool,

    /// Accept every well-formed repository without asking GitHub
    #[arg(long, global = true)]
    mock_provider: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ContainerConfig {
        github_api_url: cli.github_api,
        github_token: cli.github_token,
        store_url: cli.store_url,
        store_token: cli.store_token,
        owner_id: cli.owner_id,
        timeout: Duration::from_secs(cli.timeout),
        memory_storage: cli.memory_storage,
        mock_provider: cli.mock_provider,
    };
    let container = Arc::new(Container::new(config));

    if let Commands::Serve { port, public } = cli.command {
        let host = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
        return http_server::serve(container, SocketAddr::from((host, port))).await;
    }

    let Some(command) = cli.command.into_bot_command() else {
        return Ok(());
    };

    let router = Router::new(&container);
    let output = router.route(command, cli.caller.as_deref()).await?;
    println!("{}", output.render());

    Ok(())
}
