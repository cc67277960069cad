//! Todo Fetch Walkthrough - Main Entry Point

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_fetch_walkthrough::application::walkthrough::{RunMode, Walkthrough, WalkthroughReport};
use todo_fetch_walkthrough::infrastructure::driven_adapters::config::{AppConfig, ClientConfig};
use todo_fetch_walkthrough::infrastructure::driven_adapters::todo_client::HttpTodoClient;
use todo_fetch_walkthrough::infrastructure::driving_adapters::api_rest::{
    self, AppState, RunningServer,
};

#[derive(Debug, Parser)]
#[command(
    name = "todo-fetch-walkthrough",
    version,
    about = "Sequential vs. concurrent REST calls against a mock todo API"
)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the JSON-file-backed mock todo backend
    Serve {
        /// Todo store file (overrides server.db_path)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Port to listen on (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
        /// Upper bound of the random per-request delay (overrides server.max_latency_ms)
        #[arg(long)]
        max_latency_ms: Option<u64>,
    },
    /// Run the scripted requests against a running backend
    Walkthrough {
        /// `sequential` awaits every step; `concurrent` fires the unawaited ones
        #[arg(long, default_value_t = RunMode::Concurrent)]
        mode: RunMode,
        /// Backend URL (overrides client.base_url)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Start a backend on an ephemeral port, run the walkthrough against it, then stop
    Demo {
        #[arg(long, default_value_t = RunMode::Concurrent)]
        mode: RunMode,
        /// Todo store file (overrides server.db_path)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;

    // Initialize tracing
    let json_logs = cli.json_logs || config.logging.json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_fetch_walkthrough=info,tower_http=info".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Configuration loaded successfully");

    match cli.command {
        Command::Serve {
            db,
            port,
            max_latency_ms,
        } => {
            if let Some(db) = db {
                config.server.db_path = db;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(max) = max_latency_ms {
                config.server.max_latency_ms = max;
            }
            serve(config).await
        }
        Command::Walkthrough { mode, base_url } => {
            if let Some(base_url) = base_url {
                config.client.base_url = base_url;
            }
            run_walkthrough(&config.client, mode).await?;
            Ok(())
        }
        Command::Demo { mode, db } => {
            if let Some(db) = db {
                config.server.db_path = db;
            }
            demo(config, mode).await
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config.server).await?;
    let app = api_rest::router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn demo(mut config: AppConfig, mode: RunMode) -> anyhow::Result<()> {
    let state = AppState::from_config(config.server.clone()).await?;
    let server =
        RunningServer::bind_ephemeral(&config.server.host, api_rest::router(state)).await?;

    config.client.base_url = server.base_url();
    let outcome = run_walkthrough(&config.client, mode).await;

    server.shutdown().await?;
    outcome.map(|_| ())
}

async fn run_walkthrough(
    config: &ClientConfig,
    mode: RunMode,
) -> anyhow::Result<WalkthroughReport> {
    let client = HttpTodoClient::new(config)?;
    tracing::info!(base_url = client.base_url(), %mode, "Running walkthrough");

    let report = Walkthrough::new(Arc::new(client), mode)
        .with_random_todo_count(config.random_todo_count)
        .run()
        .await;

    if report.failures > 0 {
        tracing::warn!(
            failures = report.failures,
            "Some steps failed; rerun with --mode sequential to compare"
        );
    }

    Ok(report)
}
