//! `claw-router` command-line front end.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cr_router::log::format_decision;
use cr_router::{resolve_config, route, ResolvedConfig, RouterConfig};
use cr_server::report::status_text;
use cr_server::{app_with_state, state::AppState};
use cr_session::{RouterStats, SessionOverrideStore};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::signal;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "claw-router", version, about = "Bilingual message complexity router", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API.
    Serve {
        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1:8787")]
        addr: SocketAddr,
        /// Router config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Session override file, loaded at startup and saved on shutdown
        #[arg(long)]
        sessions: Option<PathBuf>,
    },
    /// Route a single message and print the decision.
    Test {
        message: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the resolved configuration.
    Status {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve { addr, config, sessions } => {
            serve(addr, load_config(config.as_deref())?, sessions).await
        }
        Commands::Test { message, config, json } => {
            let config = load_config(config.as_deref())?;
            let decision = route(&message, &config);
            if json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else {
                println!("Message:    {message:?}");
                println!("{}", format_decision(&decision));
            }
            Ok(())
        }
        Commands::Status { config } => {
            let config = load_config(config.as_deref())?;
            println!("{}", status_text(&config, &RouterStats::default()));
            Ok(())
        }
    }
}

async fn serve(addr: SocketAddr, config: ResolvedConfig, sessions_path: Option<PathBuf>) -> Result<()> {
    let sessions = match sessions_path.as_deref() {
        Some(path) if path.exists() => SessionOverrideStore::load_from(path)
            .with_context(|| format!("failed to load session overrides from {}", path.display()))?,
        _ => SessionOverrideStore::new(),
    };
    let state = AppState::with_sessions(config, sessions);
    let app = app_with_state(state.clone());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "claw-router listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(path) = sessions_path {
        state
            .sessions
            .save_to(&path)
            .with_context(|| format!("failed to save session overrides to {}", path.display()))?;
    }
    info!("server shutdown complete");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ResolvedConfig> {
    let raw = match path {
        Some(path) => Some(
            RouterConfig::from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
        ),
        None => None,
    };
    Ok(resolve_config(raw.as_ref()))
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
