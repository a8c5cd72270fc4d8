use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use story_proxy::{build_router, ProxyState, STORIES_PATH};
use threadist_core::{AppConfig, ErrorExt};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the listing proxy
#[derive(Parser, Debug)]
#[command(name = "threadist")]
#[command(about = "Listing proxy for Threadist story feeds")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "THREADIST_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, overrides `server.bind`
    #[arg(short, long, env = "THREADIST_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("threadist=info,story_proxy=info,reddit_client=info,tower_http=info")
        }))
        .init();

    let args = Args::parse();

    tracing::info!("Starting Threadist listing proxy");

    let mut config = AppConfig::load_or_default(args.config.as_deref())
        .map_err(|e| {
            e.log_error();
            e
        })
        .context("Failed to load configuration")?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let state = ProxyState::from_config(&config)
        .map_err(|e| {
            e.log_error();
            e
        })
        .context("Failed to initialize upstream client")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.bind))?;
    info!("Upstream: {}", config.upstream.base_url);
    info!("Listening on http://{}{}", config.server.bind, STORIES_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
