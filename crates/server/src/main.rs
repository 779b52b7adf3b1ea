use anyhow::{Context, Result};
use clap::Parser;
use folo_core::TransportKind;
use folo_mcp::{McpServer, ToolRegistry};
use folo_sdk::FoloClient;
use std::sync::Arc;

mod api;
mod config;
mod sessions;

use config::{Args, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the stdio protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folo=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = ServerConfig::from_args(args).context("Invalid server configuration")?;

    let client = FoloClient::from_env().context("Failed to create Folo client")?;
    if !client.has_session_token() {
        tracing::warn!("FOLO_SESSION_TOKEN is not set; tool calls will ask for it");
    }

    let registry = Arc::new(ToolRegistry::new(config.transport, Arc::new(client)));
    tracing::info!(
        "Starting folo-mcp v{} ({} transport, {} tools)",
        env!("CARGO_PKG_VERSION"),
        config.transport,
        registry.len()
    );

    match config.transport {
        TransportKind::Stdio => folo_mcp::serve_stdio(McpServer::new(registry)).await?,
        TransportKind::Http => api::serve(&config, registry).await?,
    }

    Ok(())
}
