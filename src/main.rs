//! MCP Server Entry Point
//!
//! Loads configuration, initializes logging, locates Pandoc and serves the
//! `convert_contents` tool over stdio.

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use pandoc_mcp_server::core::{Config, McpServer, StdioTransport, init_logging};
use pandoc_mcp_server::domains::conversion::PandocConverter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    let log_file = init_logging(&config.logging)?;

    info!("Starting {} v{}", config.server.name, config.server.version);
    if let Some(path) = log_file {
        info!("Logging to {}", path.display());
    }
    for warning in &config.warnings {
        warn!("{}", warning);
    }
    if let Some(path) = &config.pandoc.executable_path {
        info!("Using Pandoc from PANDOC_PATH: {}", path.display());
    }

    // Pandoc is resolved once; every tool call shares this handle
    let converter = PandocConverter::locate(&config.pandoc)
        .inspect_err(|e| error!("Failed to initialize Pandoc: {}", e))
        .context("Failed to initialize Pandoc")?;

    match converter.version() {
        Ok(version) => info!("Using {} at {}", version, converter.executable().display()),
        Err(e) => warn!("Could not determine Pandoc version: {}", e),
    }

    let server = McpServer::new(config, converter);

    info!("Server initialized, waiting for requests");

    StdioTransport::run(server).await?;

    info!("Server shutting down");

    Ok(())
}
