//! Pandoc MCP Server Library
//!
//! This crate exposes Pandoc document conversion as a single Model Context
//! Protocol (MCP) tool, `convert_contents`, served over stdio.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, logging, the server handler and
//!   the stdio transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **conversion**: Locating Pandoc, validating requests, running conversions
//!   - **tools**: The MCP tool wrapping the conversion domain
//!
//! # Example
//!
//! ```rust,no_run
//! use pandoc_mcp_server::core::{Config, McpServer, StdioTransport};
//! use pandoc_mcp_server::domains::conversion::PandocConverter;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let converter = PandocConverter::locate(&config.pandoc)?;
//!     let server = McpServer::new(config, converter);
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
