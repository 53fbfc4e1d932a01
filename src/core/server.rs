//! MCP server handler.
//!
//! `McpServer` implements rmcp's `ServerHandler`. Tool calls are routed by
//! the `ToolRouter` built in `domains/tools/router.rs`; each route owns a
//! clone of the shared `RequestAdapter`.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use crate::domains::conversion::{PandocConverter, RequestAdapter};
use crate::domains::tools::build_tool_router;

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server around a located Pandoc converter.
    pub fn new(config: Config, converter: PandocConverter) -> Self {
        let adapter = RequestAdapter::new(Arc::new(converter));

        Self {
            tool_router: build_tool_router::<Self>(adapter),
            config: Arc::new(config),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// List all available tools as JSON.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Converts documents between markdown, html, pdf, docx, rst, latex, epub and txt \
                 using Pandoc. Call convert_contents with either `contents` or `input_file`. \
                 pdf, docx, epub, latex and rst output require `output_file`; pdf cannot be \
                 used as an input format."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
