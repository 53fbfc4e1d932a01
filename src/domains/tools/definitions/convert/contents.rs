//! Document conversion tool definition.
//!
//! `convert_contents` converts inline text or a file between document formats
//! by running Pandoc.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::domains::conversion::{
    ConversionReply, ConversionRequest, Format, RequestAdapter, request::DEFAULT_FORMAT,
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the convert_contents tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConvertContentsParams {
    /// Source content to convert (required if input_file not provided)
    #[serde(default)]
    pub contents: Option<String>,

    /// Complete path to input file (required if contents not provided)
    #[serde(default)]
    pub input_file: Option<String>,

    /// Source format of the content
    #[serde(default = "default_format")]
    #[schemars(schema_with = "format_schema")]
    pub input_format: String,

    /// Target format
    #[serde(default = "default_format")]
    #[schemars(schema_with = "format_schema")]
    pub output_format: String,

    /// Complete path for output file (required for pdf, docx, rst, latex, epub formats)
    #[serde(default)]
    pub output_file: Option<String>,
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

/// Formats are plain strings so unknown names reach validation and get a
/// proper error message instead of a deserialization failure.
fn format_schema(_generator: &mut SchemaGenerator) -> Schema {
    let names: Vec<&str> = Format::ALL.iter().map(|f| f.as_str()).collect();
    json_schema!({
        "type": "string",
        "enum": names,
        "default": DEFAULT_FORMAT,
    })
}

impl From<ConvertContentsParams> for ConversionRequest {
    fn from(params: ConvertContentsParams) -> Self {
        Self {
            contents: params.contents,
            input_file: params.input_file,
            input_format: params.input_format,
            output_format: params.output_format,
            output_file: params.output_file,
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Conversion tool - converts documents between formats with Pandoc.
pub struct ConvertContentsTool;

impl ConvertContentsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "convert_contents";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Convert document between different formats using Pandoc. Supported formats: markdown, html, pdf, docx, rst, latex, epub, txt. Provide either contents or input_file; pdf, docx, epub, latex and rst output need output_file.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(from = %params.input_format, to = %params.output_format))]
    pub fn execute(params: ConvertContentsParams, adapter: &RequestAdapter) -> CallToolResult {
        info!(
            has_contents = params.contents.is_some(),
            input_file = ?params.input_file,
            output_file = ?params.output_file,
            "Convert tool called"
        );

        match adapter.handle(params.into()) {
            Ok(ConversionReply::Inline(text)) => CallToolResult::success(vec![Content::text(text)]),
            Ok(ConversionReply::File(reply)) => match serde_json::to_value(&reply) {
                Ok(value) => CallToolResult {
                    content: vec![Content::text(value.to_string())],
                    structured_content: Some(value),
                    is_error: Some(false),
                    meta: None,
                },
                Err(e) => CallToolResult::error(vec![Content::text(format!(
                    "Failed to encode result: {e}"
                ))]),
            },
            Err(e) => {
                warn!("convert_contents failed: {}", e);
                CallToolResult::error(vec![Content::text(e.to_string())])
            }
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ConvertContentsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the MCP server.
    ///
    /// Pandoc runs on the blocking pool; calls do not share any state besides
    /// the adapter.
    pub fn create_route<S>(adapter: RequestAdapter) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let adapter = adapter.clone();
            async move {
                let params: ConvertContentsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                let result = tokio::task::spawn_blocking(move || Self::execute(params, &adapter))
                    .await
                    .map_err(|e| {
                        McpError::internal_error(format!("Task execution failed: {}", e), None)
                    })?;

                Ok(result)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn result_text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_params_defaults() {
        let params: ConvertContentsParams =
            serde_json::from_str(r##"{"contents": "# Hello"}"##).unwrap();
        assert_eq!(params.input_format, "markdown");
        assert_eq!(params.output_format, "markdown");
        assert!(params.input_file.is_none());
        assert!(params.output_file.is_none());
    }

    #[test]
    fn test_unknown_format_still_deserializes() {
        let params: ConvertContentsParams =
            serde_json::from_str(r#"{"contents": "x", "output_format": "xml"}"#).unwrap();
        assert_eq!(params.output_format, "xml");
    }

    #[test]
    fn test_schema_lists_formats() {
        let tool = ConvertContentsTool::to_tool();
        let schema = serde_json::Value::Object((*tool.input_schema).clone());
        let formats = &schema["properties"]["input_format"]["enum"];
        assert_eq!(formats.as_array().unwrap().len(), 8);
        assert!(formats.as_array().unwrap().contains(&serde_json::json!("epub")));
        assert_eq!(schema["properties"]["output_format"]["default"], "markdown");
    }

    #[cfg(unix)]
    mod with_fake_pandoc {
        use super::*;
        use crate::domains::conversion::converter::tests::install_fake_pandoc;
        use crate::domains::conversion::{FooterPolicy, PandocConverter};
        use std::sync::Arc;
        use tempfile::TempDir;

        fn adapter(dir: &TempDir) -> RequestAdapter {
            let converter =
                PandocConverter::new(install_fake_pandoc(dir.path()), FooterPolicy::default())
                    .unwrap();
            RequestAdapter::new(Arc::new(converter))
        }

        fn params(json: serde_json::Value) -> ConvertContentsParams {
            serde_json::from_value(json).unwrap()
        }

        #[test]
        fn test_inline_result() {
            let dir = TempDir::new().unwrap();
            let result = ConvertContentsTool::execute(
                params(serde_json::json!({"contents": "# Title", "output_format": "html"})),
                &adapter(&dir),
            );
            assert!(!result.is_error.unwrap_or(false));
            assert_eq!(result_text(&result), "# Title");
            assert!(result.structured_content.is_none());
        }

        #[test]
        fn test_file_result_is_json() {
            let dir = TempDir::new().unwrap();
            let destination = dir.path().join("book.epub");
            let result = ConvertContentsTool::execute(
                params(serde_json::json!({
                    "contents": "# Book",
                    "output_format": "epub",
                    "output_file": destination.to_string_lossy(),
                })),
                &adapter(&dir),
            );
            assert!(!result.is_error.unwrap_or(false));

            let payload: serde_json::Value = serde_json::from_str(result_text(&result)).unwrap();
            assert_eq!(payload["output_file"], destination.to_string_lossy().to_string());
            assert!(payload["message"].as_str().unwrap().contains("epub"));
            assert_eq!(result.structured_content, Some(payload));
        }

        #[test]
        fn test_errors_become_tool_errors() {
            let dir = TempDir::new().unwrap();
            let adapter = adapter(&dir);

            let cases = [
                (serde_json::json!({}), "Either contents or input_file"),
                (
                    serde_json::json!({"contents": "x", "output_format": "xml"}),
                    "Unsupported format: xml",
                ),
                (
                    serde_json::json!({"contents": "x", "output_format": "docx"}),
                    "Output file is required for docx",
                ),
                (
                    serde_json::json!({"contents": "x", "input_format": "pdf"}),
                    "not supported as input format",
                ),
                (
                    serde_json::json!({"input_file": "/nonexistent/doc.md"}),
                    "Input file not found",
                ),
            ];

            for (json, expected) in cases {
                let result = ConvertContentsTool::execute(params(json), &adapter);
                assert!(result.is_error.unwrap_or(false));
                assert!(
                    result_text(&result).contains(expected),
                    "expected {expected:?} in {:?}",
                    result_text(&result)
                );
            }
        }
    }
}
