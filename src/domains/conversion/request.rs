//! Request adapter.
//!
//! Turns one `convert_contents` call into converter calls: apply defaults,
//! validate field combinations, normalize paths, dispatch and shape the reply.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::converter::{ConversionOutput, PandocConverter};
use super::error::{ConversionError, ConversionResult};
use super::format::Format;
use super::path::normalize_path;

/// Format assumed when a request does not name one.
pub const DEFAULT_FORMAT: &str = "markdown";

/// A conversion request as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub contents: Option<String>,
    pub input_file: Option<String>,
    pub input_format: String,
    pub output_format: String,
    pub output_file: Option<String>,
}

impl Default for ConversionRequest {
    fn default() -> Self {
        Self {
            contents: None,
            input_file: None,
            input_format: DEFAULT_FORMAT.to_string(),
            output_format: DEFAULT_FORMAT.to_string(),
            output_file: None,
        }
    }
}

/// Where the document to convert comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Contents(String),
    File(PathBuf),
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub source: Source,
    pub input_format: Format,
    pub output_format: Format,
    pub output_file: Option<PathBuf>,
}

/// Payload returned for formats that are always written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReply {
    pub output_file: String,
    pub message: String,
}

/// What the tool hands back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionReply {
    /// Converted text, or a confirmation when the result went to a file.
    Inline(String),
    /// Reference to a produced file.
    File(FileReply),
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ConversionRequest {
    /// Validate the request without touching Pandoc.
    ///
    /// Checks run in a fixed order: missing input, unknown formats, missing
    /// output file, unreadable input format, nonexistent input file.
    pub fn validate(self) -> ConversionResult<ValidatedRequest> {
        let contents = present(self.contents);
        let input_file = present(self.input_file).map(|p| normalize_path(&p));
        let output_file = present(self.output_file).map(|p| normalize_path(&p));

        if contents.is_none() && input_file.is_none() {
            return Err(ConversionError::MissingInput);
        }

        let input_format: Format = self.input_format.parse()?;
        let output_format: Format = self.output_format.parse()?;

        if output_format.requires_output_file() && output_file.is_none() {
            return Err(ConversionError::OutputFileRequired(output_format.to_string()));
        }

        if !input_format.is_readable() {
            return Err(ConversionError::UnsupportedInputFormat(
                input_format.to_string(),
            ));
        }

        let source = match (contents, input_file) {
            (Some(contents), _) => Source::Contents(contents),
            (None, Some(path)) => {
                if !path.exists() {
                    debug!(operation = "check", path = %path.display(), "Input file missing");
                    return Err(ConversionError::InputFileNotFound(path));
                }
                Source::File(path)
            }
            (None, None) => return Err(ConversionError::MissingInput),
        };

        Ok(ValidatedRequest {
            source,
            input_format,
            output_format,
            output_file,
        })
    }
}

/// Runs validated requests against a shared converter.
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    converter: Arc<PandocConverter>,
}

impl RequestAdapter {
    /// Create an adapter around a converter.
    pub fn new(converter: Arc<PandocConverter>) -> Self {
        Self { converter }
    }

    /// Validate, convert and package the reply for one request.
    #[instrument(skip_all, fields(from = %request.input_format, to = %request.output_format))]
    pub fn handle(&self, request: ConversionRequest) -> ConversionResult<ConversionReply> {
        let request = request.validate().inspect_err(|e| {
            warn!("Rejected conversion request: {}", e);
        })?;

        let output_format = request.output_format;
        let (output, message) = self.dispatch(&request).inspect_err(|e| {
            warn!("Conversion failed: {}", e);
        })?;

        info!("Conversion completed");

        match output {
            ConversionOutput::File(path) if output_format.requires_output_file() => {
                Ok(ConversionReply::File(FileReply {
                    output_file: path.display().to_string(),
                    message,
                }))
            }
            ConversionOutput::File(_) => Ok(ConversionReply::Inline(message)),
            ConversionOutput::Text(text) => Ok(ConversionReply::Inline(text)),
        }
    }

    /// Route to the converter primitive matching the request's shape.
    fn dispatch(&self, request: &ValidatedRequest) -> ConversionResult<(ConversionOutput, String)> {
        let input = request.input_format;
        let output = request.output_format;
        let output_file = request.output_file.as_deref();

        match (&request.source, output_file) {
            (Source::Contents(contents), None) => {
                debug!("Dispatching text to text");
                let text = self.converter.convert_text_to_text(contents, input, output)?;
                Ok((ConversionOutput::Text(text), String::new()))
            }
            (Source::Contents(contents), Some(path)) => {
                debug!(output_file = %path.display(), "Dispatching text to file");
                let result = self
                    .converter
                    .convert_text_to_file(contents, input, output, Some(path))?;
                let message = format!(
                    "Successfully converted {input} to {output} file: {}",
                    path.display()
                );
                Ok((result, message))
            }
            (Source::File(source), output_file) => {
                debug!(input_file = %source.display(), "Dispatching file conversion");
                let result = self
                    .converter
                    .convert_file(source, input, output, output_file)?;
                let message = match output_file {
                    Some(path) => format!(
                        "Successfully converted {} to {output} file: {}",
                        source.display(),
                        path.display()
                    ),
                    None => String::new(),
                };
                Ok((result, message))
            }
        }
    }
}
