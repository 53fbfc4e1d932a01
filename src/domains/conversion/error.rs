//! Conversion-specific error types.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for conversion operations.
pub type ConversionResult<T> = std::result::Result<T, ConversionError>;

/// Errors that can occur while validating or running a conversion.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// No usable Pandoc executable was configured or found on `PATH`.
    #[error("Pandoc executable not found: {0}")]
    ExecutableNotFound(String),

    /// The resolved executable path cannot be used.
    #[error("Invalid Pandoc executable at {}: {}", .path.display(), .reason)]
    ExecutableInvalid { path: PathBuf, reason: String },

    /// A format name outside the supported set.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A supported format that Pandoc cannot read.
    #[error(
        "{0} is not supported as input format, Pandoc can convert to {0} but not from {0}"
    )]
    UnsupportedInputFormat(String),

    /// Neither inline contents nor an input file were supplied.
    #[error("Either contents or input_file must be provided")]
    MissingInput,

    /// The named input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputFileNotFound(PathBuf),

    /// The requested output format must be written to a file.
    #[error("Output file is required for {0} format")]
    OutputFileRequired(String),

    /// The output format cannot be streamed back as text.
    #[error("{0} output cannot be returned as text, an output file is required")]
    OutputRequiresFile(String),

    /// The destination cannot hold the requested format.
    #[error("{format} output must be written to a .{extension} file, got {}", .path.display())]
    OutputExtensionMismatch {
        format: String,
        extension: String,
        path: PathBuf,
    },

    /// The caller's input file exists but could not be read.
    #[error("Failed to read input file {}: {source}", .path.display())]
    InputFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scratch file creation, read or write failed.
    #[error("I/O error while trying to {context}: {source}")]
    TempFileIo {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Pandoc could not be spawned or exited with a non-zero status.
    #[error("Pandoc conversion failed: {status}\nOutput: {output}")]
    ConversionFailed { status: String, output: String },
}

impl ConversionError {
    /// Create an "executable invalid" error.
    pub fn executable_invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ExecutableInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a temp-file I/O error with the step that failed.
    pub fn temp_io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::TempFileIo {
            context: context.into(),
            source,
        }
    }

    /// Create a "conversion failed" error from an exit status and captured output.
    pub fn conversion_failed(status: impl Into<String>, output: impl Into<String>) -> Self {
        Self::ConversionFailed {
            status: status.into(),
            output: output.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_failed_carries_output() {
        let err = ConversionError::conversion_failed("exit status: 64", "unknown reader foo");
        let msg = err.to_string();
        assert!(msg.contains("exit status: 64"));
        assert!(msg.contains("unknown reader foo"));
    }

    #[test]
    fn test_extension_mismatch_message() {
        let err = ConversionError::OutputExtensionMismatch {
            format: "pdf".to_string(),
            extension: "pdf".to_string(),
            path: PathBuf::from("/out/report.tex"),
        };
        assert_eq!(
            err.to_string(),
            "pdf output must be written to a .pdf file, got /out/report.tex"
        );
    }

    #[test]
    fn test_unsupported_input_message() {
        let err = ConversionError::UnsupportedInputFormat("pdf".to_string());
        assert!(err.to_string().starts_with("pdf is not supported as input format"));
    }
}
