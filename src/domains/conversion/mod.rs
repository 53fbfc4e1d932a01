//! Conversion domain module.
//!
//! Everything between a validated tool call and the Pandoc process lives
//! here. The domain does not know about MCP; the `convert_contents` tool in
//! `domains/tools` is a thin wrapper around [`RequestAdapter`].
//!
//! ## Architecture
//!
//! - `format.rs` - The eight supported formats and their Pandoc names
//! - `path.rs` - Normalization of client-supplied paths
//! - `footer.rs` - Copyright footer policy
//! - `converter.rs` - Pandoc gateway (locating, validating and running it)
//! - `request.rs` - Request validation, dispatch and reply shaping
//! - `error.rs` - Conversion error types

pub mod converter;
mod error;
pub mod footer;
pub mod format;
pub mod path;
pub mod request;

pub use converter::{ConversionOutput, Invocation, PandocConverter};
pub use error::{ConversionError, ConversionResult};
pub use footer::FooterPolicy;
pub use format::Format;
pub use path::{PathStyle, normalize_path, normalize_path_for};
pub use request::{ConversionReply, ConversionRequest, FileReply, RequestAdapter};
