//! Document conversion tools.

pub mod contents;

pub use contents::{ConvertContentsParams, ConvertContentsTool};
