//! Domains module containing business logic organized by bounded contexts.
//!
//! - **conversion**: Pandoc invocation, request validation and replies
//! - **tools**: MCP tool definitions wrapping the conversion domain

pub mod conversion;
pub mod tools;
