//! Tools domain module.
//!
//! Tools are executable functions that MCP clients call to perform actions.
//! This server exposes a single tool, `convert_contents`.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder used by the server handler
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define params, `execute()` and `create_route()`
//! 3. Export in `definitions/mod.rs`
//! 4. Add the route in `router.rs` using `with_route()`

pub mod definitions;
pub mod router;

pub use router::build_tool_router;
