//! Tools domain module.
//!
//! Tools are the DigitalOcean operations MCP clients can call.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations
//! - `router.rs` - Builds the rmcp ToolRouter from the definitions
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a tool struct in `definitions/` with `NAME`, `execute()`,
//!    `to_tool()` and `create_route()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs`

pub mod definitions;
mod error;
pub mod router;

pub use error::ToolError;
pub use router::build_tool_router;
