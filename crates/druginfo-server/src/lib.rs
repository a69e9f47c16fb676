//! # DrugInfo MCP Server
//!
//! Exposes the EDB DrugInfo API to MCP clients.
//!
//! ## Modules
//!
//! - `tools` - Tool definitions and dispatch onto the DrugInfo client
//! - `resources` - Static reference documents
//! - `prompts` - Static workflow prompts
//! - `handler` - rmcp `ServerHandler` tying the three together
//! - `server` - Startup wiring and the stdio / streamable HTTP transports
//! - `logging` - tracing subscriber setup

pub mod handler;
pub mod logging;
pub mod prompts;
pub mod resources;
pub mod server;
pub mod tools;

pub use handler::DrugInfoHandler;
pub use server::{build_handler, http_router, ServerSettings, Transport};
pub use tools::{DrugInfoTools, ToolError, ToolOutput};
