//! # DrugInfo Core Library
//!
//! Everything the MCP server needs to talk to the EDB DrugInfo API.
//!
//! ## Modules
//!
//! - `config` - Environment-derived deployment settings
//! - `error` - Error taxonomy shared by the client, the session, and the tools
//! - `auth` - Credential session: login, token cache, reauth-and-retry
//! - `druginfo` - Upstream HTTP client and query parameter types
//! - `compact` - Response compaction for token-friendly tool output

pub mod auth;
pub mod compact;
pub mod config;
pub mod druginfo;
pub mod error;

// Re-export commonly used types
pub use auth::{with_reauth, AuthManager, EnvTokenMirror, MemoryTokenMirror, TokenMirror};
pub use compact::{safe_compact, Compaction};
pub use config::Config;
pub use druginfo::DrugInfoClient;
pub use error::{DrugInfoError, Result};
