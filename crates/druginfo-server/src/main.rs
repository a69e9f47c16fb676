//! DrugInfo MCP server binary
//!
//! Reads `.env.local` / `.env`, sets up logging, and serves MCP over stdio
//! (or streamable HTTP when `EDB_MCP_HTTP_ADDR` is set).

use anyhow::Result;
use druginfo_core::Config;
use druginfo_server::logging::init_tracing;
use druginfo_server::server::{run, ServerSettings};

#[tokio::main]
async fn main() -> Result<()> {
    // Already-set variables win over both files
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();

    let settings = ServerSettings::from_env()?;
    let _log_guard = init_tracing(settings.log_dir.as_deref())?;

    let config = Config::from_env()?;
    run(config, settings).await
}
