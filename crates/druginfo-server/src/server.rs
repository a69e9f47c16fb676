//! Startup wiring and transports

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use druginfo_core::auth::token_preview;
use druginfo_core::{AuthManager, Config, DrugInfoClient, EnvTokenMirror, TokenMirror};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use rmcp::ServiceExt;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::handler::DrugInfoHandler;
use crate::tools::DrugInfoTools;

pub const ENV_LOG_DIR: &str = "EDB_LOG_DIR";
pub const ENV_HTTP_ADDR: &str = "EDB_MCP_HTTP_ADDR";

/// How MCP clients reach the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    /// Streamable HTTP at `/mcp`
    Http(SocketAddr),
}

/// Process-level settings that sit outside the DrugInfo [`Config`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub transport: Transport,
    pub log_dir: Option<PathBuf>,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let transport = match get(ENV_HTTP_ADDR) {
            Some(raw) => Transport::Http(
                raw.parse()
                    .with_context(|| format!("{} is not a socket address: '{}'", ENV_HTTP_ADDR, raw))?,
            ),
            None => Transport::Stdio,
        };

        Ok(Self {
            transport,
            log_dir: get(ENV_LOG_DIR).map(PathBuf::from),
        })
    }
}

/// Wire the shared HTTP client, session and DrugInfo client into a handler
pub fn build_handler(config: Arc<Config>, mirror: Arc<dyn TokenMirror>) -> Result<DrugInfoHandler> {
    let http = reqwest::Client::builder()
        .user_agent(concat!("druginfo-mcp/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let auth = Arc::new(AuthManager::new(config.clone(), http.clone(), mirror));
    let client = Arc::new(DrugInfoClient::new(config, http, auth.clone()));
    Ok(DrugInfoHandler::new(Arc::new(DrugInfoTools::new(auth, client))))
}

/// axum router serving streamable HTTP MCP at `/mcp`
pub fn http_router(handler: DrugInfoHandler, cancellation_token: CancellationToken) -> axum::Router {
    let service = StreamableHttpService::new(
        move || Ok(handler.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
            sse_retry: Some(Duration::from_secs(3)),
            cancellation_token,
        },
    );
    axum::Router::new().nest_service("/mcp", service)
}

/// Build everything, attempt auto-login, then serve until the client or a signal stops us
pub async fn run(config: Config, settings: ServerSettings) -> Result<()> {
    info!(config = %config, transport = ?settings.transport, "Starting DrugInfo MCP server");

    let handler = build_handler(Arc::new(config), Arc::new(EnvTokenMirror::new()))?;

    match handler.auth().auto_login().await {
        Some(token) => info!(token = %token_preview(&token), "Auto-login succeeded"),
        None if handler.auth().config().auto_login_enabled() => {
            warn!("Auto-login failed; tools will retry on first use")
        }
        None => info!("No credentials configured; call the login tool first"),
    }

    match settings.transport {
        Transport::Stdio => serve_stdio(handler).await,
        Transport::Http(addr) => serve_http(handler, addr).await,
    }
}

async fn serve_stdio(handler: DrugInfoHandler) -> Result<()> {
    let service = match handler.serve(rmcp::transport::stdio()).await {
        Ok(service) => service,
        Err(e) => {
            error!(error = ?e, "MCP serve error");
            return Err(e.into());
        }
    };

    service.waiting().await?;
    info!("stdio session closed");
    Ok(())
}

async fn serve_http(handler: DrugInfoHandler, addr: SocketAddr) -> Result<()> {
    let ct = CancellationToken::new();
    let router = http_router(handler, ct.child_token());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %listener.local_addr()?, "Serving streamable HTTP at /mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutting down");
            ct.cancel();
        })
        .await?;
    Ok(())
}
