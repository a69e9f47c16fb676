//! Credential session for the DrugInfo API
//!
//! One [`AuthManager`] per process holds the bearer token and its expiry.
//! The expiry is a client-side estimate; the upstream 401 is the real signal,
//! which is why every tool call goes through [`with_reauth`].

mod login;
mod mirror;
mod retry;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{DrugInfoError, Result};

pub use login::{request_token, IssuedToken};
pub use mirror::{EnvTokenMirror, MemoryTokenMirror, TokenMirror};
pub use retry::with_reauth;

/// Validity assumed when the login response does not state one
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// The cached bearer token
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    fn new(value: String, lifetime_secs: i64) -> Self {
        Self {
            value,
            expires_at: Utc::now() + Duration::seconds(lifetime_secs),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Short, log-safe prefix of a token
pub fn token_preview(token: &str) -> String {
    let prefix: String = token.chars().take(20).collect();
    format!("{}...", prefix)
}

/// Owns the session token and performs (re-)login
pub struct AuthManager {
    config: Arc<Config>,
    http: reqwest::Client,
    mirror: Arc<dyn TokenMirror>,
    token: RwLock<Option<SessionToken>>,
    /// Serializes automatic logins so concurrent 401s trigger one login
    login_gate: Mutex<()>,
}

impl AuthManager {
    pub fn new(config: Arc<Config>, http: reqwest::Client, mirror: Arc<dyn TokenMirror>) -> Self {
        Self {
            config,
            http,
            mirror,
            token: RwLock::new(None),
            login_gate: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Log in and cache the issued token.
    ///
    /// Missing arguments fall back to the configured credentials.
    pub async fn login(
        &self,
        user_id: Option<&str>,
        password: Option<&str>,
        force: bool,
    ) -> Result<String> {
        let uid = user_id
            .filter(|v| !v.is_empty())
            .or(self.config.user_id.as_deref());
        let pwd = password
            .filter(|v| !v.is_empty())
            .or(self.config.password.as_deref());

        let (uid, pwd) = match (uid, pwd) {
            (Some(uid), Some(pwd)) => (uid, pwd),
            _ => return Err(DrugInfoError::validation("user id and password are required")),
        };
        if self.config.login_url.is_empty() {
            return Err(DrugInfoError::validation("login URL is not configured"));
        }

        info!(user = %uid, "Logging in");
        let issued = match request_token(
            &self.http,
            &self.config.login_url,
            uid,
            pwd,
            force,
            self.config.timeout,
        )
        .await
        {
            Ok(issued) => issued,
            Err(e) => {
                warn!(user = %uid, error = %e, "Login failed");
                return Err(e);
            }
        };

        let lifetime = issued.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        let token = issued.access_token;
        self.store(token.clone(), lifetime);
        self.mirror.set(&token);

        info!(user = %uid, expires_in = lifetime, "Login succeeded");
        Ok(token)
    }

    /// Return a usable token, logging in with the configured credentials if needed.
    ///
    /// Returns `None` when auto-login is disabled or the login fails; the
    /// caller then proceeds unauthenticated.
    pub async fn auto_login(&self) -> Option<String> {
        if !self.config.auto_login_enabled() {
            debug!("Auto-login disabled (no credentials configured)");
            return None;
        }
        let _gate = self.login_gate.lock().await;
        self.auto_login_locked().await
    }

    async fn auto_login_locked(&self) -> Option<String> {
        if let Some(token) = self.valid_cached_token() {
            debug!("Cached token still valid");
            return Some(token);
        }

        if let Some(token) = self.mirror.get() {
            debug!("Adopting mirrored token");
            self.store(token.clone(), DEFAULT_TOKEN_LIFETIME_SECS);
            return Some(token);
        }

        match self.login(None, None, self.config.force_login).await {
            Ok(token) => Some(token),
            Err(e) => {
                warn!(error = %e, "Auto-login failed");
                None
            }
        }
    }

    /// Recover from an unauthorized response.
    ///
    /// `stale` is the token the rejected call used. If another task already
    /// replaced it, the replacement is returned without logging in again.
    pub async fn reauthenticate(&self, stale: Option<&str>) -> Option<String> {
        let _gate = self.login_gate.lock().await;

        let current = self.get_token();
        if current.is_some() && current.as_deref() != stale {
            debug!("Token already refreshed by a concurrent call");
            return current;
        }

        self.clear_token();
        self.auto_login_locked().await
    }

    /// Current token: in-memory first, then the mirror
    pub fn get_token(&self) -> Option<String> {
        self.token
            .read()
            .as_ref()
            .map(|t| t.value.clone())
            .or_else(|| self.mirror.get())
    }

    /// Forget the token in memory and in the mirror
    pub fn clear_token(&self) {
        *self.token.write() = None;
        self.mirror.clear();
        debug!("Token cleared");
    }

    /// Snapshot of the cached session, if any
    pub fn session(&self) -> Option<SessionToken> {
        self.token.read().clone()
    }

    fn valid_cached_token(&self) -> Option<String> {
        self.token
            .read()
            .as_ref()
            .filter(|t| !t.is_expired())
            .map(|t| t.value.clone())
    }

    fn store(&self, value: String, lifetime_secs: i64) {
        *self.token.write() = Some(SessionToken::new(value, lifetime_secs));
    }
}
