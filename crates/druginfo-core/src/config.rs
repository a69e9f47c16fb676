//! Deployment configuration read from the environment
//!
//! Loaded once at startup and shared as `Arc<Config>`; nothing mutates it
//! afterwards.

use std::fmt;
use std::time::Duration;

use crate::error::{DrugInfoError, Result};

pub const ENV_BASE_URL: &str = "EDB_BASE_URL";
pub const ENV_LOGIN_URL: &str = "EDB_LOGIN_URL";
pub const ENV_USER_ID: &str = "EDB_USER_ID";
pub const ENV_PASSWORD: &str = "EDB_PASSWORD";
pub const ENV_TIMEOUT: &str = "EDB_TIMEOUT";
pub const ENV_FORCE_LOGIN: &str = "EDB_FORCE_LOGIN";
pub const ENV_TOKEN: &str = "EDB_TOKEN";

pub const DEFAULT_BASE_URL: &str = "https://dev-adminapi.edbintra.co.kr";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Immutable snapshot of the `EDB_*` settings
#[derive(Clone)]
pub struct Config {
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// Login endpoint (defaults to `{base_url}/v1/auth/login`)
    pub login_url: String,
    /// Default user id for login / auto-login
    pub user_id: Option<String>,
    /// Default password for login / auto-login
    pub password: Option<String>,
    /// Per-request timeout for upstream calls
    pub timeout: Duration,
    /// Send `force=true` on login to evict a concurrent session
    pub force_login: bool,
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get(ENV_BASE_URL)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let login_url = get(ENV_LOGIN_URL).unwrap_or_else(|| format!("{}/v1/auth/login", base_url));

        let timeout_secs = match get(ENV_TIMEOUT) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                DrugInfoError::validation(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT, raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let force_login = get(ENV_FORCE_LOGIN)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            base_url,
            login_url,
            user_id: get(ENV_USER_ID),
            password: get(ENV_PASSWORD),
            timeout: Duration::from_secs(timeout_secs),
            force_login,
        })
    }

    /// Auto-login is only possible when both credentials are configured
    pub fn auto_login_enabled(&self) -> bool {
        self.user_id.is_some() && self.password.is_some()
    }

    /// Join an API path onto the base URL
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn presence(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "set"
    } else {
        "unset"
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config(base_url={}, login_url={}, user_id={}, password={}, timeout={}s, force_login={}, auto_login={})",
            self.base_url,
            self.login_url,
            presence(&self.user_id),
            presence(&self.password),
            self.timeout.as_secs(),
            self.force_login,
            if self.auto_login_enabled() { "enabled" } else { "disabled" },
        )
    }
}

// Credentials stay out of debug output too
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
