//! Login request against the EDB auth endpoint

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::compact::{as_integer, pick_in};
use crate::error::{DrugInfoError, Result};

const TOKEN_KEYS: [&str; 4] = ["accessToken", "access_token", "token", "jwt"];
const EXPIRES_KEYS: [&str; 2] = ["expiresIn", "expires_in"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    user_id: &'a str,
    password: &'a str,
    force: bool,
}

/// Token issued by a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    /// Lifetime in seconds, when the server states one
    pub expires_in: Option<i64>,
}

impl IssuedToken {
    /// Pull the token out of a login response, top level or inside `data`
    pub fn from_response(body: &Value) -> Option<Self> {
        let sections = [body, body.get("data").unwrap_or(&Value::Null)];

        let access_token = sections
            .iter()
            .find_map(|s| pick_in(s, &TOKEN_KEYS))
            .and_then(|v| v.as_str().map(str::to_string))?;
        let expires_in = sections
            .iter()
            .find_map(|s| pick_in(s, &EXPIRES_KEYS))
            .and_then(|v| as_integer(&v))
            .filter(|secs| *secs > 0);

        Some(Self {
            access_token,
            expires_in,
        })
    }
}

/// POST the credentials and return the issued token.
///
/// Every failure, transport included, is reported as [`DrugInfoError::Auth`].
pub async fn request_token(
    http: &reqwest::Client,
    login_url: &str,
    user_id: &str,
    password: &str,
    force: bool,
    timeout: Duration,
) -> Result<IssuedToken> {
    debug!(url = %login_url, force, "Requesting login token");

    let response = http
        .post(login_url)
        .timeout(timeout)
        .json(&LoginRequest {
            user_id,
            password,
            force,
        })
        .send()
        .await
        .map_err(|e| DrugInfoError::auth(format!("login request failed: {}", e)))?;

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(DrugInfoError::auth(format!(
            "invalid credentials (HTTP {})",
            status.as_u16()
        )));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DrugInfoError::auth(format!(
            "login failed: HTTP {} - {}",
            status.as_u16(),
            body
        )));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| DrugInfoError::auth(format!("unreadable login response: {}", e)))?;

    IssuedToken::from_response(&body)
        .ok_or_else(|| DrugInfoError::auth("login response did not contain a token"))
}
