//! Exactly-once reauth-and-retry around an upstream call

use std::future::Future;

use tracing::{info, warn};

use super::AuthManager;
use crate::error::Result;

/// Run `op`; if upstream answers 401, refresh the session once and run it again.
///
/// The second outcome is returned as-is. A second `Unauthorized` propagates
/// instead of looping.
pub async fn with_reauth<T, F, Fut>(auth: &AuthManager, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let token_used = auth.get_token();

    match op().await {
        Err(e) if e.is_unauthorized() => {
            warn!(error = %e, "Upstream rejected the token, re-authenticating");
            let refreshed = auth.reauthenticate(token_used.as_deref()).await;
            info!(token_refreshed = refreshed.is_some(), "Retrying upstream call");
            op().await
        }
        outcome => outcome,
    }
}
