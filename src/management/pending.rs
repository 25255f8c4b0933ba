use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    error::AppError,
    spotify::AuthApi,
    types::{Credential, PendingAuthorization},
    utils,
};

/// How long a started login stays redeemable. Authorization codes are
/// short-lived anyway; anything older is an abandoned login.
pub const PENDING_TTL_SECS: i64 = 600;

/// In-flight authorization requests keyed by their state token. Each entry
/// is consumed exactly once by the callback; a state that is unknown,
/// forged, replayed, or expired fails the callback. Abandoned logins are
/// pruned when the next login starts, so the map stays bounded by logins
/// begun within the last TTL window.
pub struct PendingAuthTracker {
    pending: Mutex<HashMap<String, PendingAuthorization>>,
    ttl_secs: i64,
}

impl PendingAuthTracker {
    pub fn new() -> Self {
        Self::with_ttl(PENDING_TTL_SECS)
    }

    /// Tracker with a custom entry lifetime.
    pub fn with_ttl(ttl_secs: i64) -> Self {
        PendingAuthTracker {
            pending: Mutex::new(HashMap::new()),
            ttl_secs,
        }
    }

    /// Starts a login: records a pending entry under a fresh state token and
    /// returns the token together with the URL to redirect the user agent to.
    /// Entries older than the TTL are dropped on the way.
    pub async fn begin<A: AuthApi>(&self, auth: &A, scope: &str) -> (String, String) {
        let state = utils::generate_state_token();
        let url = auth.authorization_url(scope, &state);
        let now = Utc::now().timestamp();

        let mut pending = self.pending.lock().await;
        pending.retain(|_, entry| now - entry.created_at < self.ttl_secs);
        pending.insert(
            state.clone(),
            PendingAuthorization {
                scope: scope.to_string(),
                created_at: now,
            },
        );

        (state, url)
    }

    /// Completes a callback. The pending entry is removed before the code is
    /// exchanged, so a replayed state fails even while the first exchange is
    /// still in flight. An entry past the TTL counts as unknown.
    pub async fn complete<A: AuthApi>(
        &self,
        auth: &A,
        state: &str,
        code: &str,
    ) -> Result<Credential, AppError> {
        let entry = self.pending.lock().await.remove(state);
        let now = Utc::now().timestamp();
        match entry {
            Some(entry) if now - entry.created_at < self.ttl_secs => {}
            _ => return Err(AppError::InvalidAuthorizationState),
        }

        Ok(auth.exchange_code(code).await?)
    }

    /// Number of logins currently awaiting their callback.
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}

impl Default for PendingAuthTracker {
    fn default() -> Self {
        Self::new()
    }
}
