// OAuth token management for the Mercado Livre API.
//
// Access tokens live six hours. The manager caches one and refreshes it
// half an hour before expiry via the refresh-token grant. The marketplace
// rotates refresh tokens on every grant, so the newest one is kept in
// memory for the next refresh.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use anuncia_common::Credentials;

use crate::error::{MeliError, Result};
use crate::types::TokenGrant;

/// Refresh this long before the reported expiry.
const REFRESH_MARGIN_SECS: i64 = 1800;

#[derive(Debug, Clone)]
struct TokenState {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl TokenState {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Caches the current access token behind a mutex. No token is fetched
/// until the first authenticated call.
pub(crate) struct TokenManager {
    credentials: Credentials,
    state: Mutex<Option<TokenState>>,
}

impl TokenManager {
    pub(crate) fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            state: Mutex::new(None),
        }
    }

    /// Return a valid access token, refreshing when the cached one is
    /// missing or near expiry. The lock is held across the refresh so
    /// concurrent callers never double-refresh.
    pub(crate) async fn bearer(&self, client: &reqwest::Client, base_url: &str) -> Result<String> {
        let mut state = self.state.lock().await;

        let now = Utc::now();
        if let Some(current) = state.as_ref() {
            if current.is_fresh(now) {
                return Ok(current.access_token.clone());
            }
        }

        let refresh_token = state
            .as_ref()
            .map(|s| s.refresh_token.clone())
            .unwrap_or_else(|| self.credentials.refresh_token.clone());

        debug!("Refreshing access token");
        let url = format!("{base_url}/oauth/token");
        let resp = client
            .post(&url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("refresh_token", refresh_token.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MeliError::Auth {
                status: status.as_u16(),
                message: body,
            });
        }

        let grant: TokenGrant = resp.json().await?;
        info!(expires_in = grant.expires_in, "Access token refreshed");

        let next = TokenState {
            access_token: grant.access_token.clone(),
            refresh_token: grant.refresh_token.unwrap_or(refresh_token),
            expires_at: now + Duration::seconds(grant.expires_in),
        };
        *state = Some(next);

        Ok(grant.access_token)
    }
}
