use chrono::Utc;
use serde_json::Value;

use super::{ApiError, SpotifyClient};
use crate::types::Credential;

impl SpotifyClient {
    /// Constructs the authorization URL for the consent redirect. The state
    /// token ties the eventual callback back to a pending authorization.
    pub(super) fn build_authorization_url(&self, scope: &str, state: &str) -> String {
        format!(
            "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&state={state}&scope={scope}",
            auth_url = self.auth_url,
            client_id = self.client_id,
            redirect_uri = urlencoding::encode(&self.redirect_uri),
            state = state,
            scope = urlencoding::encode(scope),
        )
    }

    /// Exchanges an authorization code for an access/refresh token pair.
    ///
    /// The code is single-use and short-lived; the exchange happens right
    /// after the callback delivers it.
    pub(super) async fn request_token(&self, code: &str) -> Result<Credential, ApiError> {
        let res = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", &self.redirect_uri),
            ])
            .send()
            .await?
            .error_for_status()?;

        let json: Value = res.json().await?;
        credential_from_json(&json, None)
    }

    /// Exchanges a refresh token for a fresh access token. The service may
    /// omit the refresh token in the response, in which case the old one
    /// stays valid and is carried over.
    pub(super) async fn request_refresh(&self, refresh_token: &str) -> Result<Credential, ApiError> {
        let res = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?
            .error_for_status()?;

        let json: Value = res.json().await?;
        credential_from_json(&json, Some(refresh_token))
    }
}

fn credential_from_json(json: &Value, previous_refresh: Option<&str>) -> Result<Credential, ApiError> {
    let access_token = json["access_token"]
        .as_str()
        .ok_or_else(|| ApiError::Unexpected("token response missing access_token".to_string()))?
        .to_string();
    let refresh_token = json["refresh_token"]
        .as_str()
        .or(previous_refresh)
        .ok_or_else(|| ApiError::Unexpected("token response missing refresh_token".to_string()))?
        .to_string();

    Ok(Credential {
        access_token,
        refresh_token,
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
