use super::{ApiError, SpotifyClient};
use crate::types::User;

impl SpotifyClient {
    /// Profile of the user the token belongs to. The returned id is the
    /// stable identity the session and credential store are keyed by.
    pub(super) async fn fetch_current_user(&self, token: &str) -> Result<User, ApiError> {
        let api_url = format!("{uri}/me", uri = self.api_url);

        let res = self
            .http
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        Ok(res.json::<User>().await?)
    }
}
