use reqwest::StatusCode;

use super::{ApiError, SpotifyClient};
use crate::types::{CurrentlyPlaying, Track};

impl SpotifyClient {
    /// What the user's active device is playing right now. The service
    /// answers 204 when nothing is playing; an entry without an item means
    /// the same thing.
    pub(super) async fn fetch_currently_playing(
        &self,
        token: &str,
    ) -> Result<Option<Track>, ApiError> {
        let api_url = format!("{uri}/me/player/currently-playing", uri = self.api_url);

        let res = self.http.get(&api_url).bearer_auth(token).send().await?;
        if res.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let res = res.error_for_status()?;

        let playing = res.json::<CurrentlyPlaying>().await?;
        Ok(playing.item)
    }

    pub(super) async fn push_skip_to_next(&self, token: &str) -> Result<(), ApiError> {
        let api_url = format!("{uri}/me/player/next", uri = self.api_url);

        self.http
            .post(&api_url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
