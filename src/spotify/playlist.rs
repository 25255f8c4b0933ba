use super::{ApiError, SpotifyClient};
use crate::types::{
    AddItemsRequest, Playlist, PlaylistItemsPage, RemoveItem, RemoveItemsRequest,
    UserPlaylistsResponse,
};

impl SpotifyClient {
    /// Playlists owned by or followed by the given user.
    pub(super) async fn fetch_user_playlists(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<Vec<Playlist>, ApiError> {
        let api_url = format!(
            "{uri}/users/{user_id}/playlists?limit=50",
            uri = self.api_url
        );

        let res = self
            .http
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        Ok(res.json::<UserPlaylistsResponse>().await?.items)
    }

    /// Playlist metadata, including the declared total item count that
    /// drives the membership pagination.
    pub(super) async fn fetch_playlist(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<Playlist, ApiError> {
        let api_url = format!("{uri}/playlists/{playlist_id}", uri = self.api_url);

        let res = self
            .http
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        Ok(res.json::<Playlist>().await?)
    }

    /// One offset-based page of playlist items.
    pub(super) async fn fetch_playlist_items(
        &self,
        token: &str,
        playlist_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<PlaylistItemsPage, ApiError> {
        let api_url = format!(
            "{uri}/playlists/{playlist_id}/tracks?offset={offset}&limit={limit}",
            uri = self.api_url
        );

        let res = self
            .http
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        Ok(res.json::<PlaylistItemsPage>().await?)
    }

    pub(super) async fn push_add_item(
        &self,
        token: &str,
        playlist_id: &str,
        uri: &str,
    ) -> Result<(), ApiError> {
        let api_url = format!("{api}/playlists/{playlist_id}/tracks", api = self.api_url);
        let body = AddItemsRequest {
            uris: vec![uri.to_string()],
        };

        self.http
            .post(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    pub(super) async fn push_remove_item(
        &self,
        token: &str,
        playlist_id: &str,
        uri: &str,
    ) -> Result<(), ApiError> {
        let api_url = format!("{api}/playlists/{playlist_id}/tracks", api = self.api_url);
        let body = RemoveItemsRequest {
            tracks: vec![RemoveItem {
                uri: uri.to_string(),
            }],
        };

        self.http
            .delete(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
