//! # Spotify Integration Module
//!
//! Interface to the Spotify Web API, split into the two collaborators the
//! rest of the application depends on:
//!
//! - [`AuthApi`] - the OAuth 2.0 authorization-code flow against the account
//!   service: building the consent URL, exchanging the callback code, and
//!   refreshing access tokens.
//! - [`MusicApi`] - the music service proper: profile, playlists, playlist
//!   membership pages, add/remove, current playback, and skip-to-next.
//!
//! [`SpotifyClient`] is the reqwest-backed implementation of both traits.
//! The traits exist so the management layer and the tests can run against an
//! in-memory fake; handlers are generic over them.
//!
//! Every call can fail with [`ApiError`]. Nothing here retries: a transport
//! failure surfaces immediately and the caller decides whether the page
//! degrades or the request aborts.

pub mod auth;
pub mod player;
pub mod playlist;
pub mod user;

use std::future::Future;

use reqwest::Client;

use crate::{
    config,
    types::{Credential, Playlist, PlaylistItemsPage, Track, User},
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// OAuth collaborator: the account service's authorization-code flow.
pub trait AuthApi: Send + Sync + 'static {
    /// URL the user agent is redirected to for consent.
    fn authorization_url(&self, scope: &str, state: &str) -> String;

    /// Exchange a callback authorization code for a credential.
    fn exchange_code(&self, code: &str)
    -> impl Future<Output = Result<Credential, ApiError>> + Send;

    /// Exchange a refresh token for a fresh credential.
    fn refresh(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<Credential, ApiError>> + Send;
}

/// Music service collaborator: playback and playlist operations.
pub trait MusicApi: Send + Sync + 'static {
    fn current_user(&self, token: &str) -> impl Future<Output = Result<User, ApiError>> + Send;

    fn list_playlists(
        &self,
        token: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Playlist>, ApiError>> + Send;

    fn get_playlist(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> impl Future<Output = Result<Playlist, ApiError>> + Send;

    fn playlist_items(
        &self,
        token: &str,
        playlist_id: &str,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<PlaylistItemsPage, ApiError>> + Send;

    fn add_item(
        &self,
        token: &str,
        playlist_id: &str,
        uri: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn remove_item(
        &self,
        token: &str,
        playlist_id: &str,
        uri: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `None` when nothing is playing.
    fn currently_playing(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<Track>, ApiError>> + Send;

    fn skip_to_next(&self, token: &str) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// reqwest-backed client for the real service.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: String,
    token_url: String,
    api_url: String,
}

impl SpotifyClient {
    /// Builds a client from the process configuration.
    ///
    /// # Panics
    ///
    /// Panics if a required environment variable is missing, see
    /// [`crate::config`].
    pub fn from_env() -> Self {
        SpotifyClient {
            http: Client::new(),
            client_id: config::spotify_client_id(),
            client_secret: config::spotify_client_secret(),
            redirect_uri: config::spotify_redirect_uri(),
            auth_url: config::spotify_auth_url(),
            token_url: config::spotify_token_url(),
            api_url: config::spotify_api_url(),
        }
    }
}

impl AuthApi for SpotifyClient {
    fn authorization_url(&self, scope: &str, state: &str) -> String {
        self.build_authorization_url(scope, state)
    }

    async fn exchange_code(&self, code: &str) -> Result<Credential, ApiError> {
        self.request_token(code).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Credential, ApiError> {
        self.request_refresh(refresh_token).await
    }
}

impl MusicApi for SpotifyClient {
    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        self.fetch_current_user(token).await
    }

    async fn list_playlists(&self, token: &str, user_id: &str) -> Result<Vec<Playlist>, ApiError> {
        self.fetch_user_playlists(token, user_id).await
    }

    async fn get_playlist(&self, token: &str, playlist_id: &str) -> Result<Playlist, ApiError> {
        self.fetch_playlist(token, playlist_id).await
    }

    async fn playlist_items(
        &self,
        token: &str,
        playlist_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<PlaylistItemsPage, ApiError> {
        self.fetch_playlist_items(token, playlist_id, offset, limit)
            .await
    }

    async fn add_item(&self, token: &str, playlist_id: &str, uri: &str) -> Result<(), ApiError> {
        self.push_add_item(token, playlist_id, uri).await
    }

    async fn remove_item(&self, token: &str, playlist_id: &str, uri: &str) -> Result<(), ApiError> {
        self.push_remove_item(token, playlist_id, uri).await
    }

    async fn currently_playing(&self, token: &str) -> Result<Option<Track>, ApiError> {
        self.fetch_currently_playing(token).await
    }

    async fn skip_to_next(&self, token: &str) -> Result<(), ApiError> {
        self.push_skip_to_next(token).await
    }
}
