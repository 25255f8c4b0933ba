//! Configuration management for Song Basket.
//!
//! Configuration comes from environment variables, optionally loaded from a
//! `.env` file in the platform-specific local data directory
//! (`songbasket/.env`) or, failing that, from a `.env` next to the process.
//! Spotify endpoint URLs and the OAuth scope have sensible defaults; the
//! client credentials, redirect URI, and cookie secret must be set.

use std::{env, path::PathBuf};

use dotenv;

/// Scopes requested by default: playlist read/write plus playback read and
/// the skip-to-next control.
pub const DEFAULT_SCOPE: &str = "playlist-modify-private playlist-modify-public \
    playlist-read-collaborative playlist-read-private user-modify-playback-state \
    user-read-currently-playing user-read-playback-position user-read-playback-state";

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from `songbasket/.env` in the local data
/// directory, creating the directory on first run. When that file does not
/// exist, a `.env` in the working directory is tried instead; variables
/// already set in the environment always win.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("songbasket/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    } else {
        let _ = dotenv::dotenv();
    }
    Ok(())
}

/// Address the HTTP server binds to, e.g. `127.0.0.1:5000`.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Secret the session cookie is signed with.
///
/// # Panics
///
/// Panics if the `SECRET_KEY` environment variable is not set.
pub fn secret_key() -> String {
    env::var("SECRET_KEY").expect("SECRET_KEY must be set")
}

/// Spotify application client ID.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set")
}

/// Spotify application client secret. Keep it out of logs and version
/// control.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_SECRET` environment variable is not set.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").expect("SPOTIFY_CLIENT_SECRET must be set")
}

/// OAuth redirect URI; must match the URI registered with Spotify, e.g.
/// `http://127.0.0.1:5000/callback`.
///
/// # Panics
///
/// Panics if the `SPOTIFY_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_REDIRECT_URI").expect("SPOTIFY_REDIRECT_URI must be set")
}

/// OAuth scope requested on login. Defaults to [`DEFAULT_SCOPE`].
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string())
}

/// Spotify authorization endpoint.
pub fn spotify_auth_url() -> String {
    env::var("SPOTIFY_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string())
}

/// Spotify token exchange endpoint.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

/// Spotify Web API base URL.
pub fn spotify_api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}
