use std::{net::SocketAddr, path::PathBuf, str::FromStr, sync::Arc};

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;

use crate::{
    api, config, error,
    management::{CredentialStore, PendingAuthTracker, PlaylistCacheStore},
    spotify::{AuthApi, MusicApi},
    utils,
};

/// Process-wide state shared by all handlers: the service collaborators and
/// the three stores. Generic over the service so tests can run against an
/// in-memory fake.
pub struct AppState<S> {
    pub service: S,
    pub credentials: CredentialStore,
    pub pending: PendingAuthTracker,
    pub playlists: PlaylistCacheStore,
    cookie_key: Key,
}

pub type SharedState<S> = Arc<AppState<S>>;

impl<S> AppState<S> {
    /// Builds production state from the process configuration.
    ///
    /// # Panics
    ///
    /// Panics if `SECRET_KEY` is not set.
    pub fn new(service: S) -> Self {
        Self::with_parts(
            service,
            CredentialStore::default_dir(),
            utils::derive_cookie_key(&config::secret_key()),
        )
    }

    /// State with an explicit credential storage location and cookie key;
    /// [`Self::new`] wires these up from the process configuration.
    pub fn with_parts(service: S, storage_dir: PathBuf, cookie_key: Key) -> Self {
        AppState {
            service,
            credentials: CredentialStore::new(storage_dir),
            pending: PendingAuthTracker::new(),
            playlists: PlaylistCacheStore::new(),
            cookie_key,
        }
    }
}

/// Local wrapper around the cookie [`Key`] so the [`FromRef`] impl below
/// satisfies the orphan rule (`Key`, `Arc`, and `FromRef` are all foreign).
#[derive(Clone)]
pub struct CookieKey(Key);

impl From<CookieKey> for Key {
    fn from(key: CookieKey) -> Key {
        key.0
    }
}

impl<S> FromRef<SharedState<S>> for CookieKey {
    fn from_ref(state: &SharedState<S>) -> CookieKey {
        CookieKey(state.cookie_key.clone())
    }
}

pub fn router<S: AuthApi + MusicApi>(state: SharedState<S>) -> Router {
    Router::new()
        .route("/", get(api::home::<S>))
        .route("/login", get(api::login::<S>))
        .route("/callback", get(api::callback::<S>))
        .route("/logout", get(api::logout::<S>))
        .route("/playlists", get(api::playlists::<S>))
        .route("/setplaylist", get(api::set_playlist::<S>))
        .route("/addtolist", get(api::add_to_list::<S>))
        .route("/rmfromlist", get(api::remove_from_list::<S>))
        .route("/health", get(api::health))
        .with_state(state)
}

pub async fn start<S: AuthApi + MusicApi>(state: SharedState<S>) {
    let app = router(state);

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
