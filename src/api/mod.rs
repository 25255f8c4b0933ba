//! # API Module
//!
//! HTTP handlers for the web surface. Routes are wired up in
//! [`crate::server::router`]:
//!
//! - `/` - session, profile, selected playlist, and now-playing state
//! - `/login`, `/callback`, `/logout` - the OAuth account-linking flow
//! - `/playlists`, `/setplaylist` - playlist selection
//! - `/addtolist`, `/rmfromlist` - membership mutations
//! - `/health` - status and version for monitoring
//!
//! All handlers are generic over the service collaborators so the same
//! router runs against the real client and against test fakes. Session
//! identity travels in a signed cookie holding the provider's user id.

mod auth;
mod health;
mod home;
mod playlist;

pub use auth::callback;
pub use auth::login;
pub use auth::logout;
pub use health::health;
pub use home::home;
pub use home::login_page;
pub use playlist::add_to_list;
pub use playlist::playlists;
pub use playlist::remove_from_list;
pub use playlist::set_playlist;

use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use time::Duration;

use crate::{
    error::AppError,
    server::{CookieKey, SharedState},
    spotify::{AuthApi, MusicApi},
    types::Credential,
};

const SESSION_COOKIE: &str = "songbasket_session";
const SESSION_TTL_DAYS: i64 = 7;

/// User id bound to the request's session, if any.
fn session_user(jar: &PrivateCookieJar<CookieKey>) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

fn session_cookie(user_id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, user_id))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// Removal cookie; path must match the session cookie for browsers to drop
/// it.
fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Resolves the request's session into a non-expired credential, or fails
/// the request with the appropriate error.
async fn require_credential<S: AuthApi + MusicApi>(
    state: &SharedState<S>,
    jar: &PrivateCookieJar<CookieKey>,
) -> Result<(String, Credential), AppError> {
    let user_id = session_user(jar).ok_or(AppError::AuthenticationRequired)?;
    let credential = state
        .credentials
        .resolve_valid(&state.service, &user_id)
        .await?
        .ok_or(AppError::AuthenticationRequired)?;
    Ok((user_id, credential))
}
