use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::{
    config,
    error::AppError,
    server::{CookieKey, SharedState},
    spotify::{AuthApi, MusicApi},
    success,
};

use super::{clear_session_cookie, session_cookie, session_user};

/// Kicks off the account-linking flow. Visitors who already hold a session
/// go straight home.
pub async fn login<S: AuthApi + MusicApi>(
    State(state): State<SharedState<S>>,
    jar: PrivateCookieJar<CookieKey>,
) -> Response {
    if session_user(&jar).is_some() {
        return Redirect::temporary("/").into_response();
    }

    let (_state_token, auth_url) = state
        .pending
        .begin(&state.service, &config::spotify_scope())
        .await;
    Redirect::temporary(&auth_url).into_response()
}

/// OAuth callback: consumes the pending authorization, exchanges the code,
/// and mints the session. Session identity is the provider's user id, not
/// the state token - the token is gone once the entry is consumed.
pub async fn callback<S: AuthApi + MusicApi>(
    State(state): State<SharedState<S>>,
    jar: PrivateCookieJar<CookieKey>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let (Some(code), Some(state_token)) = (params.get("code"), params.get("state")) else {
        return AppError::InvalidAuthorizationState.into_response();
    };

    let credential = match state.pending.complete(&state.service, state_token, code).await {
        Ok(credential) => credential,
        Err(e) => return e.into_response(),
    };

    let user = match state.service.current_user(&credential.access_token).await {
        Ok(user) => user,
        Err(e) => return AppError::ExternalService(e).into_response(),
    };

    state.credentials.put(&user.id, credential).await;
    success!("Session established for {}", user.id);

    let jar = jar.add(session_cookie(user.id));
    (jar, Redirect::temporary("/")).into_response()
}

/// Clears the session and everything owned by it: the stored credential and
/// the playlist selection.
pub async fn logout<S: AuthApi + MusicApi>(
    State(state): State<SharedState<S>>,
    jar: PrivateCookieJar<CookieKey>,
) -> Response {
    if let Some(user_id) = session_user(&jar) {
        state.credentials.remove(&user_id).await;
        state.playlists.clear(&user_id).await;
    }

    let jar = jar.remove(clear_session_cookie());
    (jar, Redirect::temporary("/")).into_response()
}
