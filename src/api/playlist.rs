use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;

use crate::{
    error::AppError,
    server::{CookieKey, SharedState},
    spotify::{AuthApi, MusicApi},
};

use super::require_credential;

#[derive(Debug, Deserialize)]
pub struct SetPlaylistParams {
    id: String,
}

#[derive(Debug, Deserialize)]
pub struct AddParams {
    uri: String,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveParams {
    uri: String,
}

/// Lists the user's playlists as selection links.
pub async fn playlists<S: AuthApi + MusicApi>(
    State(state): State<SharedState<S>>,
    jar: PrivateCookieJar<CookieKey>,
) -> Result<Html<String>, AppError> {
    let (_user_id, credential) = require_credential(&state, &jar).await?;

    let user = state.service.current_user(&credential.access_token).await?;
    let playlists = state
        .service
        .list_playlists(&credential.access_token, &user.id)
        .await?;

    let mut page = String::from("<br>Playlists:<ul>");
    for playlist in playlists {
        page.push_str(&format!(
            "<li><a href='/setplaylist?id={id}'>{name}</a></li>",
            id = playlist.id,
            name = playlist.name
        ));
    }
    page.push_str("</ul>");
    Ok(Html(page))
}

/// Selects a playlist: full membership re-fetch, then back to the landing
/// page.
pub async fn set_playlist<S: AuthApi + MusicApi>(
    State(state): State<SharedState<S>>,
    jar: PrivateCookieJar<CookieKey>,
    Query(params): Query<SetPlaylistParams>,
) -> Result<Redirect, AppError> {
    let (user_id, credential) = require_credential(&state, &jar).await?;

    state
        .playlists
        .select(&state.service, &credential.access_token, &user_id, &params.id)
        .await?;
    Ok(Redirect::temporary("/"))
}

/// Adds the given track to the selected playlist; with `next=1` playback
/// also advances.
pub async fn add_to_list<S: AuthApi + MusicApi>(
    State(state): State<SharedState<S>>,
    jar: PrivateCookieJar<CookieKey>,
    Query(params): Query<AddParams>,
) -> Result<Redirect, AppError> {
    let (user_id, credential) = require_credential(&state, &jar).await?;

    state
        .playlists
        .add(&state.service, &credential.access_token, &user_id, &params.uri)
        .await?;
    if params.next.as_deref() == Some("1") {
        state.service.skip_to_next(&credential.access_token).await?;
    }
    Ok(Redirect::temporary("/"))
}

/// Removes the given track from the selected playlist and advances
/// playback.
pub async fn remove_from_list<S: AuthApi + MusicApi>(
    State(state): State<SharedState<S>>,
    jar: PrivateCookieJar<CookieKey>,
    Query(params): Query<RemoveParams>,
) -> Result<Redirect, AppError> {
    let (user_id, credential) = require_credential(&state, &jar).await?;

    state
        .playlists
        .remove(&state.service, &credential.access_token, &user_id, &params.uri)
        .await?;
    state.service.skip_to_next(&credential.access_token).await?;
    Ok(Redirect::temporary("/"))
}
