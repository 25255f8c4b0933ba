use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::{
    management,
    server::{CookieKey, SharedState},
    spotify::{AuthApi, MusicApi},
    types::NowPlaying,
};

use super::{clear_session_cookie, session_user};

/// Landing page: who is logged in, which playlist is selected, what is
/// playing, and the matching add/remove affordance. Read-only service
/// failures degrade their line; the page itself always renders.
pub async fn home<S: AuthApi + MusicApi>(
    State(state): State<SharedState<S>>,
    jar: PrivateCookieJar<CookieKey>,
) -> Response {
    let Some(user_id) = session_user(&jar) else {
        return Html(login_page()).into_response();
    };

    let credential = match state.credentials.resolve_valid(&state.service, &user_id).await {
        Ok(Some(credential)) => credential,
        // Cookie outlived the stored credential; drop the stale session.
        Ok(None) => {
            let jar = jar.remove(clear_session_cookie());
            return (jar, Html(login_page())).into_response();
        }
        Err(e) => return e.into_response(),
    };
    let token = credential.access_token;

    let mut page = String::from(
        "<!DOCTYPE html><html><head><title>Song Basket</title>\
         <meta http-equiv='refresh' content='5'>\
         <style>.track { font-weight: bold; } .playlist { font-weight: bold; }</style>\
         </head><body>",
    );

    match state.service.current_user(&token).await {
        Ok(user) => page.push_str(&format!(
            "User: {} [<a href='/logout'>Logout</a>]",
            user.display()
        )),
        Err(_) => page.push_str("User: (profile unavailable) [<a href='/logout'>Logout</a>]"),
    }

    let selection = state.playlists.snapshot(&user_id).await;
    match &selection {
        Some(cache) => page.push_str(&format!(
            "<br>Playlist: <span class='playlist'>{name}</span>, {count} tracks [<a href='/playlists'>Change</a>]",
            name = cache.name,
            count = cache.track_uris.len()
        )),
        None => page.push_str("<br>No playlist [<a href='/playlists'>Choose one</a>]"),
    }

    match management::classify(&state.service, &token).await {
        NowPlaying::Playing(track) => {
            page.push_str(&format!(
                "<br>Playing: <span class='track'>{}</span>",
                track.name
            ));
            if let Some(cache) = &selection {
                if cache.track_uris.contains(&track.uri) {
                    page.push_str(&format!(
                        " in playlist. [<a href=\"/rmfromlist?uri={}\">Remove</a>]",
                        track.uri
                    ));
                } else {
                    page.push_str(&format!(
                        " [<a href=\"/addtolist?uri={uri}\">Add to playlist</a> \
                         <a href=\"/addtolist?uri={uri}&next=1\">and next</a>]",
                        uri = track.uri
                    ));
                }
            }
        }
        NowPlaying::Nothing => page.push_str("<br>Nothing playing"),
        NowPlaying::QueryFailed => page.push_str("<br>Error in retrieving now playing!"),
    }

    page.push_str("</body></html>");
    Html(page).into_response()
}

/// Page shown to anonymous visitors; also the response body for requests
/// that need a session and have none.
pub fn login_page() -> String {
    "<!DOCTYPE html><html><head><title>Song Basket</title></head>\
     <body>[<a href='/login'>Login</a>]</body></html>"
        .to_string()
}
