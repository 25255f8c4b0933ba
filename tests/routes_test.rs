mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use songbasket::{
    server::{self, AppState},
    utils,
};
use tower::ServiceExt;

use common::{FakeService, track};

// Helper function for a unique per-test storage directory
fn temp_dir(tag: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "songbasket-routes-{}-{}-{}",
        tag,
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    path
}

// Helper function to build a router over a fake service
fn test_app(service: FakeService, tag: &str) -> Router {
    let state = Arc::new(AppState::with_parts(
        service,
        temp_dir(tag),
        utils::derive_cookie_key("router-test-secret"),
    ));
    server::router(state)
}

// Helper function to GET a path, optionally with a session cookie
async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> axum::response::Response {
    let mut req = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(req.body(Body::empty()).unwrap())
        .await
        .expect("request")
}

// Helper function to read a response body as text
async fn body_text(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

// Helper function to run /login and /callback and hand back the session
// cookie pair the browser would replay
async fn log_in(app: &Router) -> String {
    let resp = get(app, "/login", None).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = resp
        .headers()
        .get(header::LOCATION)
        .expect("consent redirect")
        .to_str()
        .expect("location header")
        .to_string();
    let state = location.rsplit("state=").next().expect("state param");

    let resp = get(app, &format!("/callback?code=code-1&state={state}"), None).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers()[header::LOCATION], "/");

    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .expect("cookie header");
    assert!(set_cookie.starts_with("songbasket_session="));

    // The name=value pair, without the cookie attributes
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_anonymous_home_shows_login_page() {
    let app = test_app(FakeService::new(), "anon-home");

    let resp = get(&app, "/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    assert!(body.contains("<a href='/login'>Login</a>"));
}

#[tokio::test]
async fn test_callback_with_unknown_state_is_rejected() {
    let app = test_app(FakeService::new(), "bad-state");

    let resp = get(&app, "/callback?code=code-1&state=bogus", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(resp).await, "Invalid state!");
}

#[tokio::test]
async fn test_callback_without_parameters_is_rejected() {
    let app = test_app(FakeService::new(), "no-params");

    let resp = get(&app, "/callback", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(resp).await, "Invalid state!");
}

#[tokio::test]
async fn test_callback_sets_session_and_home_renders() {
    let app = test_app(FakeService::new(), "session");

    let cookie = log_in(&app).await;

    // The session cookie alone is enough to render the logged-in page
    let resp = get(&app, "/", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    assert!(body.contains("Test User"));
    assert!(body.contains("Nothing playing"));
    assert!(body.contains("No playlist"));
}

#[tokio::test]
async fn test_affordance_follows_membership() {
    let service = FakeService::new()
        .with_playlist("pl-1", "Basket", vec![track("uri-1")])
        .with_now_playing(track("uri-2"));
    let app = test_app(service, "affordance");

    let cookie = log_in(&app).await;

    let resp = get(&app, "/setplaylist?id=pl-1", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    // The playing track is not in the basket, so the page offers Add
    let body = body_text(get(&app, "/", Some(&cookie)).await).await;
    assert!(body.contains("Basket"));
    assert!(body.contains("/addtolist?uri=uri-2"));

    let resp = get(&app, "/addtolist?uri=uri-2", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    // Now it is a member, so the page flips to Remove
    let body = body_text(get(&app, "/", Some(&cookie)).await).await;
    assert!(body.contains("in playlist"));
    assert!(body.contains("/rmfromlist?uri=uri-2"));
}

#[tokio::test]
async fn test_mutation_routes_require_a_session() {
    let app = test_app(FakeService::new(), "anon-mutation");

    // Without a session the mutation routes answer with the login page
    let resp = get(&app, "/addtolist?uri=uri-1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("<a href='/login'>Login</a>"));
}

#[tokio::test]
async fn test_logout_clears_the_session() {
    let app = test_app(FakeService::new(), "logout");

    let cookie = log_in(&app).await;

    let resp = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let removal = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("removal cookie")
        .to_str()
        .unwrap();
    assert!(removal.starts_with("songbasket_session="));
    assert!(removal.contains("Max-Age=0"));

    // The credential is gone, so the old cookie no longer opens a session
    let body = body_text(get(&app, "/", Some(&cookie)).await).await;
    assert!(body.contains("<a href='/login'>Login</a>"));
}

#[tokio::test]
async fn test_health_reports_name_and_version() {
    let app = test_app(FakeService::new(), "health");

    let resp = get(&app, "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    let json: serde_json::Value = serde_json::from_str(&body).expect("parse JSON");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["name"], "songbasket");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
