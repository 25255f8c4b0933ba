use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::spotify::ApiError;

/// Request-level errors, mapped to responses at the handler boundary.
///
/// Display errors during read-only rendering are degraded inline by the
/// handlers and never reach this type; what ends up here either ends the
/// request (auth, refresh) or aborts a mutation before local state changed.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No session cookie, or the session no longer maps to a credential.
    #[error("Not logged in")]
    AuthenticationRequired,

    /// Callback state was unknown, already consumed, or forged.
    #[error("Invalid state!")]
    InvalidAuthorizationState,

    /// Refresh call failed; the request must not continue on a stale token.
    #[error("Credential refresh failed: {0}")]
    CredentialRefresh(String),

    /// A music-service call failed during an operation that cannot degrade.
    #[error("Music service error: {0}")]
    ExternalService(#[from] ApiError),

    /// Add/remove attempted with no active playlist selection.
    #[error("No playlist selected")]
    NoPlaylistSelected,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthenticationRequired => Html(crate::api::login_page()).into_response(),
            Self::InvalidAuthorizationState => {
                (StatusCode::BAD_REQUEST, "Invalid state!").into_response()
            }
            Self::CredentialRefresh(_) | Self::ExternalService(_) => {
                (StatusCode::BAD_GATEWAY, self.to_string()).into_response()
            }
            Self::NoPlaylistSelected => (
                StatusCode::BAD_REQUEST,
                Html("No playlist selected. [<a href='/playlists'>Choose one</a>]".to_string()),
            )
                .into_response(),
        }
    }
}
