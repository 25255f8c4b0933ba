use serde::{Deserialize, Serialize};

/// Refresh this long before the access token actually expires.
pub const REFRESH_MARGIN_SECS: u64 = 240;

/// Schema version written into persisted credentials. Bump on layout changes;
/// stored credentials with another version are ignored and the user logs in
/// again.
pub const CREDENTIAL_SCHEMA_VERSION: u32 = 1;

/// OAuth access/refresh token pair for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Credential {
    /// Remaining lifetime is below the refresh margin.
    pub fn is_expiring(&self) -> bool {
        let now = chrono::Utc::now().timestamp() as u64;
        now + REFRESH_MARGIN_SECS >= self.obtained_at + self.expires_in
    }
}

/// On-disk envelope for a persisted [`Credential`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    pub schema_version: u32,
    pub credential: Credential,
}

/// A login that has been started but whose callback has not arrived yet.
#[derive(Debug, Clone)]
pub struct PendingAuthorization {
    pub scope: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}

impl User {
    pub fn display(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: TracksSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksSummary {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlaylistsResponse {
    pub items: Vec<Playlist>,
}

/// One page of playlist membership, offset-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsPage {
    pub items: Vec<PlaylistEntry>,
    pub total: u64,
}

/// A playlist entry. `track` is absent for entries the service cannot
/// resolve anymore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub track: Option<Track>,
}

/// `id` is absent for local files; membership is keyed on `uri`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentlyPlaying {
    pub item: Option<Track>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddItemsRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveItemsRequest {
    pub tracks: Vec<RemoveItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveItem {
    pub uri: String,
}

/// Momentary playback state, derived per request and never stored.
#[derive(Debug, Clone)]
pub enum NowPlaying {
    Nothing,
    Playing(Track),
    QueryFailed,
}
