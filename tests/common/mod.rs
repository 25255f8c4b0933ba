#![allow(dead_code)]

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use chrono::Utc;
use songbasket::{
    spotify::{ApiError, AuthApi, MusicApi},
    types::{
        Credential, Playlist, PlaylistEntry, PlaylistItemsPage, Track, TracksSummary, User,
    },
};

// Helper function to create a non-expired credential
pub fn fresh_credential(access_token: &str) -> Credential {
    Credential {
        access_token: access_token.to_string(),
        refresh_token: format!("refresh-{}", access_token),
        scope: "playlist-read-private".to_string(),
        expires_in: 3600,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

// Helper function to create a credential inside the refresh margin
pub fn expiring_credential(access_token: &str) -> Credential {
    Credential {
        access_token: access_token.to_string(),
        refresh_token: format!("refresh-{}", access_token),
        scope: "playlist-read-private".to_string(),
        expires_in: 3600,
        // 100 seconds of lifetime left, well under the refresh margin
        obtained_at: Utc::now().timestamp() as u64 - 3500,
    }
}

// Helper function to create a test track
pub fn track(uri: &str) -> Track {
    Track {
        id: Some(format!("id-{}", uri)),
        name: format!("name-{}", uri),
        uri: uri.to_string(),
    }
}

/// Playlist held by the fake service.
pub struct FakePlaylist {
    pub id: String,
    pub name: String,
    pub tracks: Vec<Track>,
}

/// In-memory stand-in for the real Spotify client. Records how it was called
/// so tests can assert on refresh, exchange, paging, and skip behavior, and
/// can be told to fail individual operations.
pub struct FakeService {
    pub user: User,
    pub playlist: Mutex<Option<FakePlaylist>>,
    pub now_playing: Mutex<Option<Track>>,

    pub exchange_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub skips: AtomicUsize,
    pub item_fetches: Mutex<Vec<u64>>,

    pub fail_refresh: bool,
    pub fail_add: bool,
    pub fail_remove: bool,
    pub fail_now_playing: bool,
}

impl FakeService {
    pub fn new() -> Self {
        FakeService {
            user: User {
                id: "user-1".to_string(),
                display_name: Some("Test User".to_string()),
            },
            playlist: Mutex::new(None),
            now_playing: Mutex::new(None),
            exchange_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            skips: AtomicUsize::new(0),
            item_fetches: Mutex::new(Vec::new()),
            fail_refresh: false,
            fail_add: false,
            fail_remove: false,
            fail_now_playing: false,
        }
    }

    pub fn with_playlist(self, id: &str, name: &str, tracks: Vec<Track>) -> Self {
        *self.playlist.lock().unwrap() = Some(FakePlaylist {
            id: id.to_string(),
            name: name.to_string(),
            tracks,
        });
        self
    }

    pub fn with_now_playing(self, t: Track) -> Self {
        *self.now_playing.lock().unwrap() = Some(t);
        self
    }

    pub fn playlist_uris(&self) -> Vec<String> {
        self.playlist
            .lock()
            .unwrap()
            .as_ref()
            .map(|p| p.tracks.iter().map(|t| t.uri.clone()).collect())
            .unwrap_or_default()
    }
}

impl AuthApi for FakeService {
    fn authorization_url(&self, scope: &str, state: &str) -> String {
        format!("https://auth.example/authorize?scope={scope}&state={state}")
    }

    async fn exchange_code(&self, code: &str) -> Result<Credential, ApiError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        Ok(fresh_credential(&format!("access-{}", code)))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Credential, ApiError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_refresh {
            return Err(ApiError::Unexpected("refresh rejected".to_string()));
        }
        Ok(fresh_credential(&format!("refreshed-{}", refresh_token)))
    }
}

impl MusicApi for FakeService {
    async fn current_user(&self, _token: &str) -> Result<User, ApiError> {
        Ok(self.user.clone())
    }

    async fn list_playlists(&self, _token: &str, _user_id: &str) -> Result<Vec<Playlist>, ApiError> {
        Ok(self
            .playlist
            .lock()
            .unwrap()
            .as_ref()
            .map(|p| {
                vec![Playlist {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    tracks: TracksSummary {
                        total: p.tracks.len() as u64,
                    },
                }]
            })
            .unwrap_or_default())
    }

    async fn get_playlist(&self, _token: &str, playlist_id: &str) -> Result<Playlist, ApiError> {
        let playlist = self.playlist.lock().unwrap();
        match playlist.as_ref() {
            Some(p) if p.id == playlist_id => Ok(Playlist {
                id: p.id.clone(),
                name: p.name.clone(),
                tracks: TracksSummary {
                    total: p.tracks.len() as u64,
                },
            }),
            _ => Err(ApiError::Unexpected(format!(
                "no such playlist: {playlist_id}"
            ))),
        }
    }

    async fn playlist_items(
        &self,
        _token: &str,
        playlist_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<PlaylistItemsPage, ApiError> {
        self.item_fetches.lock().unwrap().push(offset);

        let playlist = self.playlist.lock().unwrap();
        let Some(p) = playlist.as_ref().filter(|p| p.id == playlist_id) else {
            return Err(ApiError::Unexpected(format!(
                "no such playlist: {playlist_id}"
            )));
        };

        let total = p.tracks.len() as u64;
        let end = (offset + limit).min(total) as usize;
        let items = p.tracks[offset as usize..end]
            .iter()
            .map(|t| PlaylistEntry {
                track: Some(t.clone()),
            })
            .collect();
        Ok(PlaylistItemsPage { items, total })
    }

    async fn add_item(&self, _token: &str, playlist_id: &str, uri: &str) -> Result<(), ApiError> {
        if self.fail_add {
            return Err(ApiError::Unexpected("add rejected".to_string()));
        }
        let mut playlist = self.playlist.lock().unwrap();
        match playlist.as_mut().filter(|p| p.id == playlist_id) {
            Some(p) => {
                p.tracks.push(track(uri));
                Ok(())
            }
            None => Err(ApiError::Unexpected(format!(
                "no such playlist: {playlist_id}"
            ))),
        }
    }

    async fn remove_item(&self, _token: &str, playlist_id: &str, uri: &str) -> Result<(), ApiError> {
        if self.fail_remove {
            return Err(ApiError::Unexpected("remove rejected".to_string()));
        }
        let mut playlist = self.playlist.lock().unwrap();
        match playlist.as_mut().filter(|p| p.id == playlist_id) {
            Some(p) => {
                p.tracks.retain(|t| t.uri != uri);
                Ok(())
            }
            None => Err(ApiError::Unexpected(format!(
                "no such playlist: {playlist_id}"
            ))),
        }
    }

    async fn currently_playing(&self, _token: &str) -> Result<Option<Track>, ApiError> {
        if self.fail_now_playing {
            return Err(ApiError::Unexpected("player unavailable".to_string()));
        }
        Ok(self.now_playing.lock().unwrap().clone())
    }

    async fn skip_to_next(&self, _token: &str) -> Result<(), ApiError> {
        self.skips.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
