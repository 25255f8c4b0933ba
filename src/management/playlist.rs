use std::collections::{HashMap, HashSet};

use tokio::sync::Mutex;

use crate::{error::AppError, spotify::MusicApi, warning};

/// Page size for membership fetches during selection.
pub const PAGE_SIZE: u64 = 100;

/// Local mirror of one playlist's membership. The URI set matches the true
/// remote membership as long as this app is the only writer; external edits
/// are only picked up by the next selection.
#[derive(Debug, Clone)]
pub struct PlaylistCache {
    pub playlist_id: String,
    pub name: String,
    pub track_uris: HashSet<String>,
}

/// Playlist selections keyed by user id. Mutations hold the store lock
/// across the remote call, which serializes overlapping add/remove requests
/// and keeps the all-or-nothing rule intact under concurrency.
pub struct PlaylistCacheStore {
    caches: Mutex<HashMap<String, PlaylistCache>>,
}

impl PlaylistCacheStore {
    pub fn new() -> Self {
        PlaylistCacheStore {
            caches: Mutex::new(HashMap::new()),
        }
    }

    /// Replaces the user's selection with a freshly fetched membership set,
    /// walking every page up to the playlist's declared total. Tracks that
    /// physically occur more than once collapse into one set entry; the
    /// occurrence count is logged as a diagnostic.
    pub async fn select<M: MusicApi>(
        &self,
        api: &M,
        token: &str,
        user_id: &str,
        playlist_id: &str,
    ) -> Result<PlaylistCache, AppError> {
        let playlist = api.get_playlist(token, playlist_id).await?;

        let mut track_uris = HashSet::new();
        let mut occurrences: HashMap<String, u32> = HashMap::new();
        let mut offset = 0;
        while offset < playlist.tracks.total {
            let page = api
                .playlist_items(token, &playlist.id, offset, PAGE_SIZE)
                .await?;
            for entry in page.items {
                let Some(track) = entry.track else { continue };
                track_uris.insert(track.uri);
                if let Some(id) = track.id {
                    *occurrences.entry(id).or_insert(0) += 1;
                }
            }
            offset += PAGE_SIZE;
        }

        for (id, count) in &occurrences {
            if *count > 1 {
                warning!(
                    "Duplicate track {} in playlist {} ({} occurrences)",
                    id,
                    playlist.name,
                    count
                );
            }
        }

        let cache = PlaylistCache {
            playlist_id: playlist.id,
            name: playlist.name,
            track_uris,
        };
        self.caches
            .lock()
            .await
            .insert(user_id.to_string(), cache.clone());
        Ok(cache)
    }

    /// The user's current selection, if any.
    pub async fn snapshot(&self, user_id: &str) -> Option<PlaylistCache> {
        self.caches.lock().await.get(user_id).cloned()
    }

    pub async fn contains(&self, user_id: &str, uri: &str) -> bool {
        self.caches
            .lock()
            .await
            .get(user_id)
            .is_some_and(|cache| cache.track_uris.contains(uri))
    }

    /// Adds a track to the selected playlist, remote first. The set is only
    /// updated once the remote call succeeded.
    pub async fn add<M: MusicApi>(
        &self,
        api: &M,
        token: &str,
        user_id: &str,
        uri: &str,
    ) -> Result<(), AppError> {
        let mut caches = self.caches.lock().await;
        let cache = caches.get_mut(user_id).ok_or(AppError::NoPlaylistSelected)?;

        api.add_item(token, &cache.playlist_id, uri).await?;
        cache.track_uris.insert(uri.to_string());
        Ok(())
    }

    /// Removes a track from the selected playlist under the same
    /// all-or-nothing rule as [`Self::add`].
    pub async fn remove<M: MusicApi>(
        &self,
        api: &M,
        token: &str,
        user_id: &str,
        uri: &str,
    ) -> Result<(), AppError> {
        let mut caches = self.caches.lock().await;
        let cache = caches.get_mut(user_id).ok_or(AppError::NoPlaylistSelected)?;

        api.remove_item(token, &cache.playlist_id, uri).await?;
        cache.track_uris.remove(uri);
        Ok(())
    }

    /// Drops the user's selection (logout).
    pub async fn clear(&self, user_id: &str) {
        self.caches.lock().await.remove(user_id);
    }
}

impl Default for PlaylistCacheStore {
    fn default() -> Self {
        Self::new()
    }
}
