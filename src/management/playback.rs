use crate::{spotify::MusicApi, types::NowPlaying, warning};

/// Queries current playback and folds transport failures into a snapshot the
/// page can render, so a flaky player query degrades one widget instead of
/// failing the whole response.
pub async fn classify<M: MusicApi>(api: &M, token: &str) -> NowPlaying {
    match api.currently_playing(token).await {
        Ok(Some(track)) => NowPlaying::Playing(track),
        Ok(None) => NowPlaying::Nothing,
        Err(e) => {
            warning!("Now-playing query failed: {}", e);
            NowPlaying::QueryFailed
        }
    }
}
