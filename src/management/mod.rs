//! Process-wide shared state: per-user credentials, in-flight
//! authorizations, and playlist membership caches. Each store guards its map
//! with an async mutex so overlapping requests cannot race a refresh or a
//! playlist mutation.

mod credentials;
mod pending;
mod playback;
mod playlist;

pub use credentials::CredentialStore;
pub use pending::PENDING_TTL_SECS;
pub use pending::PendingAuthTracker;
pub use playback::classify;
pub use playlist::PAGE_SIZE;
pub use playlist::PlaylistCache;
pub use playlist::PlaylistCacheStore;
