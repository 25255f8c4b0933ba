use std::{collections::HashMap, path::PathBuf};

use tokio::sync::Mutex;

use crate::{
    error::AppError,
    spotify::AuthApi,
    types::{CREDENTIAL_SCHEMA_VERSION, Credential, StoredCredential},
    warning,
};

/// One credential per user, kept in memory and mirrored to disk as one JSON
/// document per user id so logins survive a restart.
pub struct CredentialStore {
    credentials: Mutex<HashMap<String, Credential>>,
    storage_dir: PathBuf,
}

impl CredentialStore {
    pub fn new(storage_dir: PathBuf) -> Self {
        CredentialStore {
            credentials: Mutex::new(HashMap::new()),
            storage_dir,
        }
    }

    pub fn default_dir() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("songbasket/credentials");
        path
    }

    pub async fn get(&self, user_id: &str) -> Option<Credential> {
        let mut credentials = self.credentials.lock().await;
        self.cached_or_loaded(&mut credentials, user_id).await
    }

    pub async fn put(&self, user_id: &str, credential: Credential) {
        self.credentials
            .lock()
            .await
            .insert(user_id.to_string(), credential.clone());
        if let Err(e) = self.persist(user_id, &credential).await {
            warning!("Failed to persist credential for {}: {}", user_id, e);
        }
    }

    pub async fn remove(&self, user_id: &str) {
        self.credentials.lock().await.remove(user_id);
        let _ = async_fs::remove_file(self.path_for(user_id)).await;
    }

    /// Looks up the user's credential, refreshing it first when its
    /// remaining lifetime is below the margin. A failed refresh aborts the
    /// request instead of handing back a stale token.
    ///
    /// The lock is held across the refresh call so overlapping requests for
    /// the same user cannot trigger a second refresh.
    pub async fn resolve_valid<A: AuthApi>(
        &self,
        auth: &A,
        user_id: &str,
    ) -> Result<Option<Credential>, AppError> {
        let mut credentials = self.credentials.lock().await;
        let Some(current) = self.cached_or_loaded(&mut credentials, user_id).await else {
            return Ok(None);
        };

        if !current.is_expiring() {
            return Ok(Some(current));
        }

        let refreshed = auth
            .refresh(&current.refresh_token)
            .await
            .map_err(|e| AppError::CredentialRefresh(e.to_string()))?;
        credentials.insert(user_id.to_string(), refreshed.clone());
        drop(credentials);

        if let Err(e) = self.persist(user_id, &refreshed).await {
            warning!("Failed to persist refreshed credential for {}: {}", user_id, e);
        }

        Ok(Some(refreshed))
    }

    async fn cached_or_loaded(
        &self,
        credentials: &mut HashMap<String, Credential>,
        user_id: &str,
    ) -> Option<Credential> {
        if let Some(credential) = credentials.get(user_id) {
            return Some(credential.clone());
        }
        let loaded = self.load(user_id).await?;
        credentials.insert(user_id.to_string(), loaded.clone());
        Some(loaded)
    }

    async fn persist(&self, user_id: &str, credential: &Credential) -> Result<(), String> {
        async_fs::create_dir_all(&self.storage_dir)
            .await
            .map_err(|e| e.to_string())?;

        let stored = StoredCredential {
            schema_version: CREDENTIAL_SCHEMA_VERSION,
            credential: credential.clone(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|e| e.to_string())?;
        async_fs::write(self.path_for(user_id), json)
            .await
            .map_err(|e| e.to_string())
    }

    async fn load(&self, user_id: &str) -> Option<Credential> {
        let content = async_fs::read_to_string(self.path_for(user_id)).await.ok()?;
        let stored: StoredCredential = serde_json::from_str(&content).ok()?;
        if stored.schema_version != CREDENTIAL_SCHEMA_VERSION {
            warning!(
                "Ignoring stored credential for {} with schema version {}",
                user_id,
                stored.schema_version
            );
            return None;
        }
        Some(stored.credential)
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        self.storage_dir.join(format!("{user_id}.json"))
    }
}
