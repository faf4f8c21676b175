//! Last known signed-in identities, persisted for optimistic restoration.
//!
//! Snapshots are keyed by user id, so each caller only ever sees and clears
//! its own. They are never authoritative; the session check overwrites them.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::sync::Mutex;

use super::CurrentUser;

type Snapshots = BTreeMap<String, CurrentUser>;

/// File-backed snapshots of signed-in users, one per user id.
#[derive(Debug)]
pub struct SessionCache {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl SessionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Read all snapshots. A missing file is empty; a corrupt one is removed.
    async fn read(&self) -> Snapshots {
        let Ok(raw) = tokio::fs::read_to_string(&self.path).await else {
            return Snapshots::new();
        };
        match serde_json::from_str(&raw) {
            Ok(snapshots) => snapshots,
            Err(e) => {
                tracing::warn!("Discarding unreadable session cache {:?}: {}", self.path, e);
                self.remove_file().await;
                Snapshots::new()
            }
        }
    }

    async fn write(&self, snapshots: &Snapshots) -> std::io::Result<()> {
        if snapshots.is_empty() {
            self.remove_file().await;
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string(snapshots)?;
        tokio::fs::write(&self.path, raw).await
    }

    async fn remove_file(&self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to clear session cache {:?}: {}", self.path, e);
            }
        }
    }

    /// Snapshot for `user_id`, if one was stored.
    pub async fn load(&self, user_id: &str) -> Option<CurrentUser> {
        let _guard = self.lock.lock().await;
        let user = self.read().await.remove(user_id)?;
        tracing::debug!("Restored cached session for {}", user.id);
        Some(user)
    }

    /// Replace the snapshot of `user`.
    pub async fn store(&self, user: &CurrentUser) -> std::io::Result<()> {
        let _guard = self.lock.lock().await;
        let mut snapshots = self.read().await;
        snapshots.insert(user.id.clone(), user.clone());
        self.write(&snapshots).await
    }

    /// Drop the snapshot for `user_id`.
    pub async fn clear(&self, user_id: &str) {
        let _guard = self.lock.lock().await;
        let mut snapshots = self.read().await;
        if snapshots.remove(user_id).is_none() {
            return;
        }
        if let Err(e) = self.write(&snapshots).await {
            tracing::warn!("Failed to clear cached session for {}: {}", user_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn user(id: &str) -> CurrentUser {
        CurrentUser {
            id: id.to_string(),
            email: Some(format!("{}@example.com", id)),
            display_name: None,
        }
    }

    #[tokio::test]
    async fn test_store_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("session.json");
        let cache = SessionCache::new(&path);
        assert!(cache.load("uid-1").await.is_none());

        cache.store(&user("uid-1")).await.unwrap();
        assert_eq!(cache.load("uid-1").await, Some(user("uid-1")));

        cache.clear("uid-1").await;
        assert!(cache.load("uid-1").await.is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_snapshots_are_kept_per_user() {
        let temp_dir = TempDir::new().unwrap();
        let cache = SessionCache::new(temp_dir.path().join("session.json"));

        cache.store(&user("alice")).await.unwrap();
        assert!(cache.load("bob").await.is_none());

        cache.store(&user("bob")).await.unwrap();
        cache.clear("bob").await;
        assert!(cache.load("bob").await.is_none());
        assert_eq!(cache.load("alice").await, Some(user("alice")));
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let cache = SessionCache::new(&path);
        assert!(cache.load("uid-1").await.is_none());
        assert!(!path.exists());
    }
}
