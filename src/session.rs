//! Session context: the stored token and the authenticated flag derived from it
//!
//! The token is kept in a small JSON key/value file. Its presence under
//! [`TOKEN_KEY`] is the only client-side signal of being signed in. The flag is
//! published on a watch channel; `refresh_from_storage` re-reads the file so a
//! sign in or sign out made by another client process is picked up.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::sync::{Mutex, watch};

pub const TOKEN_KEY: &str = "token";

/// String key/value store persisted as a JSON object
#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl LocalStorage {
    /// A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = read_entries(&path)?;
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    /// Pick up writes made by someone else
    pub fn reload(&mut self) -> Result<()> {
        self.entries = read_entries(&self.path)?;
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let entries = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(entries)
}

/// Single source of truth for "is the user signed in"
pub struct Session {
    storage: Mutex<LocalStorage>,
    authenticated: watch::Sender<bool>,
}

impl Session {
    pub fn new(storage: LocalStorage) -> Self {
        let has_token = storage.get(TOKEN_KEY).is_some();
        let (authenticated, _) = watch::channel(has_token);
        Self {
            storage: Mutex::new(storage),
            authenticated,
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.storage.lock().await.get(TOKEN_KEY).map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    pub async fn sign_in(&self, token: &str) -> Result<()> {
        self.storage.lock().await.set(TOKEN_KEY, token)?;
        self.publish(true);
        tracing::info!("Session token stored");
        Ok(())
    }

    pub async fn sign_out(&self) -> Result<()> {
        let result = self.storage.lock().await.remove(TOKEN_KEY);
        // The in-memory token is gone even if the file write failed
        self.publish(false);
        tracing::info!("Session token cleared");
        result
    }

    /// Re-read storage and publish the flag if it changed. Returns whether it did.
    pub async fn refresh_from_storage(&self) -> Result<bool> {
        let mut storage = self.storage.lock().await;
        storage.reload()?;
        let has_token = storage.get(TOKEN_KEY).is_some();
        drop(storage);

        let changed = self.publish(has_token);
        if changed {
            tracing::info!(authenticated = has_token, "Session changed in storage");
        }
        Ok(changed)
    }

    fn publish(&self, authenticated: bool) -> bool {
        self.authenticated.send_if_modified(|current| {
            if *current == authenticated {
                false
            } else {
                *current = authenticated;
                true
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_in(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::open(dir.path().join("nested").join("storage.json")).unwrap()
    }

    #[test]
    fn storage_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = storage_in(&dir);
        assert_eq!(storage.get(TOKEN_KEY), None);
        storage.set(TOKEN_KEY, "abc").unwrap();

        let reopened = LocalStorage::open(storage.path().to_path_buf()).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY), Some("abc"));
    }

    #[tokio::test]
    async fn flag_is_seeded_from_token_presence() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = storage_in(&dir);
        assert!(!Session::new(LocalStorage::open(storage.path().to_path_buf()).unwrap()).is_authenticated());

        storage.set(TOKEN_KEY, "abc").unwrap();
        let session = Session::new(storage);
        assert!(session.is_authenticated());
        assert_eq!(session.token().await.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn sign_in_and_out_notify_subscribers() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(storage_in(&dir));
        let mut rx = session.subscribe();

        session.sign_in("tok").await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());

        session.sign_out().await.unwrap();
        assert!(!*rx.borrow_and_update());
        assert_eq!(session.token().await, None);
    }

    #[tokio::test]
    async fn external_logout_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = storage_in(&dir);
        storage.set(TOKEN_KEY, "abc").unwrap();
        let path = storage.path().to_path_buf();
        let session = Session::new(storage);
        let mut rx = session.subscribe();

        assert!(!session.refresh_from_storage().await.unwrap());
        assert!(!rx.has_changed().unwrap());

        // Another process signs out
        let mut other = LocalStorage::open(path).unwrap();
        other.remove(TOKEN_KEY).unwrap();

        assert!(session.refresh_from_storage().await.unwrap());
        assert!(rx.has_changed().unwrap());
        assert!(!session.is_authenticated());
        assert_eq!(session.token().await, None);
    }
}
