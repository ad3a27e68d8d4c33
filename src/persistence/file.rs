//! JSON file store for local-only use.
//!
//! The whole document is read, modified and written back on every call.
//! A lock serialises those cycles so concurrent mirror writes cannot lose
//! each other's updates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use super::{PersistenceAdapter, UserRecords};
use crate::auth::UserId;
use crate::error::PersistenceError;
use crate::history::{HistoryEntry, LOCAL_HISTORY_LIMIT};
use crate::settings::Settings;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Document {
    users: BTreeMap<UserId, UserRecords>,
}

/// Stores records in a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    history_limit: usize,
    lock: Mutex<()>,
}

impl FileStore {
    /// A store at `path` keeping the local history limit.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_history_limit(path, LOCAL_HISTORY_LIMIT)
    }

    pub fn with_history_limit(path: impl Into<PathBuf>, history_limit: usize) -> Self {
        Self {
            path: path.into(),
            history_limit,
            lock: Mutex::new(()),
        }
    }

    /// Default location under the user's data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("calculogic").join("store.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Document, PersistenceError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Document::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Document::default()),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, document: &Document) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), "store saved");
        Ok(())
    }

    async fn read<T: Send>(
        &self,
        user: &UserId,
        f: impl FnOnce(Option<&UserRecords>) -> T + Send,
    ) -> Result<T, PersistenceError> {
        let _guard = self.lock.lock().await;
        let document = self.load().await?;
        Ok(f(document.users.get(user)))
    }

    async fn modify<T: Send>(
        &self,
        user: &UserId,
        f: impl FnOnce(&mut UserRecords) -> T + Send,
    ) -> Result<T, PersistenceError> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let value = f(document.users.entry(user.clone()).or_default());
        self.save(&document).await?;
        Ok(value)
    }
}

#[async_trait]
impl PersistenceAdapter for FileStore {
    async fn get_history(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        self.read(user, |records| records.map(|r| r.history(limit)).unwrap_or_default())
            .await
    }

    async fn append_history(
        &self,
        user: &UserId,
        entry: &HistoryEntry,
    ) -> Result<HistoryEntry, PersistenceError> {
        let keep = self.history_limit;
        self.modify(user, |records| records.append(entry, Some(keep)))
            .await
    }

    async fn clear_history(&self, user: &UserId) -> Result<bool, PersistenceError> {
        self.modify(user, |records| records.history.clear()).await?;
        Ok(true)
    }

    async fn get_memory(&self, user: &UserId) -> Result<f64, PersistenceError> {
        self.read(user, |records| records.and_then(|r| r.memory).unwrap_or(0.0))
            .await
    }

    async fn set_memory(&self, user: &UserId, value: f64) -> Result<bool, PersistenceError> {
        self.modify(user, |records| records.memory = Some(value)).await?;
        Ok(true)
    }

    async fn get_settings(&self, user: &UserId) -> Result<Option<Settings>, PersistenceError> {
        self.read(user, |records| records.and_then(|r| r.settings)).await
    }

    async fn set_settings(
        &self,
        user: &UserId,
        settings: &Settings,
    ) -> Result<bool, PersistenceError> {
        let settings = *settings;
        self.modify(user, |records| records.settings = Some(settings))
            .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::AngleUnit;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("nested").join("store.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let user = UserId::from("local");

        assert!(store.get_history(&user, 10).await.unwrap().is_empty());
        assert_eq!(store.get_memory(&user).await.unwrap(), 0.0);
        assert_eq!(store.get_settings(&user).await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let user = UserId::from("local");

        {
            let store = store_in(&dir);
            store
                .append_history(&user, &HistoryEntry::new("7 + 3 = 10", 10.0))
                .await
                .unwrap();
            store.set_memory(&user, 5.0).await.unwrap();
            store
                .set_settings(
                    &user,
                    &Settings {
                        scientific_mode: true,
                        angle_unit: AngleUnit::Radians,
                        dark_mode: false,
                    },
                )
                .await
                .unwrap();
        }

        let store = store_in(&dir);
        let history = store.get_history(&user, 10).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].calculation(), "7 + 3 = 10");
        assert_eq!(history[0].result(), 10.0);
        assert_eq!(store.get_memory(&user).await.unwrap(), 5.0);
        let settings = store.get_settings(&user).await.unwrap().unwrap();
        assert!(settings.scientific_mode);
        assert_eq!(settings.angle_unit, AngleUnit::Radians);
    }

    #[tokio::test]
    async fn test_history_capped_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let user = UserId::from("local");

        for i in 0..12 {
            store
                .append_history(&user, &HistoryEntry::new(format!("entry {i}"), f64::from(i)))
                .await
                .unwrap();
        }

        let history = store.get_history(&user, 100).await.unwrap();
        assert_eq!(history.len(), LOCAL_HISTORY_LIMIT);
        assert_eq!(history[0].calculation(), "entry 11");
    }

    #[tokio::test]
    async fn test_clear_history_keeps_memory() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let user = UserId::from("local");

        store
            .append_history(&user, &HistoryEntry::new("1 + 1 = 2", 2.0))
            .await
            .unwrap();
        store.set_memory(&user, 3.0).await.unwrap();
        store.clear_history(&user).await.unwrap();

        assert!(store.get_history(&user, 10).await.unwrap().is_empty());
        assert_eq!(store.get_memory(&user).await.unwrap(), 3.0);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, b"{not json").unwrap();

        let store = FileStore::new(&path);
        let result = store.get_memory(&UserId::from("local")).await;
        assert!(matches!(result, Err(PersistenceError::Serialization(_))));
    }
}
