//! Process-local record store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::{PersistenceAdapter, UserRecords};
use crate::auth::UserId;
use crate::error::PersistenceError;
use crate::history::HistoryEntry;
use crate::settings::Settings;

/// Keeps every user's records in memory. Unbounded history.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: Mutex<HashMap<UserId, UserRecords>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of history records stored for `user`.
    pub async fn history_len(&self, user: &UserId) -> usize {
        self.users
            .lock()
            .await
            .get(user)
            .map_or(0, |records| records.history.len())
    }
}

#[async_trait]
impl PersistenceAdapter for InMemoryStore {
    async fn get_history(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        let users = self.users.lock().await;
        Ok(users
            .get(user)
            .map(|records| records.history(limit))
            .unwrap_or_default())
    }

    async fn append_history(
        &self,
        user: &UserId,
        entry: &HistoryEntry,
    ) -> Result<HistoryEntry, PersistenceError> {
        let mut users = self.users.lock().await;
        Ok(users
            .entry(user.clone())
            .or_default()
            .append(entry, None))
    }

    async fn clear_history(&self, user: &UserId) -> Result<bool, PersistenceError> {
        if let Some(records) = self.users.lock().await.get_mut(user) {
            records.history.clear();
        }
        Ok(true)
    }

    async fn get_memory(&self, user: &UserId) -> Result<f64, PersistenceError> {
        let users = self.users.lock().await;
        Ok(users
            .get(user)
            .and_then(|records| records.memory)
            .unwrap_or(0.0))
    }

    async fn set_memory(&self, user: &UserId, value: f64) -> Result<bool, PersistenceError> {
        self.users.lock().await.entry(user.clone()).or_default().memory = Some(value);
        Ok(true)
    }

    async fn get_settings(&self, user: &UserId) -> Result<Option<Settings>, PersistenceError> {
        let users = self.users.lock().await;
        Ok(users.get(user).and_then(|records| records.settings))
    }

    async fn set_settings(
        &self,
        user: &UserId,
        settings: &Settings,
    ) -> Result<bool, PersistenceError> {
        self.users.lock().await.entry(user.clone()).or_default().settings = Some(*settings);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::AngleUnit;

    #[tokio::test]
    async fn test_history_is_per_user_and_newest_first() {
        let store = InMemoryStore::new();
        let alice = UserId::from("alice");
        let bob = UserId::from("bob");

        store
            .append_history(&alice, &HistoryEntry::new("1 + 1 = 2", 2.0))
            .await
            .unwrap();
        store
            .append_history(&alice, &HistoryEntry::new("2 + 2 = 4", 4.0))
            .await
            .unwrap();
        store
            .append_history(&bob, &HistoryEntry::new("3 + 3 = 6", 6.0))
            .await
            .unwrap();

        let history = store.get_history(&alice, 10).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].calculation(), "2 + 2 = 4");
        assert_eq!(history[0].id(), Some("2"));

        assert_eq!(store.get_history(&alice, 1).await.unwrap().len(), 1);
        assert_eq!(store.history_len(&bob).await, 1);
    }

    #[tokio::test]
    async fn test_append_keeps_entry_timestamp() {
        let store = InMemoryStore::new();
        let user = UserId::from("u");
        let timestamp = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let entry = HistoryEntry::from_record("local", "√(16) = 4", 4.0, timestamp);

        let stored = store.append_history(&user, &entry).await.unwrap();
        assert_eq!(stored.timestamp(), timestamp);
        assert_eq!(stored.id(), Some("1"));
    }

    #[tokio::test]
    async fn test_history_is_unbounded() {
        let store = InMemoryStore::new();
        let user = UserId::from("u");
        for i in 0..25 {
            store
                .append_history(&user, &HistoryEntry::new("x", f64::from(i)))
                .await
                .unwrap();
        }
        assert_eq!(store.history_len(&user).await, 25);
        assert_eq!(store.get_history(&user, 10).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_clear_history() {
        let store = InMemoryStore::new();
        let user = UserId::from("u");
        store
            .append_history(&user, &HistoryEntry::new("1 + 1 = 2", 2.0))
            .await
            .unwrap();
        assert!(store.clear_history(&user).await.unwrap());
        assert!(store.get_history(&user, 10).await.unwrap().is_empty());
        // Clearing an unknown user is fine too
        assert!(store.clear_history(&UserId::from("nobody")).await.unwrap());
    }

    #[tokio::test]
    async fn test_memory_defaults_to_zero() {
        let store = InMemoryStore::new();
        let user = UserId::from("u");
        assert_eq!(store.get_memory(&user).await.unwrap(), 0.0);
        store.set_memory(&user, 42.5).await.unwrap();
        assert_eq!(store.get_memory(&user).await.unwrap(), 42.5);
    }

    #[tokio::test]
    async fn test_settings_upsert() {
        let store = InMemoryStore::new();
        let user = UserId::from("u");
        assert_eq!(store.get_settings(&user).await.unwrap(), None);

        let mut settings = Settings::default();
        store.set_settings(&user, &settings).await.unwrap();
        settings.angle_unit = AngleUnit::Radians;
        store.set_settings(&user, &settings).await.unwrap();

        assert_eq!(store.get_settings(&user).await.unwrap(), Some(settings));
    }
}
