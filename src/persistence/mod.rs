//! Persistence adapter.
//!
//! The calculator core never talks to a storage backend directly; it goes
//! through [`PersistenceAdapter`], keyed by the user the identity
//! collaborator reports. Two implementations ship with the crate:
//! [`InMemoryStore`] for embedding and tests, and [`FileStore`] which keeps
//! a JSON document on disk for local-only use.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::auth::UserId;
use crate::error::PersistenceError;
use crate::history::HistoryEntry;
use crate::settings::Settings;

/// Record CRUD for history, memory and settings.
///
/// Every call may fail; callers treat failures as non-fatal.
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    /// Most recent `limit` entries, newest first.
    async fn get_history(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, PersistenceError>;

    /// Store a calculation, keeping its timestamp, and return the stored entry.
    async fn append_history(
        &self,
        user: &UserId,
        entry: &HistoryEntry,
    ) -> Result<HistoryEntry, PersistenceError>;

    async fn clear_history(&self, user: &UserId) -> Result<bool, PersistenceError>;

    /// Memory register, `0` when never stored.
    async fn get_memory(&self, user: &UserId) -> Result<f64, PersistenceError>;

    async fn set_memory(&self, user: &UserId, value: f64) -> Result<bool, PersistenceError>;

    /// Stored settings, `None` for a user who never saved any.
    async fn get_settings(&self, user: &UserId) -> Result<Option<Settings>, PersistenceError>;

    /// Create or update the user's settings record.
    async fn set_settings(
        &self,
        user: &UserId,
        settings: &Settings,
    ) -> Result<bool, PersistenceError>;
}

/// Everything stored for one user.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct UserRecords {
    /// Newest first.
    history: Vec<HistoryEntry>,
    memory: Option<f64>,
    settings: Option<Settings>,
    next_id: u64,
}

impl UserRecords {
    fn history(&self, limit: usize) -> Vec<HistoryEntry> {
        self.history.iter().take(limit).cloned().collect()
    }

    fn append(&mut self, entry: &HistoryEntry, keep: Option<usize>) -> HistoryEntry {
        self.next_id += 1;
        let entry = HistoryEntry::from_record(
            self.next_id.to_string(),
            entry.calculation(),
            entry.result(),
            entry.timestamp(),
        );
        self.history.insert(0, entry.clone());
        if let Some(keep) = keep {
            self.history.truncate(keep);
        }
        entry
    }
}
