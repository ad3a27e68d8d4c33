//! A calculator session.
//!
//! The session owns the calculator state, history and settings for one
//! UI session. Every input is committed locally first, so the display
//! updates immediately, and then handed to the [`Mirror`] worker which
//! writes it to the persistence adapter in the background. Local state is
//! the source of truth; the store is best effort.

mod mirror;

pub use mirror::Mirror;

use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::{Identity, UserId};
use crate::calculator::{Action, Calculation, CalculatorState, Mode};
use crate::config::{Config, StorageMode};
use crate::error::CalcError;
use crate::history::{HistoryEntry, HistoryLog};
use crate::notice::Notice;
use crate::persistence::PersistenceAdapter;
use crate::settings::Settings;

/// Owner of records in local-only mode.
const LOCAL_USER: &str = "local";

pub struct Session {
    state: CalculatorState,
    history: HistoryLog,
    settings: Settings,
    mode: StorageMode,
    store: Arc<dyn PersistenceAdapter>,
    identity: Arc<dyn Identity>,
    mirror: Mirror,
}

impl Session {
    /// Start a session, loading settings, memory and history for the
    /// current owner.
    ///
    /// Load failures are logged and replaced by defaults; a session always
    /// starts.
    pub async fn load(
        config: &Config,
        store: Arc<dyn PersistenceAdapter>,
        identity: Arc<dyn Identity>,
    ) -> Self {
        let mut session = Self {
            state: CalculatorState::new(),
            history: HistoryLog::with_capacity(config.history_capacity()),
            settings: Settings::from_system(),
            mode: config.storage.mode,
            mirror: Mirror::spawn(Arc::clone(&store)),
            store,
            identity,
        };

        let Some(user) = session.owner() else {
            info!("no signed-in user; starting with defaults");
            session.state.apply_settings(&session.settings);
            return session;
        };

        let limit = session.history.capacity();
        let (settings, memory, history) = futures::join!(
            session.store.get_settings(&user),
            session.store.get_memory(&user),
            session.store.get_history(&user, limit),
        );

        match settings {
            Ok(Some(settings)) => session.settings = settings,
            Ok(None) => {
                info!(%user, "creating default settings");
                session.mirror.set_settings(user.clone(), session.settings);
            }
            Err(err) => warn!(%err, "failed to load settings; using defaults"),
        }
        session.state.apply_settings(&session.settings);

        match memory {
            Ok(value) => session.state.set_memory(value),
            Err(err) => warn!(%err, "failed to load memory value"),
        }

        match history {
            Ok(entries) => session.history.replace(entries),
            Err(err) => warn!(%err, "failed to load calculation history"),
        }

        info!(%user, mode = ?session.mode, entries = session.history.len(), "session loaded");
        session
    }

    /// Get the calculator state.
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Get the local history.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Get the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get the configured storage mode.
    pub fn storage_mode(&self) -> StorageMode {
        self.mode
    }

    /// The user whose records this session reads and writes.
    ///
    /// Local mode always has an owner; remote mode needs a signed-in user.
    pub fn owner(&self) -> Option<UserId> {
        match self.mode {
            StorageMode::Local => Some(UserId::from(LOCAL_USER)),
            StorageMode::Remote => self.identity.current_user(),
        }
    }

    /// Handle one keypad action.
    pub fn press(&mut self, action: Action) -> Option<Notice> {
        if let Action::Memory(op) = action
            && let Err(err) = self.require_owner(op.label())
        {
            return Some(Notice::error(err.to_string()));
        }

        let outcome = self.state.update(action);

        if let Some(calculation) = outcome.calculation {
            self.record(calculation);
        }
        if let Some(value) = outcome.memory
            && let Some(user) = self.owner()
        {
            self.mirror.set_memory(user, value);
        }
        if outcome.settings_changed {
            self.sync_settings();
        }

        outcome.notice
    }

    /// Load the result of history entry `index` (0 = newest) into the display.
    pub fn recall(&mut self, index: usize) -> Option<Notice> {
        match self.history.recall(index) {
            Some(action) => self.press(action),
            None => Some(Notice::error(format!("No history entry #{}", index + 1))),
        }
    }

    /// Clear history locally and in the store.
    ///
    /// Unlike background mirroring, this waits for the store and reports a
    /// failure to the user.
    pub async fn clear_history(&mut self) -> Notice {
        let user = match self.require_owner("history") {
            Ok(user) => user,
            Err(err) => return Notice::error(err.to_string()),
        };

        self.history.clear();
        match self.store.clear_history(&user).await {
            Ok(true) => Notice::success("History cleared"),
            Ok(false) => Notice::error("Failed to clear history"),
            Err(err) => {
                warn!(%err, "failed to clear history");
                Notice::error(format!("Failed to clear history: {err}"))
            }
        }
    }

    /// Flip dark mode and persist the settings.
    pub fn toggle_dark_mode(&mut self) -> Notice {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.sync_settings();
        if self.settings.dark_mode {
            Notice::info("Switched to dark mode")
        } else {
            Notice::info("Switched to light mode")
        }
    }

    /// Sign out through the identity collaborator.
    ///
    /// The in-memory state stays; in remote mode later changes are no
    /// longer mirrored.
    pub fn logout(&mut self) -> Notice {
        self.identity.logout();
        Notice::info("Signed out")
    }

    /// Wait for queued background writes.
    pub async fn flush(&self) {
        self.mirror.flush().await;
    }

    fn record(&mut self, calculation: Calculation) {
        let entry = self
            .history
            .push(HistoryEntry::from_calculation(calculation))
            .clone();

        if let Some(user) = self.owner() {
            self.mirror.append_history(user, entry);
        }
    }

    fn sync_settings(&mut self) {
        self.settings.scientific_mode = self.state.mode() == Mode::Scientific;
        self.settings.angle_unit = self.state.angle_unit();

        if let Some(user) = self.owner() {
            self.mirror.set_settings(user, self.settings);
        }
    }

    fn require_owner(&self, action: &'static str) -> Result<UserId, CalcError> {
        self.owner().ok_or(CalcError::AuthRequired { action })
    }
}
