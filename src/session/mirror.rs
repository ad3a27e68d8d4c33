//! Background mirroring of local changes to the persistence adapter.
//!
//! Writes are queued to a single detached worker so they reach the store
//! in the order they were committed locally. A failed write is logged and
//! dropped; the next successful write of the same field supersedes it.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::auth::UserId;
use crate::error::PersistenceError;
use crate::history::HistoryEntry;
use crate::persistence::PersistenceAdapter;
use crate::settings::Settings;

#[derive(Debug)]
enum Job {
    AppendHistory {
        user: UserId,
        entry: HistoryEntry,
    },
    SetMemory {
        user: UserId,
        value: f64,
    },
    SetSettings {
        user: UserId,
        settings: Settings,
    },
    Flush(oneshot::Sender<()>),
}

impl Job {
    fn name(&self) -> &'static str {
        match self {
            Self::AppendHistory { .. } => "history",
            Self::SetMemory { .. } => "memory",
            Self::SetSettings { .. } => "settings",
            Self::Flush(_) => "flush",
        }
    }
}

/// Handle to the mirroring worker.
#[derive(Debug)]
pub struct Mirror {
    jobs: mpsc::UnboundedSender<Job>,
}

impl Mirror {
    /// Spawn the worker on the current tokio runtime.
    pub fn spawn(store: Arc<dyn PersistenceAdapter>) -> Self {
        let (jobs, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(store, rx));
        Self { jobs }
    }

    pub fn append_history(&self, user: UserId, entry: HistoryEntry) {
        self.send(Job::AppendHistory { user, entry });
    }

    pub fn set_memory(&self, user: UserId, value: f64) {
        self.send(Job::SetMemory { user, value });
    }

    pub fn set_settings(&self, user: UserId, settings: Settings) {
        self.send(Job::SetSettings { user, settings });
    }

    /// Wait until every write queued so far has been attempted.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        self.send(Job::Flush(tx));
        // A closed channel means the worker is gone and nothing is pending
        let _ = rx.await;
    }

    fn send(&self, job: Job) {
        if let Err(err) = self.jobs.send(job) {
            warn!(job = err.0.name(), "mirror worker stopped; change kept locally only");
        }
    }
}

async fn run(store: Arc<dyn PersistenceAdapter>, mut jobs: mpsc::UnboundedReceiver<Job>) {
    while let Some(job) = jobs.recv().await {
        let name = job.name();
        let result = match job {
            Job::AppendHistory { user, entry } => {
                store.append_history(&user, &entry).await.map(|_| true)
            }
            Job::SetMemory { user, value } => store.set_memory(&user, value).await,
            Job::SetSettings { user, settings } => store.set_settings(&user, &settings).await,
            Job::Flush(done) => {
                let _ = done.send(());
                continue;
            }
        };
        report(name, result);
    }
    debug!("mirror worker finished");
}

fn report(name: &'static str, result: Result<bool, PersistenceError>) {
    match result {
        Ok(true) => debug!(job = name, "mirrored"),
        Ok(false) => warn!(job = name, "store reported an unsuccessful write"),
        Err(err) => warn!(job = name, %err, "failed to mirror change"),
    }
}
