//! Identity collaborator.
//!
//! Authentication itself happens elsewhere; the calculator only needs to
//! know who (if anyone) is signed in and to be able to sign them out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::RwLock;
use tracing::info;

/// Identifier of an authenticated user, as issued by the auth backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the current user identity.
pub trait Identity: Send + Sync {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<UserId>;

    /// Sign the current user out.
    fn logout(&self);
}

/// An identity fixed at startup, e.g. from a command-line flag.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    user: RwLock<Option<UserId>>,
}

impl StaticIdentity {
    pub fn signed_in(user: UserId) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl Identity for StaticIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.user.read().ok().and_then(|user| user.clone())
    }

    fn logout(&self) {
        if let Ok(mut user) = self.user.write()
            && let Some(previous) = user.take()
        {
            info!(user = %previous, "signed out");
        }
    }
}
