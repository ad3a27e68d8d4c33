//! A single recorded calculation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::{Action, Calculation, format_number};

/// An immutable history entry.
///
/// Entries are built once, from a finished calculation or from a stored
/// record, and only ever read afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Record identifier assigned by the backing store, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    /// Human-readable expression and result, e.g. `7 + 3 = 10`.
    calculation: String,
    result: f64,
    timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create an entry stamped with the current time.
    pub fn new(calculation: impl Into<String>, result: f64) -> Self {
        Self {
            id: None,
            calculation: calculation.into(),
            result,
            timestamp: Utc::now(),
        }
    }

    /// Rebuild an entry from stored fields.
    pub fn from_record(
        id: impl Into<String>,
        calculation: impl Into<String>,
        result: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            calculation: calculation.into(),
            result,
            timestamp,
        }
    }

    /// Create an entry from a finished calculation.
    pub fn from_calculation(calculation: Calculation) -> Self {
        Self::new(calculation.text, calculation.value)
    }

    /// Get the store-assigned identifier.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Get the calculation text.
    pub fn calculation(&self) -> &str {
        &self.calculation
    }

    /// Get the numeric result.
    pub fn result(&self) -> f64 {
        self.result
    }

    /// Get the time the calculation was made.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The result as it appears when loaded back into the display.
    pub fn recall_display(&self) -> String {
        format_number(self.result)
    }

    /// The keypad action that loads this entry's result.
    pub fn recall(&self) -> Action {
        Action::Recall(self.result)
    }
}
