//! Persisted log of completed timers.
//!
//! The whole log lives as one JSON array under a single key of a
//! [`KvStore`]. Appending reads the array, pushes the entry and writes the
//! array back. Both directions are best-effort: failures are logged and the
//! caller carries on.

mod writer;

pub use writer::HistoryWriter;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::KvStore;
use crate::timer::{Timer, TimerStatus};

/// Default key the log is stored under.
pub const HISTORY_KEY: &str = "completedTimers";

/// Snapshot of a timer at the moment it completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub remaining_time: u64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: TimerStatus,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub halfway_alert: bool,
    #[serde(default)]
    pub completion_time: String,
}

impl HistoryEntry {
    pub fn from_timer(timer: &Timer, completion_time: impl Into<String>) -> Self {
        Self {
            id: timer.id(),
            name: timer.name().to_string(),
            duration: timer.duration(),
            remaining_time: timer.remaining_time(),
            category: timer.category().to_string(),
            status: timer.status(),
            progress: timer.progress(),
            halfway_alert: timer.halfway_alert(),
            completion_time: completion_time.into(),
        }
    }
}

/// Where the timer store sends snapshots of completed timers.
///
/// Recording never fails from the caller's point of view.
pub trait HistorySink {
    fn record(&self, entry: HistoryEntry);
}

/// Read-modify-write history log over a key-value store.
pub struct HistoryLog<S> {
    store: S,
    key: String,
}

impl<S: KvStore> HistoryLog<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, HISTORY_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append `entry` to the log, logging any failure.
    pub fn append(&self, entry: HistoryEntry) {
        let name = entry.name.clone();
        if let Err(e) = self.try_append(entry) {
            tracing::warn!("Failed to save completed timer \"{name}\": {e}");
        }
    }

    /// Append `entry`, reporting failures.
    ///
    /// An existing value that does not parse is left untouched.
    pub fn try_append(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = match self.store.get(&self.key)? {
            Some(data) => serde_json::from_str::<Vec<HistoryEntry>>(&data)?,
            None => Vec::new(),
        };
        entries.push(entry);
        let json = serde_json::to_string(&entries)?;
        self.store.set(&self.key, &json)
    }

    /// Every completed timer in completion order. Empty when nothing is
    /// stored or the stored value cannot be read.
    pub fn load_all(&self) -> Vec<HistoryEntry> {
        match self.try_load_all() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to fetch completed timers: {e}");
                Vec::new()
            }
        }
    }

    pub fn try_load_all(&self) -> Result<Vec<HistoryEntry>> {
        match self.store.get(&self.key)? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    /// Drop the whole log.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}

impl<S: KvStore> HistorySink for HistoryLog<S> {
    fn record(&self, entry: HistoryEntry) {
        self.append(entry);
    }
}
