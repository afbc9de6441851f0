//! Single-writer history task.
//!
//! Appends are sent over a channel to one blocking worker that owns the
//! [`HistoryLog`], so concurrent completions never interleave their
//! read-modify-write cycles.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{HistoryEntry, HistoryLog, HistorySink};
use crate::storage::KvStore;

pub struct HistoryWriter {
    tx: mpsc::UnboundedSender<HistoryEntry>,
    worker: JoinHandle<()>,
}

impl HistoryWriter {
    /// Spawn the worker. Must be called inside a tokio runtime.
    pub fn spawn<S>(log: HistoryLog<S>) -> Self
    where
        S: KvStore + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<HistoryEntry>();
        let worker = tokio::task::spawn_blocking(move || {
            while let Some(entry) = rx.blocking_recv() {
                log.append(entry);
            }
            tracing::debug!("History writer drained");
        });
        Self { tx, worker }
    }

    /// Close the channel and wait for queued appends to land.
    pub async fn shutdown(self) {
        let Self { tx, worker } = self;
        drop(tx);
        if let Err(e) = worker.await {
            tracing::warn!("History writer stopped abnormally: {e}");
        }
    }
}

impl HistorySink for HistoryWriter {
    fn record(&self, entry: HistoryEntry) {
        if let Err(e) = self.tx.send(entry) {
            tracing::warn!("Failed to queue completed timer \"{}\"", e.0.name);
        }
    }
}
