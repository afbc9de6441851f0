//! Saving the live timer list between front-end invocations.
//!
//! Notifications are transient and are not saved.

use super::model::Timer;
use super::store::TimerStore;
use crate::error::Result;
use crate::history::HistorySink;
use crate::storage::KvStore;

pub const SESSION_KEY: &str = "active_timers";

/// Write the store's timers under [`SESSION_KEY`].
pub fn save_session<H: HistorySink, S: KvStore>(store: &TimerStore<H>, kv: &S) -> Result<()> {
    let json = serde_json::to_string(store.timers())?;
    kv.set(SESSION_KEY, &json)
}

/// Timers saved by [`save_session`]; empty when none are stored or the
/// stored value is unreadable.
pub fn load_session<S: KvStore>(kv: &S) -> Vec<Timer> {
    let data = match kv.get(SESSION_KEY) {
        Ok(Some(data)) => data,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Failed to read saved timers: {e}");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<Timer>>(&data) {
        Ok(timers) => timers,
        Err(e) => {
            tracing::warn!("Discarding unreadable saved timers: {e}");
            Vec::new()
        }
    }
}
