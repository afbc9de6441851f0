//! # Countdown Core Library
//!
//! Core logic for Countdown: named countdown timers grouped by category,
//! with halfway and completion alerts and a persisted history of completed
//! timers. Front ends (the `countdown-cli` binary, or any GUI) are thin
//! layers over this crate.
//!
//! ## Architecture
//!
//! - **Timer Store**: an in-memory list of timers driven by an external
//!   once-per-second `tick()`; each timer's status is an explicit state machine
//! - **Notifications**: a FIFO queue of halfway/completion alerts
//! - **History**: completed-timer snapshots kept as one JSON array in a
//!   key-value store, optionally written through a single-writer task
//! - **Storage**: SQLite key-value database and TOML configuration
//!
//! ## Key Components
//!
//! - [`TimerStore`]: timer list, commands and tick loop
//! - [`HistoryLog`]: best-effort append/load of completed timers
//! - [`Ticker`]: tokio interval that drives a shared store
//! - [`Database`]: SQLite-backed [`KvStore`]
//! - [`Config`]: application configuration

pub mod error;
pub mod events;
pub mod history;
pub mod notification;
pub mod storage;
pub mod ticker;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::TimerEvent;
pub use history::{HistoryEntry, HistoryLog, HistorySink, HistoryWriter, HISTORY_KEY};
pub use notification::{Notification, NotificationKind, NotificationQueue};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use ticker::{Ticker, TickerEvent};
pub use timer::{
    load_session, save_session, validate_new_timer, NewTimer, StoreOptions, Timer, TimerStatus,
    TimerStore,
};
