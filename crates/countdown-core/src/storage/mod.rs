mod config;
pub mod database;
pub mod kv;

pub use config::{Config, HistoryConfig, NotificationsConfig, TickerConfig, TimersConfig};
pub use database::Database;
pub use kv::{KvStore, MemoryStore};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `COUNTDOWN_DATA_DIR` wins when set; otherwise `~/.config/countdown[-dev]/`
/// based on `COUNTDOWN_ENV` (set it to `dev` for a development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("COUNTDOWN_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("COUNTDOWN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("countdown-dev")
            } else {
                base_dir.join("countdown")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
