use clap::Subcommand;
use countdown_core::{Config, Database, HistoryLog};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List completed timers, oldest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete all completed timer records
    Clear,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let log = HistoryLog::with_key(&db, config.history.storage_key.as_str());

    match action {
        HistoryAction::List { json } => {
            let entries = log.load_all();
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No completed timers yet.");
            } else {
                for entry in &entries {
                    println!("{} [{}]", entry.name, entry.category);
                    println!("  Completed At: {}", entry.completion_time);
                }
            }
        }
        HistoryAction::Clear => {
            log.clear()?;
            println!("history cleared");
        }
    }
    Ok(())
}
