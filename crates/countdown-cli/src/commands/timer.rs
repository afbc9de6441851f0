use std::sync::Arc;

use clap::Subcommand;
use countdown_core::{
    load_session, save_session, validate_new_timer, Config, Database, HistoryLog, HistorySink,
    HistoryWriter, Ticker, TickerEvent, Timer, TimerEvent, TimerStore,
};
use tokio::sync::{mpsc, Mutex};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Create a new idle timer
    Add {
        /// Timer name
        name: String,
        /// Duration in seconds (defaults to timers.default_duration)
        #[arg(long, short)]
        duration: Option<u64>,
        /// Category the timer is grouped under
        #[arg(long, short)]
        category: String,
    },
    /// Start or resume a timer
    Start { id: u64 },
    /// Pause a running timer
    Pause { id: u64 },
    /// Reset a timer to its full duration
    Reset { id: u64 },
    /// Advance running timers by one second per step
    Tick {
        /// Only tick this timer
        id: Option<u64>,
        /// Number of one-second steps
        #[arg(long, default_value = "1")]
        count: u32,
    },
    /// List timers grouped by category
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count down all running timers in real time until they finish
    Run,
    /// Print the duration presets offered for new timers
    Presets,
}

fn open_store<H: HistorySink>(db: &Database, sink: H, config: &Config) -> TimerStore<H> {
    let mut store = TimerStore::with_options(sink, config.store_options());
    store.restore(load_session(db));
    store
}

fn print_event(event: Option<TimerEvent>, id: u64) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => eprintln!("no change for timer {id}"),
    }
    Ok(())
}

fn timer_view(timer: &Timer) -> serde_json::Value {
    serde_json::json!({
        "id": timer.id(),
        "name": timer.name(),
        "duration": timer.duration(),
        "remainingTime": timer.remaining_time(),
        "status": timer.status(),
        "progress": timer.progress(),
    })
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;

    let mut store = open_store(
        &db,
        HistoryLog::with_key(&db, config.history.storage_key.as_str()),
        &config,
    );

    match action {
        TimerAction::Run => {
            drop(store);
            return run_foreground(&db, &config);
        }
        TimerAction::Add {
            name,
            duration,
            category,
        } => {
            let duration = duration.unwrap_or(config.timers.default_duration);
            let input = validate_new_timer(&name, duration, &category)?;
            let timer = store.add(input.name, input.duration, input.category);
            println!("{}", serde_json::to_string_pretty(&timer_view(&timer))?);
        }
        TimerAction::Start { id } => print_event(store.start(id), id)?,
        TimerAction::Pause { id } => print_event(store.pause(id), id)?,
        TimerAction::Reset { id } => print_event(store.reset(id), id)?,
        TimerAction::Tick { id, count } => {
            for _ in 0..count {
                match id {
                    Some(id) => {
                        store.tick(id);
                    }
                    None => {
                        store.tick_running();
                    }
                }
                while let Some(note) = store.hide_notification() {
                    println!("{}", note.message);
                }
            }
        }
        TimerAction::List { json } => {
            let groups = store.grouped_by_category();
            if json {
                let out: Vec<_> = groups
                    .iter()
                    .map(|(category, timers)| {
                        serde_json::json!({
                            "category": category,
                            "timers": timers.iter().map(|t| timer_view(t)).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else if groups.is_empty() {
                println!("No timers yet.");
            } else {
                for (category, timers) in &groups {
                    println!("{category}");
                    for t in timers {
                        println!(
                            "  {:>14}  {:<20} {:<9} {:>5}s / {:>5}s  {:>3.0}%",
                            t.id(),
                            t.name(),
                            t.status(),
                            t.remaining_time(),
                            t.duration(),
                            t.progress() * 100.0
                        );
                    }
                }
            }
        }
        TimerAction::Presets => {
            for secs in &config.timers.duration_presets {
                let marker = if *secs == config.timers.default_duration {
                    " (default)"
                } else {
                    ""
                };
                println!("{secs}s{marker}");
            }
        }
    }

    save_session(&store, &db)?;
    Ok(())
}

/// Drive every running timer with the real ticker until nothing is running
/// or Ctrl-C is pressed, then save the session.
fn run_foreground(db: &Database, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let history_db = Database::open()?;
        let writer = HistoryWriter::spawn(HistoryLog::with_key(
            history_db,
            config.history.storage_key.as_str(),
        ));
        let store = open_store(db, writer, config);
        if !store.has_running() {
            println!("No running timers.");
            let (_, writer) = store.into_parts();
            writer.shutdown().await;
            return Ok(());
        }

        let store = Arc::new(Mutex::new(store));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(store.clone(), config.tick_interval(), tx);

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some(TickerEvent::Notification(note)) => println!("{}", note.message),
                    Some(TickerEvent::Ticked(events)) => {
                        for event in events {
                            tracing::debug!(?event, "tick");
                        }
                    }
                    Some(TickerEvent::Idle) | None => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    eprintln!("interrupted");
                    break;
                }
            }
        }
        ticker.shutdown().await;

        let store = Arc::try_unwrap(store)
            .map_err(|_| "ticker still holds the timer store")?
            .into_inner();
        save_session(&store, db)?;
        let (_, writer) = store.into_parts();
        writer.shutdown().await;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
