//! Periodic trigger for a shared [`TimerStore`].
//!
//! Each period the ticker locks the store, ticks every running timer in list
//! order, then forwards the queued notifications over a channel. It does not
//! wait on history writes. Dropping or stopping the ticker is the only way
//! to cancel it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::events::TimerEvent;
use crate::history::HistorySink;
use crate::notification::Notification;
use crate::timer::TimerStore;

#[derive(Debug, Clone, PartialEq)]
pub enum TickerEvent {
    /// Events produced by one firing.
    Ticked(Vec<TimerEvent>),
    Notification(Notification),
    /// No timer was left running after a firing.
    Idle,
}

pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn the ticker. The first firing happens one `period` from now.
    pub fn spawn<H>(
        store: Arc<Mutex<TimerStore<H>>>,
        period: Duration,
        events: mpsc::UnboundedSender<TickerEvent>,
    ) -> Self
    where
        H: HistorySink + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;

                let (ticked, notifications, idle) = {
                    let mut guard = store.lock().await;
                    let ticked = guard.tick_running();
                    let mut notifications = Vec::new();
                    while let Some(n) = guard.hide_notification() {
                        notifications.push(n);
                    }
                    (ticked, notifications, !guard.has_running())
                };

                let mut outgoing = Vec::with_capacity(notifications.len() + 2);
                if !ticked.is_empty() {
                    outgoing.push(TickerEvent::Ticked(ticked));
                }
                outgoing.extend(notifications.into_iter().map(TickerEvent::Notification));
                if idle {
                    outgoing.push(TickerEvent::Idle);
                }

                for event in outgoing {
                    if events.send(event).is_err() {
                        tracing::debug!("Ticker receiver dropped, stopping");
                        return;
                    }
                }
            }
        });
        Self { handle }
    }

    pub fn stop(&self) {
        self.handle.abort();
    }

    /// Stop and wait until the task has released the store.
    pub async fn shutdown(mut self) {
        self.handle.abort();
        if let Err(e) = (&mut self.handle).await {
            if !e.is_cancelled() {
                tracing::warn!("Ticker stopped abnormally: {e}");
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryLog;
    use crate::notification::NotificationKind;
    use crate::storage::MemoryStore;
    use crate::timer::TimerStatus;

    #[tokio::test(start_paused = true)]
    async fn runs_timer_to_completion() {
        let kv = Arc::new(MemoryStore::new());
        let mut store = TimerStore::new(HistoryLog::new(kv.clone()));
        let id = store.add("Tea", 3, "Drinks").id();
        store.start(id);
        let store = Arc::new(Mutex::new(store));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(store.clone(), Duration::from_secs(1), tx);

        let mut kinds = Vec::new();
        let mut firings = 0;
        while let Some(event) = rx.recv().await {
            match event {
                TickerEvent::Ticked(_) => firings += 1,
                TickerEvent::Notification(n) => kinds.push(n.kind),
                TickerEvent::Idle => break,
            }
        }
        ticker.stop();

        assert_eq!(firings, 3);
        assert_eq!(kinds, vec![NotificationKind::Halfway, NotificationKind::Completion]);
        assert_eq!(store.lock().await.get(id).unwrap().remaining_time(), 0);
        assert_eq!(HistoryLog::new(kv).load_all().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_length_timer_lets_ticker_go_idle() {
        let mut store = TimerStore::new(HistoryLog::new(MemoryStore::new()));
        let id = store.add("Zero", 0, "c").id();
        store.start(id);
        let store = Arc::new(Mutex::new(store));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(store.clone(), Duration::from_secs(1), tx);
        let first = time::timeout(Duration::from_secs(100), rx.recv()).await;
        ticker.stop();

        assert_eq!(first.unwrap(), Some(TickerEvent::Idle));
        assert_eq!(store.lock().await.get(id).unwrap().status(), TimerStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_ticking() {
        let mut store = TimerStore::new(HistoryLog::new(MemoryStore::new()));
        let id = store.add("Long", 100, "c").id();
        store.start(id);
        let store = Arc::new(Mutex::new(store));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(store.clone(), Duration::from_secs(1), tx);
        rx.recv().await;
        ticker.stop();
        time::sleep(Duration::from_secs(10)).await;

        let remaining = store.lock().await.get(id).unwrap().remaining_time();
        assert_eq!(remaining, 99);
    }
}
