//! In-memory timer store.
//!
//! Owns every timer of the session, the pending notifications and the sink
//! completed timers are recorded to. It never schedules anything itself:
//! the caller (see [`crate::ticker::Ticker`]) calls `tick()` once per period
//! for each running timer.
//!
//! Commands on unknown ids, and transitions the state machine does not allow,
//! return `None` and leave the store untouched.

use std::fmt::Write as _;

use chrono::{Local, Utc};
use indexmap::IndexMap;

use super::model::Timer;
use crate::events::TimerEvent;
use crate::history::{HistoryEntry, HistorySink};
use crate::notification::{Notification, NotificationQueue};

const FALLBACK_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Queue a notification when a timer reaches its halfway mark.
    pub halfway_alerts: bool,
    /// chrono `strftime` pattern used for `completionTime`.
    pub timestamp_format: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            halfway_alerts: true,
            timestamp_format: "%-m/%-d/%Y, %-I:%M:%S %p".into(),
        }
    }
}

pub struct TimerStore<H> {
    timers: Vec<Timer>,
    notifications: NotificationQueue,
    history: H,
    options: StoreOptions,
    last_id: u64,
}

impl<H: HistorySink> TimerStore<H> {
    pub fn new(history: H) -> Self {
        Self::with_options(history, StoreOptions::default())
    }

    pub fn with_options(history: H, options: StoreOptions) -> Self {
        Self {
            timers: Vec::new(),
            notifications: NotificationQueue::new(),
            history,
            options,
            last_id: 0,
        }
    }

    /// Replace the timer list with previously saved timers.
    pub fn restore(&mut self, timers: Vec<Timer>) {
        self.timers = timers.into_iter().map(Timer::normalize).collect();
        self.last_id = self
            .timers
            .iter()
            .map(Timer::id)
            .max()
            .unwrap_or(0)
            .max(self.last_id);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn get(&self, id: u64) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id() == id)
    }

    pub fn has_running(&self) -> bool {
        self.timers.iter().any(|t| t.status().is_running())
    }

    pub fn running_ids(&self) -> Vec<u64> {
        self.timers
            .iter()
            .filter(|t| t.status().is_running())
            .map(Timer::id)
            .collect()
    }

    /// Timers grouped by category, categories in order of first appearance.
    pub fn grouped_by_category(&self) -> IndexMap<&str, Vec<&Timer>> {
        let mut groups: IndexMap<&str, Vec<&Timer>> = IndexMap::new();
        for timer in &self.timers {
            groups.entry(timer.category()).or_default().push(timer);
        }
        groups
    }

    pub fn categories(&self) -> Vec<&str> {
        self.grouped_by_category().into_keys().collect()
    }

    /// The notification currently on display.
    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Tear the store down, handing back its timers and history sink.
    pub fn into_parts(self) -> (Vec<Timer>, H) {
        (self.timers, self.history)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Create an idle timer. Inputs are taken as given.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        duration: u64,
        category: impl Into<String>,
    ) -> Timer {
        let id = self.next_id();
        let timer = Timer::new(id, name.into(), duration, category.into());
        tracing::debug!(id, name = timer.name(), duration, "Timer added");
        self.timers.push(timer.clone());
        timer
    }

    pub fn start(&mut self, id: u64) -> Option<TimerEvent> {
        let event = self.find_mut(id)?.start();
        if event.is_none() {
            tracing::debug!(id, "start ignored in current state");
        }
        event
    }

    pub fn pause(&mut self, id: u64) -> Option<TimerEvent> {
        let event = self.find_mut(id)?.pause();
        if event.is_none() {
            tracing::debug!(id, "pause ignored in current state");
        }
        event
    }

    pub fn reset(&mut self, id: u64) -> Option<TimerEvent> {
        Some(self.find_mut(id)?.reset())
    }

    /// Advance one running timer by a second.
    ///
    /// Queues the halfway notification at ceil(duration / 2) and, on reaching
    /// zero, records the timer in history and queues the completion
    /// notification.
    pub fn tick(&mut self, id: u64) -> Option<TimerEvent> {
        let Some(timer) = self.timers.iter_mut().find(|t| t.id() == id) else {
            tracing::debug!(id, "tick for unknown timer");
            return None;
        };
        let event = timer.tick()?;

        match &event {
            TimerEvent::HalfwayReached { .. } if self.options.halfway_alerts => {
                self.notifications.push(Notification::halfway(id, timer.name()));
            }
            TimerEvent::TimerCompleted { .. } => {
                tracing::info!(id, name = timer.name(), "Timer completed");
                let stamp = completion_timestamp(&self.options.timestamp_format);
                self.history.record(HistoryEntry::from_timer(timer, stamp));
                self.notifications.push(Notification::completion(id, timer.name()));
            }
            _ => {}
        }
        Some(event)
    }

    /// Tick every running timer once, in list order.
    pub fn tick_running(&mut self) -> Vec<TimerEvent> {
        self.running_ids()
            .into_iter()
            .filter_map(|id| self.tick(id))
            .collect()
    }

    /// Dismiss the notification on display.
    pub fn hide_notification(&mut self) -> Option<Notification> {
        self.notifications.dismiss()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn find_mut(&mut self, id: u64) -> Option<&mut Timer> {
        let found = self.timers.iter_mut().find(|t| t.id() == id);
        if found.is_none() {
            tracing::debug!(id, "no timer with this id");
        }
        found
    }

    /// Millisecond wall-clock id, bumped past the previous one when two
    /// timers are added within the same millisecond.
    fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        id
    }
}

fn completion_timestamp(format: &str) -> String {
    let now = Local::now();
    let mut out = String::new();
    if write!(out, "{}", now.format(format)).is_err() {
        tracing::warn!("Invalid timestamp format {format:?}, using default");
        out.clear();
        let _ = write!(out, "{}", now.format(FALLBACK_TIMESTAMP_FORMAT));
    }
    out
}
