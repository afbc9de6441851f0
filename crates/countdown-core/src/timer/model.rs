//! A single named countdown.
//!
//! Remaining time is counted in whole seconds and only ever moves through
//! `tick()` (one second down) or `reset()` (back to the full duration), so
//! `0 <= remaining_time <= duration` holds for every live timer.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::status::TimerStatus;
use crate::events::TimerEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    id: u64,
    name: String,
    /// Seconds. Fixed at creation.
    duration: u64,
    remaining_time: u64,
    category: String,
    #[serde(default)]
    status: TimerStatus,
    /// Set once the halfway alert has been raised for the current run.
    #[serde(default)]
    halfway_alert: bool,
}

impl Timer {
    pub(crate) fn new(id: u64, name: String, duration: u64, category: String) -> Self {
        Self {
            id,
            name,
            duration,
            remaining_time: duration,
            category,
            status: TimerStatus::Idle,
            halfway_alert: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn remaining_time(&self) -> u64 {
        self.remaining_time
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn halfway_alert(&self) -> bool {
        self.halfway_alert
    }

    /// Fraction of the duration still remaining, 1.0 at creation and 0.0 when done.
    /// A zero-length timer reports 0.0.
    pub fn progress(&self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        self.remaining_time as f64 / self.duration as f64
    }

    /// Remaining time at which the halfway alert fires: ceil(duration / 2).
    pub fn halfway_mark(&self) -> u64 {
        self.duration.div_ceil(2)
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Returns `None` when the transition is not allowed or there is no
    /// time left to count down.
    pub(crate) fn start(&mut self) -> Option<TimerEvent> {
        if self.remaining_time == 0 {
            return None;
        }
        self.status = self.status.on_start()?;
        Some(TimerEvent::TimerStarted {
            id: self.id,
            remaining_secs: self.remaining_time,
            at: Utc::now(),
        })
    }

    pub(crate) fn pause(&mut self) -> Option<TimerEvent> {
        self.status = self.status.on_pause()?;
        Some(TimerEvent::TimerPaused {
            id: self.id,
            remaining_secs: self.remaining_time,
            at: Utc::now(),
        })
    }

    pub(crate) fn reset(&mut self) -> TimerEvent {
        self.status = self.status.on_reset();
        self.remaining_time = self.duration;
        self.halfway_alert = false;
        TimerEvent::TimerReset {
            id: self.id,
            duration_secs: self.duration,
            at: Utc::now(),
        }
    }

    /// Advance one second. Returns `None` unless the timer is running with
    /// time left.
    pub(crate) fn tick(&mut self) -> Option<TimerEvent> {
        if !self.status.is_running() || self.remaining_time == 0 {
            return None;
        }
        self.remaining_time -= 1;
        let at = Utc::now();

        if self.remaining_time == 0 {
            self.status = self.status.on_expire()?;
            return Some(TimerEvent::TimerCompleted { id: self.id, at });
        }
        if self.remaining_time == self.halfway_mark() {
            self.halfway_alert = true;
            return Some(TimerEvent::HalfwayReached {
                id: self.id,
                remaining_secs: self.remaining_time,
                at,
            });
        }
        Some(TimerEvent::TimerTicked {
            id: self.id,
            remaining_secs: self.remaining_time,
            at,
        })
    }

    /// Clamp state restored from storage back inside the timer invariants.
    pub(crate) fn normalize(mut self) -> Self {
        self.remaining_time = self.remaining_time.min(self.duration);
        if self.remaining_time == 0 && self.status.is_running() {
            self.status = TimerStatus::Completed;
        }
        self
    }
}
