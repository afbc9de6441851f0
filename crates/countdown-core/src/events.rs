use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the timer store produces an Event.
/// Commands that turn out to be no-ops produce none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    TimerStarted {
        id: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        id: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        id: u64,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// One second elapsed on a running timer.
    TimerTicked {
        id: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Remaining time reached ceil(duration / 2).
    HalfwayReached {
        id: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerCompleted {
        id: u64,
        at: DateTime<Utc>,
    },
}

impl TimerEvent {
    pub fn timer_id(&self) -> u64 {
        match self {
            TimerEvent::TimerStarted { id, .. }
            | TimerEvent::TimerPaused { id, .. }
            | TimerEvent::TimerReset { id, .. }
            | TimerEvent::TimerTicked { id, .. }
            | TimerEvent::HalfwayReached { id, .. }
            | TimerEvent::TimerCompleted { id, .. } => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = TimerEvent::TimerCompleted { id: 7, at: Utc::now() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "timer_completed");
        assert_eq!(json["id"], 7);
        assert_eq!(event.timer_id(), 7);
    }
}
