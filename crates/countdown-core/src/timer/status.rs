//! Timer status as an explicit finite-state machine.
//!
//! ```text
//! Idle ──start──▶ Running ──pause──▶ Paused
//!   ▲               │  ▲               │
//!   │               │  └────start──────┘
//!   │          tick to zero
//!   │               ▼
//!   └──reset──── Completed     (reset is valid from every state)
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

impl TimerStatus {
    /// Target state for `start`, or `None` if the transition is not allowed.
    pub fn on_start(self) -> Option<TimerStatus> {
        match self {
            TimerStatus::Idle | TimerStatus::Paused => Some(TimerStatus::Running),
            TimerStatus::Running | TimerStatus::Completed => None,
        }
    }

    pub fn on_pause(self) -> Option<TimerStatus> {
        match self {
            TimerStatus::Running => Some(TimerStatus::Paused),
            _ => None,
        }
    }

    pub fn on_reset(self) -> TimerStatus {
        TimerStatus::Idle
    }

    /// State after the countdown reaches zero.
    pub fn on_expire(self) -> Option<TimerStatus> {
        match self {
            TimerStatus::Running => Some(TimerStatus::Completed),
            _ => None,
        }
    }

    pub fn is_running(self) -> bool {
        self == TimerStatus::Running
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_only_from_idle_or_paused() {
        assert_eq!(TimerStatus::Idle.on_start(), Some(TimerStatus::Running));
        assert_eq!(TimerStatus::Paused.on_start(), Some(TimerStatus::Running));
        assert_eq!(TimerStatus::Running.on_start(), None);
        assert_eq!(TimerStatus::Completed.on_start(), None);
    }

    #[test]
    fn pause_only_from_running() {
        assert_eq!(TimerStatus::Running.on_pause(), Some(TimerStatus::Paused));
        assert_eq!(TimerStatus::Idle.on_pause(), None);
        assert_eq!(TimerStatus::Paused.on_pause(), None);
        assert_eq!(TimerStatus::Completed.on_pause(), None);
    }

    #[test]
    fn reset_always_idles() {
        for s in [
            TimerStatus::Idle,
            TimerStatus::Running,
            TimerStatus::Paused,
            TimerStatus::Completed,
        ] {
            assert_eq!(s.on_reset(), TimerStatus::Idle);
        }
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&TimerStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
