//! Pending alert notifications.
//!
//! Alerts are queued first-in first-out. The presentation layer shows the
//! front item and dismisses it with [`NotificationQueue::dismiss`], so two
//! alerts raised in the same tick are both delivered.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Halfway,
    Completion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub timer_id: u64,
    pub message: String,
}

impl Notification {
    pub fn halfway(timer_id: u64, name: &str) -> Self {
        Self {
            kind: NotificationKind::Halfway,
            timer_id,
            message: format!("Halfway alert for \"{name}\"!"),
        }
    }

    pub fn completion(timer_id: u64, name: &str) -> Self {
        Self {
            kind: NotificationKind::Completion,
            timer_id,
            message: format!("Timer \"{name}\" has completed!"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.pending.push_back(notification);
    }

    /// The notification currently on display, if any.
    pub fn current(&self) -> Option<&Notification> {
        self.pending.front()
    }

    /// Dismiss the notification on display; the next one (if any) becomes current.
    pub fn dismiss(&mut self) -> Option<Notification> {
        self.pending.pop_front()
    }

    pub fn is_visible(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_timer() {
        assert_eq!(Notification::halfway(1, "Tea").message, "Halfway alert for \"Tea\"!");
        assert_eq!(
            Notification::completion(1, "Tea").message,
            "Timer \"Tea\" has completed!"
        );
    }

    #[test]
    fn same_tick_alerts_are_not_overwritten() {
        let mut q = NotificationQueue::new();
        q.push(Notification::halfway(1, "A"));
        q.push(Notification::completion(2, "B"));

        assert!(q.is_visible());
        assert_eq!(q.current().unwrap().timer_id, 1);
        assert_eq!(q.dismiss().unwrap().kind, NotificationKind::Halfway);
        assert_eq!(q.current().unwrap().timer_id, 2);
        q.dismiss();
        assert!(!q.is_visible());
        assert!(q.dismiss().is_none());
    }
}
