//! Transient user notifications.
//!
//! Notifications expire on their own after a fixed lifetime. Expiry is driven
//! by the caller's clock so the UI loop and the tests agree on "now".

use crate::consts::dashboard_consts::{MAX_NOTIFICATIONS, notifications};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: Instant,
}

#[derive(Debug)]
pub struct NotificationCenter {
    items: VecDeque<Notification>,
    lifetime: Duration,
    capacity: usize,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(notifications::lifetime(), MAX_NOTIFICATIONS)
    }
}

impl NotificationCenter {
    pub fn new(lifetime: Duration, capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            lifetime,
            capacity: capacity.max(1),
        }
    }

    pub fn push_at(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(Notification {
            kind,
            message: message.into(),
            raised_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push_at(NotificationKind::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push_at(NotificationKind::Error, message, Instant::now());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push_at(NotificationKind::Info, message, Instant::now());
    }

    /// Drops every notification older than the lifetime.
    pub fn prune(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.items
            .retain(|n| now.saturating_duration_since(n.raised_at) < lifetime);
    }

    /// Notifications still on screen, oldest first.
    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_expire_after_lifetime() {
        let start = Instant::now();
        let mut center = NotificationCenter::new(Duration::from_secs(4), 4);
        center.push_at(NotificationKind::Error, "Failed to load", start);
        center.push_at(
            NotificationKind::Info,
            "Resync",
            start + Duration::from_secs(2),
        );

        center.prune(start + Duration::from_millis(3_999));
        assert_eq!(center.active().count(), 2);

        center.prune(start + Duration::from_secs(4));
        let left: Vec<_> = center.active().map(|n| n.message.as_str()).collect();
        assert_eq!(left, vec!["Resync"]);

        center.prune(start + Duration::from_secs(6));
        assert_eq!(center.active().count(), 0);
    }

    #[test]
    fn oldest_notification_is_dropped_when_full() {
        let now = Instant::now();
        let mut center = NotificationCenter::new(Duration::from_secs(4), 2);
        center.push_at(NotificationKind::Info, "one", now);
        center.push_at(NotificationKind::Info, "two", now);
        center.push_at(NotificationKind::Success, "three", now);

        let left: Vec<_> = center.active().map(|n| n.message.as_str()).collect();
        assert_eq!(left, vec!["two", "three"]);
    }
}
