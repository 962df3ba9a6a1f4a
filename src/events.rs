//! Event System
//!
//! Types and implementations for dashboard events and logging

use crate::error_classifier::LogLevel;
use crate::format::sanitize;
use crate::logging::should_log_with_env;
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Worker {
    /// Periodic and manual data refreshes.
    Refresher,
    /// Chain verification requests.
    Verifier,
    /// Audit report exports.
    Exporter,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    /// Messages often quote backend errors, so they are sanitized here.
    pub fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg: sanitize(&msg),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn refresher(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Refresher, msg, event_type, log_level)
    }

    pub fn verifier(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Verifier, msg, event_type, log_level)
    }

    pub fn exporter(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Exporter, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.worker, self.msg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_type_worker_and_message() {
        let event = Event::verifier(
            "Chain verified".to_string(),
            EventType::Success,
            LogLevel::Info,
        );
        let line = event.to_string();
        assert!(line.starts_with("Success ["));
        assert!(line.ends_with("Verifier: Chain verified"));
    }

    #[test]
    fn success_and_info_events_are_always_displayed() {
        assert!(
            Event::refresher("ok".into(), EventType::Success, LogLevel::Trace).should_display()
        );
        assert!(Event::exporter("x".into(), EventType::Error, LogLevel::Warn).should_display());
    }
}
