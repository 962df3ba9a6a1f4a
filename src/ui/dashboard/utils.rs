//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use crate::format::sanitize;
use crate::notifications::NotificationKind;
use crate::ui::dashboard::view::Connection;
use ratatui::prelude::Color;
use serde_json::Value;
use std::time::Duration;

/// Longest slice of an HTTP error body kept in a message.
const MAX_HTTP_DETAIL_CHARS: usize = 60;

const HTTP_ERROR_PREFIX: &str = "HTTP error with status ";

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::Refresher => Color::Cyan,
        Worker::Verifier => Color::Yellow,
        Worker::Exporter => Color::Green,
    }
}

pub fn notification_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Success => Color::LightGreen,
        NotificationKind::Error => Color::LightRed,
        NotificationKind::Info => Color::LightBlue,
    }
}

pub fn connection_color(connection: Connection) -> Color {
    match connection {
        Connection::Connecting => Color::LightYellow,
        Connection::Connected => Color::LightGreen,
        Connection::Disconnected => Color::LightRed,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some((date_part, time_part)) = timestamp.split_once(' ') {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    // Replace verbose transport error text with a short reason
    if let Some((prefix, detail)) = msg.split_once("Reqwest error: ") {
        let reason = if detail.contains("timed out") || detail.contains("TimedOut") {
            "request timed out"
        } else if detail.contains("connect") {
            "backend unreachable"
        } else {
            "network error"
        };
        return format!("{}{}", prefix, reason);
    }
    // Keep the status and a short reason instead of a whole error page
    if let Some((prefix, rest)) = msg.split_once(HTTP_ERROR_PREFIX) {
        let (status, body) = rest.split_once(": ").unwrap_or((rest, ""));
        return match http_error_detail(body) {
            Some(detail) => format!("{}HTTP {}: {}", prefix, status, detail),
            None => format!("{}HTTP {}", prefix, status),
        };
    }
    msg.to_string()
}

/// The readable part of an HTTP error body: the `error` field of a JSON body,
/// or the start of a plain-text one. Markup pages have nothing worth showing.
fn http_error_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if let Some(reason) = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(Value::as_str).map(sanitize))
    {
        return Some(truncate_chars(reason.trim(), MAX_HTTP_DETAIL_CHARS));
    }
    if body.is_empty() || body.starts_with('<') {
        return None;
    }
    Some(truncate_chars(body, MAX_HTTP_DETAIL_CHARS))
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

/// Uptime as `1d 2h 3m`, `2h 3m 4s` or `3m 4s`.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    if secs >= 86400 {
        format!(
            "{}d {}h {}m",
            secs / 86400,
            (secs % 86400) / 3600,
            (secs % 3600) / 60
        )
    } else if secs >= 3600 {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// A horizontal bar of `width` cells filled to `ratio`.
pub fn text_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_timestamp_keeps_month_day_and_minutes() {
        assert_eq!(format_compact_timestamp("2024-03-09 14:05:59"), "03-09 14:05");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn transport_errors_are_shortened() {
        assert_eq!(
            clean_http_error_message(
                "Failed to verify blockchain: Reqwest error: error sending request: operation timed out"
            ),
            "Failed to verify blockchain: request timed out"
        );
    }

    #[test]
    fn http_errors_keep_status_and_short_reason() {
        assert_eq!(
            clean_http_error_message("HTTP error with status 500: boom"),
            "HTTP 500: boom"
        );
        assert_eq!(
            clean_http_error_message(
                "Failed to load dashboard data: status request failed: HTTP error with status 502: <!DOCTYPE html> <html><body><h1>Bad Gateway</h1></body></html>"
            ),
            "Failed to load dashboard data: status request failed: HTTP 502"
        );
        assert_eq!(
            clean_http_error_message(
                r#"Failed to verify blockchain: HTTP error with status 503: {"error": "Chain is being rebuilt"}"#
            ),
            "Failed to verify blockchain: HTTP 503: Chain is being rebuilt"
        );

        let long = format!("HTTP error with status 500: {}", "x".repeat(200));
        let cleaned = clean_http_error_message(&long);
        assert_eq!(cleaned, format!("HTTP 500: {}...", "x".repeat(60)));
    }

    #[test]
    fn uptime_formats() {
        assert_eq!(format_uptime(Duration::from_secs(65)), "1m 5s");
        assert_eq!(format_uptime(Duration::from_secs(3_725)), "1h 2m 5s");
        assert_eq!(format_uptime(Duration::from_secs(90_061)), "1d 1h 1m");
    }

    #[test]
    fn bars_fill_proportionally() {
        assert_eq!(text_bar(0.5, 4), "██░░");
        assert_eq!(text_bar(2.0, 3), "███");
        assert_eq!(text_bar(0.0, 2), "░░");
    }
}
