use crate::error_classifier::LogLevel;
use std::env;

/// Dashboard-specific override, checked before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "LEDGER_DASHBOARD_LOG";

/// Threshold for displaying dashboard events, read from the environment.
pub fn get_log_threshold() -> LogLevel {
    let directive = env::var(LOG_ENV_VAR)
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    parse_log_directive(&directive)
}

/// Reads the level from a `RUST_LOG`-style directive.
///
/// A directive for this crate wins over the global one; otherwise the first
/// directive is used.
pub fn parse_log_directive(directive: &str) -> LogLevel {
    let directives: Vec<&str> = directive.split(',').map(str::trim).collect();
    let chosen = directives
        .iter()
        .find(|d| d.starts_with("ledger_dashboard="))
        .or_else(|| directives.first())
        .copied()
        .unwrap_or(directive);

    let level_str = chosen.split('=').next_back().unwrap_or(chosen).to_lowercase();

    match level_str.as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Info, // Default to info if parsing fails
    }
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    should_log(event_level, get_log_threshold())
}
