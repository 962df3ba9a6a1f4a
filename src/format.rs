//! Display formatting for backend-provided values.
//!
//! Everything the backend sends is untrusted. Text passes through
//! [`sanitize`] before it reaches the terminal so a crafted vote payload
//! cannot smuggle escape sequences into the dashboard.

use chrono::{Local, TimeZone};

/// Shown in place of a value the backend left out.
pub const UNKNOWN: &str = "Unknown";

/// Makes untrusted text safe to print: control characters (including ESC)
/// are dropped and line breaks/tabs collapse to a single space.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\n' | '\r' | '\t') {
            if !out.ends_with(' ') {
                out.push(' ');
            }
        } else if !c.is_control() {
            out.push(c);
        }
    }
    out
}

/// [`sanitize`], with [`UNKNOWN`] for blank input.
pub fn sanitize_or_unknown(text: &str) -> String {
    let clean = sanitize(text);
    if clean.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        clean
    }
}

/// Groups digits in thousands: `1234567` becomes `1,234,567`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a percentage, dropping a fractional part of zero: `60%`, `33.5%`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "0%".to_string();
    }
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}%", rounded)
    } else {
        format!("{:.1}%", rounded)
    }
}

/// Unix seconds to local `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(unix_secs: i64) -> String {
    match Local.timestamp_opt(unix_secs, 0).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => UNKNOWN.to_string(),
    }
}

/// Clamps a percentage into a gauge ratio in `[0, 1]`.
pub fn percent_ratio(value: f64) -> f64 {
    if value.is_finite() {
        (value / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_escape_sequences() {
        assert_eq!(
            sanitize("Voter_0001\u{1b}[2J voted\nfor\t\tBob"),
            "Voter_0001[2J voted for Bob"
        );
        assert_eq!(sanitize("<b>Alice & Bob</b>"), "<b>Alice & Bob</b>");
    }

    #[test]
    fn blank_text_becomes_unknown() {
        assert_eq!(sanitize_or_unknown("  "), UNKNOWN);
        assert_eq!(sanitize_or_unknown("\u{7}"), UNKNOWN);
        assert_eq!(sanitize_or_unknown("10:02 AM"), "10:02 AM");
    }

    #[test]
    fn counts_are_grouped_in_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn percentages_drop_zero_fractions() {
        assert_eq!(format_percent(60.0), "60%");
        assert_eq!(format_percent(33.46), "33.5%");
        assert_eq!(format_percent(f64::NAN), "0%");
    }

    #[test]
    fn percent_ratio_is_clamped() {
        assert_eq!(percent_ratio(40.0), 0.4);
        assert_eq!(percent_ratio(140.0), 1.0);
        assert_eq!(percent_ratio(-3.0), 0.0);
    }

    #[test]
    fn timestamps_render_in_local_time() {
        let rendered = format_timestamp(1_700_000_000);
        assert_eq!(rendered.len(), "2023-11-14 22:13:20".len());
        assert!(rendered.starts_with("2023-11-1"));
        assert_eq!(format_timestamp(i64::MAX), UNKNOWN);
    }
}
