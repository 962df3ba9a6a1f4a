//! Dashboard logs panel component
//!
//! Renders the event log with event formatting

use super::super::state::DashboardState;
use super::super::utils::{clean_http_error_message, format_compact_timestamp, get_worker_color};
use crate::error_classifier::LogLevel;
use crate::events::EventType;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

/// Render logs panel, newest first.
pub fn render_logs_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    // Account for borders and padding
    let max_logs = (area.height.saturating_sub(2)) as usize;
    let log_count = max_logs.max(1);

    let log_lines: Vec<Line> = state
        .activity_logs
        .iter()
        .filter(|event| event.should_display())
        .rev()
        .take(log_count)
        .map(|event| {
            let status_icon = match (event.event_type, event.log_level) {
                (EventType::Success, _) => "✅",
                (EventType::Error, LogLevel::Warn) => "⚠️",
                (EventType::Error, _) => "❌",
                (EventType::Refresh, _) => "🔄",
            };

            let worker_color = get_worker_color(&event.worker);
            let compact_time = format_compact_timestamp(&event.timestamp);
            let cleaned_msg = clean_http_error_message(&event.msg);

            Line::from(vec![
                Span::raw(format!("{} ", status_icon)),
                Span::styled(
                    format!("{} ", compact_time),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(cleaned_msg, Style::default().fg(worker_color)),
            ])
        })
        .collect();

    let log_paragraph = if log_lines.is_empty() {
        Paragraph::new(vec![Line::from("Connecting to ledger backend...")])
    } else {
        Paragraph::new(log_lines)
    };

    let logs_block = Block::default()
        .title("EVENT LOG")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let log_widget = log_paragraph.block(logs_block).wrap(Wrap { trim: true });

    f.render_widget(log_widget, area);
}
