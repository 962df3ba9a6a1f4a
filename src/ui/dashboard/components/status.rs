//! Dashboard status panel component
//!
//! Renders chain health, vote metrics and session info

use super::super::utils::{connection_color, format_uptime};
use super::super::view::{MetricsView, StatusView};
use crate::environment::Environment;

use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};
use std::time::Duration;

fn field(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

/// Render status panel.
pub fn render_status_panel(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    status: &StatusView,
    metrics: &MetricsView,
    environment: &Environment,
    uptime: Duration,
) {
    let mut lines = vec![Line::from(Span::styled(
        status.connection.label(),
        Style::default()
            .fg(connection_color(status.connection))
            .add_modifier(Modifier::BOLD),
    ))];

    let (backend, backend_color) = match status.backend_online {
        Some(true) => ("online", Color::LightGreen),
        Some(false) => ("offline", Color::LightRed),
        None => ("-", Color::DarkGray),
    };
    lines.push(field("Backend", backend.to_string(), backend_color));
    lines.push(field("Updated", status.last_update.clone(), Color::White));
    lines.push(field("Security", status.security_status.clone(), Color::LightGreen));
    lines.push(field("Integrity", status.chain_integrity.clone(), Color::LightGreen));
    lines.push(field("Height", status.block_height.clone(), Color::LightCyan));
    lines.push(field("Votes cast", status.votes_cast.clone(), Color::LightCyan));
    lines.push(field("Verified", status.verified_blocks.clone(), Color::LightCyan));
    lines.push(Line::from(""));

    lines.push(field("Total votes", metrics.total_votes.clone(), Color::LightYellow));
    lines.push(field("Total blocks", metrics.total_blocks.clone(), Color::LightYellow));
    lines.push(field("Participation", metrics.participation.clone(), Color::LightYellow));
    if let Some(integrity) = &metrics.chain_integrity {
        lines.push(field("Chain integrity", integrity.clone(), Color::LightYellow));
    }
    if let Some(latest) = &metrics.latest_block {
        lines.push(field("Latest block", latest.clone(), Color::LightYellow));
    }
    if let Some((start, end, remaining)) = &metrics.voting_period {
        lines.push(field("Voting", format!("{} - {}", start, end), Color::White));
        lines.push(field("Remaining", remaining.clone(), Color::White));
    }
    lines.push(Line::from(""));

    lines.push(field("Env", environment.to_string(), Color::Yellow));
    lines.push(field("Uptime", format_uptime(uptime), Color::LightGreen));

    let block = Block::default()
        .title("CHAIN STATUS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
