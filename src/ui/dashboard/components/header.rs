//! Dashboard header component
//!
//! Renders the title and sync gauge

use super::super::state::DashboardState;
use super::super::utils::connection_color;
use super::super::view::{Connection, StatusView};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and sync progress.
pub fn render_header(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    state: &DashboardState,
    status: &StatusView,
) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!("VOTING LEDGER DASHBOARD v{}", version))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    // Loading takes priority over the connection summary
    let (progress_text, gauge_color, progress_percent) = if state.is_loading() {
        // Loops every 20 ticks
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        (
            "SYNCING - Refreshing chain data".to_string(),
            Color::LightBlue,
            progress,
        )
    } else {
        let text = match (status.connection, &status.last_synced) {
            (Connection::Connected, Some(at)) => format!("CONNECTED - Last sync {}", at),
            (Connection::Disconnected, Some(at)) => {
                format!("DISCONNECTED - Showing data from {}", at)
            }
            (connection, _) => connection.label().to_string(),
        };
        (text, connection_color(status.connection), 100)
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
