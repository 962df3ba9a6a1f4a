//! Dashboard recent activity component

use super::super::view::ActivityView;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

pub fn render_activity(f: &mut Frame, area: ratatui::layout::Rect, activity: &ActivityView) {
    let lines: Vec<Line> = match activity {
        ActivityView::Empty(message) => vec![Line::from(Span::styled(
            *message,
            Style::default().fg(Color::DarkGray),
        ))],
        ActivityView::Rows(rows) => rows
            .iter()
            .map(|row| {
                let status_color = if row.verified {
                    Color::LightGreen
                } else {
                    Color::LightYellow
                };
                Line::from(vec![
                    Span::styled(format!("{} ", row.time), Style::default().fg(Color::DarkGray)),
                    Span::styled(format!("{} ", row.block), Style::default().fg(Color::White)),
                    Span::styled(row.status.clone(), Style::default().fg(status_color)),
                ])
            })
            .collect(),
    };

    let block = Block::default()
        .title("RECENT BLOCKS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
