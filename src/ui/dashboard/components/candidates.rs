//! Dashboard candidates component
//!
//! Renders the vote ranking

use super::super::utils::text_bar;
use super::super::view::CandidatesView;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

pub fn render_candidates(f: &mut Frame, area: ratatui::layout::Rect, candidates: &CandidatesView) {
    let bar_width = (area.width.saturating_sub(6) as usize).clamp(4, 40);

    let lines: Vec<Line> = match candidates {
        CandidatesView::Empty(message) => vec![Line::from(Span::styled(
            *message,
            Style::default().fg(Color::DarkGray),
        ))],
        CandidatesView::Ranked(rows) => rows
            .iter()
            .flat_map(|row| {
                let color = if row.leading {
                    Color::LightGreen
                } else {
                    Color::LightBlue
                };
                let mut heading = vec![Span::styled(
                    format!("{}. {}", row.rank, row.name),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )];
                if row.leading {
                    heading.push(Span::styled(
                        " ★ LEADING",
                        Style::default().fg(Color::LightYellow),
                    ));
                }
                [
                    Line::from(heading),
                    Line::from(vec![
                        Span::styled(text_bar(row.ratio, bar_width), Style::default().fg(color)),
                        Span::raw(format!(" {}", row.percent_label)),
                    ]),
                    Line::from(Span::styled(
                        row.count_label.clone(),
                        Style::default().fg(Color::Gray),
                    )),
                ]
            })
            .collect(),
    };

    let block = Block::default()
        .title("RESULTS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
