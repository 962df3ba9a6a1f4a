//! Dashboard verification component
//!
//! Renders the last verification report, or how to start one

use super::super::view::{Control, VerificationView};
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_verification(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    report: Option<&VerificationView>,
    trigger: &Control,
) {
    let mut lines = Vec::new();
    if !trigger.enabled {
        lines.push(Line::from(Span::styled(
            trigger.label,
            Style::default().fg(Color::LightYellow),
        )));
    }

    match report {
        None => {
            if trigger.enabled {
                lines.push(Line::from(Span::styled(
                    "Press [V] to verify the chain",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        Some(report) => {
            let healthy = report.problems.is_empty();
            let headline_color = if healthy {
                Color::LightGreen
            } else {
                Color::LightRed
            };
            lines.push(Line::from(Span::styled(
                report.headline.clone(),
                Style::default()
                    .fg(headline_color)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(report.summary.clone()));
            for fact in report.confirmations {
                lines.push(Line::from(Span::styled(
                    format!("✓ {}", fact),
                    Style::default().fg(Color::LightGreen),
                )));
            }
            lines.push(Line::from(Span::styled(
                report.audit.clone(),
                Style::default().fg(Color::Gray),
            )));
            for step in &report.steps {
                lines.push(Line::from(Span::styled(
                    format!("✓ {}", step),
                    Style::default().fg(Color::Cyan),
                )));
            }
            for problem in &report.problems {
                lines.push(Line::from(Span::styled(
                    format!("✗ {}", problem),
                    Style::default().fg(Color::LightRed),
                )));
            }
        }
    }

    let block = Block::default()
        .title("VERIFICATION")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
