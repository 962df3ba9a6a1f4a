//! Dashboard footer component
//!
//! Renders the key bindings, with each workflow's current label

use super::super::view::{Control, ControlsView};
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn key_span(key: &str, control: &Control) -> Vec<Span<'static>> {
    let style = if control.enabled {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    vec![
        Span::styled(format!("[{}] {}", key, control.label), style),
        Span::raw(" | "),
    ]
}

/// Render footer. While searching it shows the query instead.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, controls: &ControlsView) {
    let line = match &controls.search {
        Some(query) => {
            let hint = if controls.search_missed {
                Span::styled("  no match", Style::default().fg(Color::LightRed))
            } else {
                Span::raw("")
            };
            Line::from(vec![
                Span::styled("Search: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{}_", query),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                hint,
                Span::styled(
                    "   [Enter/Esc] Done",
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        None => {
            let mut spans = Vec::new();
            spans.extend(key_span("R", &controls.refresh));
            spans.extend(key_span("V", &controls.verify));
            spans.extend(key_span("E", &controls.export));
            if let Some(filename) = &controls.last_export {
                spans.push(Span::styled(
                    format!("last: {}", filename),
                    Style::default().fg(Color::DarkGray),
                ));
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(
                "[←/→] Blocks | [/] Search | [F] Resync | [Q] Quit",
                Style::default().fg(Color::Cyan),
            ));
            Line::from(spans)
        }
    };

    let footer = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Thick),
    );
    f.render_widget(footer, area);
}
