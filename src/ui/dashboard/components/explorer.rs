//! Dashboard block explorer component
//!
//! Renders the block under the cursor with its navigation state

use super::super::view::ExplorerView;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn nav_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn field(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(Color::Gray)),
        Span::raw(value.to_string()),
    ])
}

pub fn render_explorer(f: &mut Frame, area: ratatui::layout::Rect, explorer: &ExplorerView) {
    let block = Block::default()
        .title("BLOCK EXPLORER")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let view = match explorer {
        ExplorerView::Empty(message) => {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                *message,
                Style::default().fg(Color::DarkGray),
            )))
            .alignment(Alignment::Center)
            .block(block);
            f.render_widget(paragraph, area);
            return;
        }
        ExplorerView::Block(view) => view,
    };

    let (badge_color, title_suffix) = if view.flagged {
        (Color::LightRed, "")
    } else if view.genesis {
        (Color::LightGreen, "  GENESIS")
    } else {
        (Color::LightGreen, "")
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                view.title.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(title_suffix, Style::default().fg(Color::LightYellow)),
            Span::raw("  "),
            Span::styled(
                view.badge,
                Style::default().fg(badge_color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        field("Data", &view.data),
        field("Hash", &view.hash),
        field("Prev hash", &view.prev_hash),
        field("Time", &view.timestamp),
        field("Nonce", &view.nonce),
    ];
    for issue in &view.issues {
        lines.push(Line::from(Span::styled(
            format!("! {}", issue),
            Style::default().fg(Color::LightRed),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[←] Previous", nav_style(view.prev_enabled)),
        Span::raw(format!("   {}   ", view.position)),
        Span::styled("Next [→]", nav_style(view.next_enabled)),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
