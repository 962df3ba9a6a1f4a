//! Dashboard notification overlay
//!
//! Stacks active notifications in the top-right corner

use super::super::utils::notification_color;
use super::super::view::NotificationView;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::Style;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

const WIDTH: u16 = 48;
const HEIGHT: u16 = 4;

pub fn render_notifications(f: &mut Frame, area: Rect, notifications: &[NotificationView]) {
    let width = WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);

    // Newest on top
    for (slot, notification) in notifications.iter().rev().enumerate() {
        let y = area.y + 1 + slot as u16 * HEIGHT;
        if y + HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, HEIGHT);
        let color = notification_color(notification.kind);
        let paragraph = Paragraph::new(notification.message.clone())
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(notification.kind.to_string())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(Clear, rect);
        f.render_widget(paragraph, rect);
    }
}
