//! Dashboard main renderer

use super::components::{
    activity, candidates, explorer, footer, header, logs, notifications, status, verification,
};
use super::state::DashboardState;
use super::view::DashboardView;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    let view = DashboardView::build(state);

    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(30),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state, &view.status);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(28),
            Constraint::Percentage(40),
            Constraint::Percentage(32),
        ])
        .split(main_chunks[1]);

    status::render_status_panel(
        f,
        content_chunks[0],
        &view.status,
        &view.metrics,
        &state.environment,
        state.start_time.elapsed(),
    );
    explorer::render_explorer(f, content_chunks[1], &view.explorer);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(content_chunks[2]);
    candidates::render_candidates(f, side_chunks[0], &view.candidates);
    verification::render_verification(
        f,
        side_chunks[1],
        view.verification.as_ref(),
        &view.controls.verify,
    );

    let lower_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main_chunks[2]);
    activity::render_activity(f, lower_chunks[0], &view.activity);
    logs::render_logs_panel(f, lower_chunks[1], state);

    footer::render_footer(f, main_chunks[3], &view.controls);
    notifications::render_notifications(f, f.area(), &view.notifications);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn empty_dashboard_renders_empty_states() {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        let state = DashboardState::new(Environment::default(), false);

        terminal.draw(|f| render_dashboard(f, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("BLOCK EXPLORER"));
        assert!(text.contains("No blocks recorded yet"));
        assert!(text.contains("No votes recorded yet"));
        assert!(text.contains("CONNECTING"));
    }
}
