//! Main application state and UI loop
//!
//! Contains the App struct and the key handling of the dashboard

use crate::block_cursor::Direction;
use crate::consts::dashboard_consts::{SPLASH_DURATION_MS, UI_POLL_INTERVAL_MS};
use crate::ui::dashboard::{DashboardState, InputMode, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::core::{Command, CommandReceiver, UpdateReceiver};
use crate::workers::dispatcher::Dispatcher;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// The different screens in the application.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Shown on the first visit only, until the deadline or a key press.
    Splash { until: Instant },
    Dashboard,
}

/// What a key press asks the loop to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Handled in place (navigation, search input) or ignored.
    None,
    Quit,
    Run(Command),
}

/// Application state
pub struct App {
    /// The only copy of the dashboard state. Jobs never touch it directly.
    state: DashboardState,
    dispatcher: Dispatcher,
    /// Commands from the heartbeat.
    command_receiver: CommandReceiver,
    /// Results of background jobs.
    update_receiver: UpdateReceiver,
    /// Cancelled on quit, and by anyone else who wants the session to end.
    shutdown: CancellationToken,
    current_screen: Screen,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        state: DashboardState,
        dispatcher: Dispatcher,
        command_receiver: CommandReceiver,
        update_receiver: UpdateReceiver,
        shutdown: CancellationToken,
        show_splash: bool,
    ) -> Self {
        let current_screen = if show_splash {
            Screen::Splash {
                until: Instant::now() + Duration::from_millis(SPLASH_DURATION_MS),
            }
        } else {
            Screen::Dashboard
        };
        Self {
            state,
            dispatcher,
            command_receiver,
            update_receiver,
            shutdown,
            current_screen,
        }
    }

    /// Feeds pending commands and job results into the state.
    fn pump(&mut self) {
        while let Ok(command) = self.command_receiver.try_recv() {
            self.dispatcher.dispatch(command, &mut self.state);
        }
        while let Ok(update) = self.update_receiver.try_recv() {
            self.state.add_update(update);
        }
        for event in self.state.update() {
            log::debug!("{}", event);
        }
    }
}

/// Maps a key press onto the dashboard. Navigation and search are applied
/// to `state` directly; everything else is returned for the loop to run.
pub fn handle_key(state: &mut DashboardState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    if state.input_mode == InputMode::Search {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => state.end_search(),
            KeyCode::Backspace => state.pop_search_char(),
            KeyCode::Char(c) => state.push_search_char(c),
            _ => {}
        }
        return KeyAction::None;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('r') => KeyAction::Run(Command::Refresh),
        KeyCode::Char('f') => KeyAction::Run(Command::ForceResync),
        KeyCode::Char('v') => KeyAction::Run(Command::Verify),
        KeyCode::Char('e') => KeyAction::Run(Command::Export),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
            state.navigate(Direction::Previous);
            KeyAction::None
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
            state.navigate(Direction::Next);
            KeyAction::None
        }
        KeyCode::Char('/') => {
            state.begin_search();
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let poll_interval = Duration::from_millis(UI_POLL_INTERVAL_MS);

    // UI event loop
    loop {
        if app.shutdown.is_cancelled() {
            return Ok(());
        }

        // Jobs keep running behind the splash screen
        app.pump();
        terminal.draw(|f| render(f, &app))?;

        if let Screen::Splash { until } = app.current_screen {
            if Instant::now() >= until {
                app.current_screen = Screen::Dashboard;
                continue;
            }
        }

        // Poll for key events
        if event::poll(poll_interval)? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                if let Screen::Splash { .. } = app.current_screen {
                    // Any key other than quit skips the splash screen
                    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                        app.shutdown.cancel();
                        return Ok(());
                    }
                    app.current_screen = Screen::Dashboard;
                    continue;
                }

                match handle_key(&mut app.state, key) {
                    KeyAction::None => {}
                    KeyAction::Quit => {
                        app.shutdown.cancel();
                        return Ok(());
                    }
                    KeyAction::Run(command) => app.dispatcher.dispatch(command, &mut app.state),
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Splash { .. } => render_splash(f),
        Screen::Dashboard => render_dashboard(f, &app.state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Block;
    use crate::environment::Environment;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_with_blocks(count: u64) -> DashboardState {
        let mut state = DashboardState::new(Environment::default(), false);
        state.cursor.set_blocks(
            (0..count)
                .map(|index| Block {
                    index,
                    data: format!("Voter_{:04}", index),
                    ..Default::default()
                })
                .collect(),
        );
        state
    }

    #[test]
    fn workflow_keys_become_commands() {
        let mut state = state_with_blocks(0);
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('v'))),
            KeyAction::Run(Command::Verify)
        );
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('e'))),
            KeyAction::Run(Command::Export)
        );
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('r'))),
            KeyAction::Run(Command::Refresh)
        );
        assert_eq!(handle_key(&mut state, press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(
            handle_key(
                &mut state,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            KeyAction::Quit
        );
    }

    #[test]
    fn arrows_move_the_cursor() {
        let mut state = state_with_blocks(3);
        handle_key(&mut state, press(KeyCode::Right));
        handle_key(&mut state, press(KeyCode::Right));
        handle_key(&mut state, press(KeyCode::Right));
        assert_eq!(state.cursor.current_index(), 2);
        handle_key(&mut state, press(KeyCode::Left));
        assert_eq!(state.cursor.current_index(), 1);
    }

    #[test]
    fn search_mode_captures_letters() {
        let mut state = state_with_blocks(12);
        handle_key(&mut state, press(KeyCode::Char('/')));
        assert_eq!(state.input_mode, InputMode::Search);

        // 'q' is part of the query here, not quit
        assert_eq!(handle_key(&mut state, press(KeyCode::Char('q'))), KeyAction::None);
        handle_key(&mut state, press(KeyCode::Backspace));
        for c in "0011".chars() {
            handle_key(&mut state, press(KeyCode::Char(c)));
        }
        assert_eq!(state.cursor.current_index(), 11);

        handle_key(&mut state, press(KeyCode::Enter));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.cursor.current_index(), 11);
    }
}
