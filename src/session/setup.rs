//! Session setup and initialization

use crate::api::LedgerApi;
use crate::environment::Environment;
use crate::ui::dashboard::DashboardState;
use crate::workers::core::{Command, CommandReceiver, UpdateReceiver, UpdateSender};
use crate::workers::dispatcher::Dispatcher;
use crate::workers::heartbeat::Heartbeat;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Options shared by the TUI and headless modes
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Time between automatic refreshes
    pub refresh_interval: Duration,
    /// Where binary audit reports are written
    pub download_dir: PathBuf,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Whether this is the first visit (shows the splash screen)
    pub first_visit: bool,
}

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// The dashboard state, owned by whichever loop runs the session
    pub state: DashboardState,
    /// Starts background jobs for commands
    pub dispatcher: Dispatcher,
    /// Commands from the heartbeat (and the initial refresh)
    pub command_receiver: CommandReceiver,
    /// Results of background jobs
    pub update_receiver: UpdateReceiver,
    /// Periodic refresh trigger; its token ends the session
    pub heartbeat: Heartbeat,
    /// Backend the session talks to
    pub environment: Environment,
    /// Whether to show the splash screen first
    pub show_splash: bool,
}

/// Sets up a dashboard session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Creates the command and update channels
/// 2. Starts the refresh heartbeat
/// 3. Queues the startup refresh
///
/// Must be called from within the tokio runtime.
pub fn setup_session(api: Arc<dyn LedgerApi>, options: SessionOptions) -> SessionData {
    let environment = api.environment().clone();
    let (command_sender, command_receiver) = mpsc::unbounded_channel();
    let (updates, update_receiver) = UpdateSender::channel();

    // Refresh once at startup; the heartbeat takes over from there
    let _ = command_sender.send(Command::Refresh);
    let heartbeat = Heartbeat::start(options.refresh_interval, command_sender);

    let dispatcher = Dispatcher::new(api, updates, options.download_dir);
    let state = DashboardState::new(environment.clone(), options.with_background_color);

    SessionData {
        state,
        dispatcher,
        command_receiver,
        update_receiver,
        heartbeat,
        environment,
        show_splash: options.first_visit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockLedgerApi;

    #[tokio::test]
    async fn startup_refresh_is_queued() {
        let mut api = MockLedgerApi::new();
        api.expect_environment()
            .return_const(Environment::default());
        let mut session = setup_session(
            Arc::new(api),
            SessionOptions {
                refresh_interval: Duration::from_secs(60),
                download_dir: PathBuf::from("."),
                with_background_color: false,
                first_visit: true,
            },
        );

        assert_eq!(session.command_receiver.try_recv().ok(), Some(Command::Refresh));
        assert!(session.show_splash);
        session.heartbeat.stop().await;
    }
}
