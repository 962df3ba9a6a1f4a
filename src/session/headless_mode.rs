//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use std::error::Error;

/// Runs the application in headless mode
///
/// This function handles:
/// 1. Console event logging
/// 2. Ctrl+C shutdown handling
/// 3. Event loop management
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.environment);

    // Trigger shutdown on Ctrl+C
    let shutdown = session.heartbeat.token();
    let ctrl_c_shutdown = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_shutdown.cancel();
        }
    });

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                break;
            }
            Some(command) = session.command_receiver.recv() => {
                session.dispatcher.dispatch(command, &mut session.state);
            }
            Some(update) = session.update_receiver.recv() => {
                session.state.add_update(update);
                for event in session.state.update() {
                    if event.should_display() {
                        println!("{}", event);
                    }
                }
            }
        }
    }

    print_session_shutdown();
    session.heartbeat.stop().await;
    print_session_exit_success();

    Ok(())
}
