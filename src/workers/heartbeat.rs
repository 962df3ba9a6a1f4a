//! Periodic refresh trigger

use super::core::{Command, CommandSender};
use crate::consts::dashboard_consts::refresh::MAX_INTERVAL_SECS;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

const MIN_PERIOD: Duration = Duration::from_millis(10);
const MAX_PERIOD: Duration = Duration::from_secs(MAX_INTERVAL_SECS);

/// Sends [`Command::Refresh`] once per period until stopped.
///
/// The first tick comes one full period after start. Ticks missed while the
/// process was busy are delayed rather than bunched up.
#[derive(Debug)]
pub struct Heartbeat {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Heartbeat {
    pub fn start(period: Duration, commands: CommandSender) -> Self {
        let period = period.clamp(MIN_PERIOD, MAX_PERIOD);
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let start = Instant::now()
                .checked_add(period)
                .unwrap_or_else(Instant::now);
            let mut ticker = tokio::time::interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        if commands.send(Command::Refresh).is_err() {
                            break;
                        }
                    }
                }
            }
            log::debug!("Heartbeat stopped");
        });

        Self { token, handle }
    }

    /// Token that stops the heartbeat when cancelled. Shared with the session
    /// so one Ctrl+C stops everything.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Stops the heartbeat and waits for it to finish. No tick is sent after
    /// this returns.
    pub async fn stop(self) {
        self.token.cancel();
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn ticks_until_stopped() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let heartbeat = Heartbeat::start(Duration::from_millis(10), sender);

        for _ in 0..3 {
            assert_eq!(receiver.recv().await, Some(Command::Refresh));
        }

        heartbeat.stop().await;
        while receiver.try_recv().is_ok() {}
        // The sender was dropped with the task, so the channel is now closed.
        assert_eq!(receiver.recv().await, None);
    }

    #[tokio::test]
    async fn first_tick_waits_a_full_period() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let heartbeat = Heartbeat::start(Duration::from_millis(300), sender);

        let early = tokio::time::timeout(Duration::from_millis(100), receiver.recv()).await;
        assert!(early.is_err());
        assert_eq!(receiver.recv().await, Some(Command::Refresh));

        heartbeat.stop().await;
    }

    #[tokio::test]
    async fn oversized_period_keeps_the_heartbeat_alive() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let heartbeat = Heartbeat::start(Duration::MAX, sender);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!heartbeat.handle.is_finished());
        assert!(receiver.try_recv().is_err());

        heartbeat.stop().await;
    }
}
