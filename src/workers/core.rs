//! Messages exchanged between the dashboard loop and its background jobs

use crate::api::error::ApiError;
use crate::api::types::VerificationResult;
use crate::workers::exporter::{ExportError, ExportOutcome};
use crate::workers::refresher::{RefreshError, Snapshot};
use tokio::sync::mpsc;

/// Something the user or the heartbeat asks the dashboard to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    /// A manual refresh announced to the user as a resync.
    ForceResync,
    Verify,
    Export,
}

/// A background job, identified well enough to settle it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Job {
    Refresh { generation: u64 },
    Verify,
    Export,
}

/// Result of a background job, applied by the dashboard loop.
#[derive(Debug)]
pub enum Update {
    Refreshed {
        generation: u64,
        outcome: Result<Snapshot, RefreshError>,
    },
    Verified(Result<VerificationResult, ApiError>),
    Exported(Result<ExportOutcome, ExportError>),
    /// The job ended without producing a result (aborted or panicked).
    Interrupted(Job),
}

pub type CommandSender = mpsc::UnboundedSender<Command>;
pub type CommandReceiver = mpsc::UnboundedReceiver<Command>;
pub type UpdateReceiver = mpsc::UnboundedReceiver<Update>;

/// Common update sending utilities for jobs
#[derive(Debug, Clone)]
pub struct UpdateSender {
    sender: mpsc::UnboundedSender<Update>,
}

impl UpdateSender {
    pub fn new(sender: mpsc::UnboundedSender<Update>) -> Self {
        Self { sender }
    }

    /// Creates a connected sender/receiver pair.
    pub fn channel() -> (Self, UpdateReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    /// Send an update. A closed dashboard loop is not an error for a job.
    pub fn send_update(&self, update: Update) {
        let _ = self.sender.send(update);
    }
}

/// Guarantees that every job reports back exactly once.
///
/// A job that finishes calls [`CompletionGuard::complete`]. If the job is
/// aborted or panics instead, dropping the guard reports
/// [`Update::Interrupted`] so the dashboard never stays stuck in a busy state.
#[derive(Debug)]
pub struct CompletionGuard {
    job: Job,
    updates: UpdateSender,
    completed: bool,
}

impl CompletionGuard {
    pub fn new(job: Job, updates: UpdateSender) -> Self {
        Self {
            job,
            updates,
            completed: false,
        }
    }

    pub fn complete(mut self, update: Update) {
        self.completed = true;
        self.updates.send_update(update);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if !self.completed {
            self.updates.send_update(Update::Interrupted(self.job));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_guard_sends_only_the_result() {
        let (updates, mut receiver) = UpdateSender::channel();
        let guard = CompletionGuard::new(Job::Verify, updates);
        guard.complete(Update::Verified(Ok(VerificationResult::default())));

        assert!(matches!(receiver.try_recv(), Ok(Update::Verified(Ok(_)))));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn dropped_guard_reports_interruption() {
        let (updates, mut receiver) = UpdateSender::channel();
        drop(CompletionGuard::new(
            Job::Refresh { generation: 7 },
            updates,
        ));

        assert!(matches!(
            receiver.try_recv(),
            Ok(Update::Interrupted(Job::Refresh { generation: 7 }))
        ));
    }

    #[tokio::test]
    async fn aborted_job_reports_interruption() {
        let (updates, mut receiver) = UpdateSender::channel();
        let guard = CompletionGuard::new(Job::Export, updates);
        let handle = tokio::spawn(async move {
            std::future::pending::<()>().await;
            guard.complete(Update::Interrupted(Job::Verify));
        });
        handle.abort();
        let _ = handle.await;

        assert!(matches!(
            receiver.recv().await,
            Some(Update::Interrupted(Job::Export))
        ));
    }
}
