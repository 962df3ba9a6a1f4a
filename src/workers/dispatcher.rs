//! Turns commands into background jobs
//!
//! The dispatcher is driven by the dashboard loop, which owns the state. It
//! flips the state into its busy phases before a job starts, so a second
//! request for a job that is already running never reaches the backend.

use super::core::{Command, UpdateSender};
use super::{exporter, refresher, verifier};
use crate::api::LedgerApi;
use crate::consts::dashboard_consts::refresh;
use crate::ui::dashboard::DashboardState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;

pub struct Dispatcher {
    api: Arc<dyn LedgerApi>,
    updates: UpdateSender,
    download_dir: PathBuf,
    refresh_timeout: Duration,
    /// The refresh currently in flight, aborted when a newer one starts.
    inflight_refresh: Option<AbortHandle>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn LedgerApi>, updates: UpdateSender, download_dir: PathBuf) -> Self {
        Self {
            api,
            updates,
            download_dir,
            refresh_timeout: refresh::cycle_timeout(),
            inflight_refresh: None,
        }
    }

    pub fn dispatch(&mut self, command: Command, state: &mut DashboardState) {
        match command {
            Command::Refresh => {
                self.refresh(state);
            }
            Command::ForceResync => {
                state.notifications.info("Chain resync initiated");
                self.refresh(state);
            }
            Command::Verify => {
                self.verify(state);
            }
            Command::Export => {
                self.export(state);
            }
        }
    }

    /// Starts a refresh cycle and returns its generation. A cycle still in
    /// flight is superseded: it is aborted and its result would be ignored.
    pub fn refresh(&mut self, state: &mut DashboardState) -> u64 {
        let generation = state.refresh.begin();
        if let Some(stale) = self.inflight_refresh.take() {
            stale.abort();
        }
        let handle = refresher::spawn_refresh(
            self.api.clone(),
            generation,
            self.updates.clone(),
            self.refresh_timeout,
        );
        self.inflight_refresh = Some(handle.abort_handle());
        generation
    }

    /// Starts a verification unless one is running. Returns whether it started.
    pub fn verify(&self, state: &mut DashboardState) -> bool {
        if !state.verification.try_begin() {
            log::debug!("Verification already in progress");
            return false;
        }
        verifier::spawn_verification(self.api.clone(), self.updates.clone());
        true
    }

    /// Starts an export unless one is running. Returns whether it started.
    pub fn export(&self, state: &mut DashboardState) -> bool {
        if !state.export.try_begin() {
            log::debug!("Export already in progress");
            return false;
        }
        exporter::spawn_export(
            self.api.clone(),
            self.download_dir.clone(),
            self.updates.clone(),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockLedgerApi;
    use crate::api::types::{AuditArtifact, VerificationResult};
    use crate::environment::Environment;
    use crate::workers::core::Update;
    use tempfile::tempdir;

    fn state() -> DashboardState {
        DashboardState::new(Environment::default(), false)
    }

    #[tokio::test]
    async fn double_verify_reaches_backend_once() {
        let mut api = MockLedgerApi::new();
        api.expect_verify_chain()
            .times(1)
            .returning(|| Ok(VerificationResult::default()));
        let (updates, mut receiver) = UpdateSender::channel();
        let mut dispatcher = Dispatcher::new(Arc::new(api), updates, PathBuf::from("."));
        let mut state = state();

        dispatcher.dispatch(Command::Verify, &mut state);
        dispatcher.dispatch(Command::Verify, &mut state);
        assert!(state.verification.is_verifying());

        let update = receiver.recv().await.unwrap();
        assert!(matches!(update, Update::Verified(Ok(_))));
        state.add_update(update);
        state.update();
        assert!(!state.verification.is_verifying());
    }

    #[tokio::test]
    async fn double_export_reaches_backend_once() {
        let dir = tempdir().unwrap();
        let mut api = MockLedgerApi::new();
        api.expect_export_audit().times(1).returning(|| {
            Ok(AuditArtifact {
                content_type: Some("application/json".to_string()),
                content_disposition: None,
                body: br#"{"filename":"audit_1.pdf"}"#.to_vec(),
            })
        });
        let (updates, mut receiver) = UpdateSender::channel();
        let mut dispatcher = Dispatcher::new(Arc::new(api), updates, dir.path().to_path_buf());
        let mut state = state();

        dispatcher.dispatch(Command::Export, &mut state);
        dispatcher.dispatch(Command::Export, &mut state);
        assert!(state.export.is_busy());

        let update = receiver.recv().await.unwrap();
        assert!(matches!(update, Update::Exported(Ok(_))));
    }

    #[tokio::test]
    async fn newer_refresh_supersedes_older() {
        let (updates, mut receiver) = UpdateSender::channel();
        let mut api = MockLedgerApi::new();
        api.expect_get_status()
            .returning(|| Ok(Default::default()));
        api.expect_get_statistics()
            .returning(|| Ok(Default::default()));
        api.expect_get_blocks().returning(|| Ok(Vec::new()));
        api.expect_get_recent_activity()
            .returning(|| Ok(Vec::new()));
        let mut dispatcher = Dispatcher::new(Arc::new(api), updates, PathBuf::from("."));
        let mut state = state();

        let first = dispatcher.refresh(&mut state);
        let second = dispatcher.refresh(&mut state);
        assert_eq!((first, second), (1, 2));

        // Both cycles report back, one way or another; only the second counts.
        let mut settled = Vec::new();
        for _ in 0..2 {
            let update = receiver.recv().await.unwrap();
            state.add_update(update);
            settled.extend(state.update());
        }
        assert!(!state.refresh.is_loading());
        assert!(state.connected);
        assert_eq!(settled.len(), 1);
    }
}
