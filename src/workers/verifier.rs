//! Chain verification workflow

use super::core::{CompletionGuard, Job, Update, UpdateSender};
use crate::api::LedgerApi;
use crate::api::error::ApiError;
use crate::api::types::VerificationResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Facts confirmed by every successful verification, in display order.
pub const CONFIRMATIONS: [&str; 4] = [
    "Hash consistency: Valid",
    "Digital signatures: Authentic",
    "Timestamp order: Sequential",
    "Proof-of-Work: Verified",
];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, strum::Display)]
pub enum VerificationPhase {
    #[default]
    Idle,
    Verifying,
}

/// `Idle -> Verifying -> Idle`, keeping the last successful report.
///
/// A failed verification does not clear the previous report.
#[derive(Debug, Default, Clone)]
pub struct VerificationWorkflow {
    phase: VerificationPhase,
    report: Option<VerificationResult>,
}

impl VerificationWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters `Verifying`. Returns false when a verification is already running.
    pub fn try_begin(&mut self) -> bool {
        if self.phase == VerificationPhase::Verifying {
            return false;
        }
        self.phase = VerificationPhase::Verifying;
        true
    }

    /// Back to `Idle`, storing the report when there is one.
    pub fn finish(
        &mut self,
        outcome: Result<VerificationResult, ApiError>,
    ) -> Result<&VerificationResult, ApiError> {
        self.phase = VerificationPhase::Idle;
        let report = outcome?;
        Ok(&*self.report.insert(report))
    }

    /// Back to `Idle` without a result.
    pub fn abandon(&mut self) {
        self.phase = VerificationPhase::Idle;
    }

    pub fn phase(&self) -> VerificationPhase {
        self.phase
    }

    pub fn is_verifying(&self) -> bool {
        self.phase == VerificationPhase::Verifying
    }

    pub fn report(&self) -> Option<&VerificationResult> {
        self.report.as_ref()
    }

    pub fn trigger_label(&self) -> &'static str {
        match self.phase {
            VerificationPhase::Idle => "Verify Chain",
            VerificationPhase::Verifying => "Verifying...",
        }
    }
}

/// Runs one verification in the background and reports it as [`Update::Verified`].
pub fn spawn_verification(api: Arc<dyn LedgerApi>, updates: UpdateSender) -> JoinHandle<()> {
    let guard = CompletionGuard::new(Job::Verify, updates);
    tokio::spawn(async move {
        let outcome = api.verify_chain().await;
        guard.complete(Update::Verified(outcome));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockLedgerApi;

    fn report(total_blocks: u64) -> VerificationResult {
        VerificationResult {
            total_blocks,
            ..Default::default()
        }
    }

    #[test]
    fn second_begin_is_refused_while_verifying() {
        let mut workflow = VerificationWorkflow::new();
        assert!(workflow.try_begin());
        assert_eq!(workflow.trigger_label(), "Verifying...");
        assert!(!workflow.try_begin());

        workflow.finish(Ok(report(5))).unwrap();
        assert_eq!(workflow.phase(), VerificationPhase::Idle);
        assert_eq!(workflow.trigger_label(), "Verify Chain");
        assert!(workflow.try_begin());
    }

    #[test]
    fn failure_keeps_previous_report() {
        let mut workflow = VerificationWorkflow::new();
        workflow.try_begin();
        workflow.finish(Ok(report(5))).unwrap();

        workflow.try_begin();
        let error = workflow
            .finish(Err(ApiError::Http {
                status: 500,
                message: "down".to_string(),
            }))
            .unwrap_err();
        assert_eq!(error.status(), Some(500));
        assert!(!workflow.is_verifying());
        assert_eq!(workflow.report().map(|r| r.total_blocks), Some(5));
    }

    #[tokio::test]
    async fn spawned_verification_reports_result() {
        let mut api = MockLedgerApi::new();
        api.expect_verify_chain()
            .times(1)
            .returning(|| Ok(report(13)));
        let (updates, mut receiver) = UpdateSender::channel();

        spawn_verification(Arc::new(api), updates).await.unwrap();

        match receiver.recv().await {
            Some(Update::Verified(Ok(result))) => assert_eq!(result.total_blocks, 13),
            other => panic!("unexpected update {:?}", other),
        }
    }
}
