//! Dashboard refresh cycle
//!
//! One cycle pulls status, statistics, the block list and recent activity
//! concurrently. The first three are required: if any of them fails the whole
//! cycle fails and the dashboard keeps what it showed before. Recent activity
//! is optional and degrades to an empty list.

use super::core::{CompletionGuard, Job, Update, UpdateSender};
use crate::api::LedgerApi;
use crate::api::error::ApiError;
use crate::api::types::{ActivityEntry, Block, Statistics, SystemStatus};
use futures::future::join4;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

/// A required resource of the refresh cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum Resource {
    #[strum(serialize = "status")]
    Status,
    #[strum(serialize = "statistics")]
    Statistics,
    #[strum(serialize = "block list")]
    Blocks,
}

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("{resource} request failed: {source}")]
    Required { resource: Resource, source: ApiError },

    #[error("refresh timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("refresh was interrupted")]
    Interrupted,
}

/// Everything one successful refresh cycle delivers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub status: SystemStatus,
    pub statistics: Statistics,
    pub blocks: Vec<Block>,
    pub activity: Vec<ActivityEntry>,
}

/// Generation bookkeeping for overlapping refreshes.
///
/// Every refresh gets a generation number when it starts. Only the result of
/// the newest generation is applied; anything older has been superseded.
/// The dashboard is loading while the newest generation is unsettled.
#[derive(Debug, Default, Clone)]
pub struct RefreshTracker {
    issued: u64,
    settled: u64,
}

impl RefreshTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation and returns its number.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Settles `generation`. Returns false when the result is stale or was
    /// already settled, in which case it must be ignored.
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.issued || generation <= self.settled {
            return false;
        }
        self.settled = generation;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.issued > self.settled
    }

    /// True once at least one refresh has finished, successfully or not.
    pub fn has_settled(&self) -> bool {
        self.settled > 0
    }
}

/// Fetches one snapshot. All four requests are in flight at the same time.
pub async fn fetch_snapshot(api: &dyn LedgerApi) -> Result<Snapshot, RefreshError> {
    let (status, statistics, blocks, activity) = join4(
        api.get_status(),
        api.get_statistics(),
        api.get_blocks(),
        api.get_recent_activity(),
    )
    .await;

    let status = required(Resource::Status, status)?;
    let statistics = required(Resource::Statistics, statistics)?;
    let blocks = required(Resource::Blocks, blocks)?;
    let activity = activity.unwrap_or_else(|e| {
        log::debug!("Recent activity unavailable: {}", e);
        Vec::new()
    });

    Ok(Snapshot {
        status,
        statistics,
        blocks,
        activity,
    })
}

/// [`fetch_snapshot`] bounded by a deadline for the whole cycle.
pub async fn fetch_snapshot_within(
    api: &dyn LedgerApi,
    limit: Duration,
) -> Result<Snapshot, RefreshError> {
    tokio::time::timeout(limit, fetch_snapshot(api))
        .await
        .map_err(|_| RefreshError::Timeout(limit))?
}

/// Runs one refresh cycle in the background and reports it as
/// [`Update::Refreshed`]. The cycle reports even when it is aborted.
pub fn spawn_refresh(
    api: Arc<dyn LedgerApi>,
    generation: u64,
    updates: UpdateSender,
    limit: Duration,
) -> JoinHandle<()> {
    let guard = CompletionGuard::new(Job::Refresh { generation }, updates);
    tokio::spawn(async move {
        let outcome = fetch_snapshot_within(api.as_ref(), limit).await;
        guard.complete(Update::Refreshed {
            generation,
            outcome,
        });
    })
}

fn required<T>(resource: Resource, result: Result<T, ApiError>) -> Result<T, RefreshError> {
    result.map_err(|source| RefreshError::Required { resource, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockLedgerApi;
    use crate::api::types::{AuditArtifact, VerificationResult};
    use crate::environment::Environment;

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            message: "boom".to_string(),
        }
    }

    fn sample_blocks() -> Vec<Block> {
        (0..3)
            .map(|index| Block {
                index,
                data: format!("Voter_{:04} voted", index),
                hash: format!("000{}", index),
                ..Default::default()
            })
            .collect()
    }

    fn healthy_api() -> MockLedgerApi {
        let mut api = MockLedgerApi::new();
        api.expect_get_status().times(1).returning(|| {
            Ok(SystemStatus {
                online: true,
                block_height: 3,
                ..Default::default()
            })
        });
        api.expect_get_statistics()
            .times(1)
            .returning(|| Ok(Statistics::default()));
        api.expect_get_blocks()
            .times(1)
            .returning(|| Ok(sample_blocks()));
        api
    }

    #[tokio::test]
    async fn snapshot_contains_every_resource() {
        let mut api = healthy_api();
        api.expect_get_recent_activity().times(1).returning(|| {
            Ok(vec![ActivityEntry {
                time: "10:02 AM".to_string(),
                index: Some(2),
                status: "verified".to_string(),
            }])
        });

        let snapshot = fetch_snapshot(&api).await.unwrap();
        assert!(snapshot.status.online);
        assert_eq!(snapshot.blocks.len(), 3);
        assert_eq!(snapshot.activity.len(), 1);
    }

    #[tokio::test]
    async fn missing_activity_is_not_fatal() {
        let mut api = healthy_api();
        api.expect_get_recent_activity()
            .times(1)
            .returning(|| Err(http(500)));

        let snapshot = fetch_snapshot(&api).await.unwrap();
        assert!(snapshot.activity.is_empty());
        assert_eq!(snapshot.blocks.len(), 3);
    }

    #[tokio::test]
    async fn one_required_failure_fails_the_cycle() {
        let mut api = MockLedgerApi::new();
        api.expect_get_status()
            .times(1)
            .returning(|| Ok(SystemStatus::default()));
        api.expect_get_statistics()
            .times(1)
            .returning(|| Err(http(503)));
        api.expect_get_blocks()
            .times(1)
            .returning(|| Ok(sample_blocks()));
        api.expect_get_recent_activity()
            .times(1)
            .returning(|| Ok(Vec::new()));

        match fetch_snapshot(&api).await {
            Err(RefreshError::Required { resource, source }) => {
                assert_eq!(resource, Resource::Statistics);
                assert_eq!(source.status(), Some(503));
            }
            other => panic!("expected statistics failure, got {:?}", other),
        }
    }

    /// Never answers anything.
    struct StalledApi {
        environment: Environment,
    }

    #[async_trait::async_trait]
    impl LedgerApi for StalledApi {
        fn environment(&self) -> &Environment {
            &self.environment
        }
        async fn get_status(&self) -> Result<SystemStatus, ApiError> {
            std::future::pending().await
        }
        async fn get_statistics(&self) -> Result<Statistics, ApiError> {
            std::future::pending().await
        }
        async fn get_blocks(&self) -> Result<Vec<Block>, ApiError> {
            std::future::pending().await
        }
        async fn get_recent_activity(&self) -> Result<Vec<ActivityEntry>, ApiError> {
            std::future::pending().await
        }
        async fn get_block(&self, _index: u64) -> Result<Block, ApiError> {
            std::future::pending().await
        }
        async fn verify_chain(&self) -> Result<VerificationResult, ApiError> {
            std::future::pending().await
        }
        async fn export_audit(&self) -> Result<AuditArtifact, ApiError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn stalled_cycle_times_out() {
        let api = StalledApi {
            environment: Environment::default(),
        };
        let result = fetch_snapshot_within(&api, Duration::from_millis(20)).await;
        assert!(matches!(result, Err(RefreshError::Timeout(_))));
    }

    #[tokio::test]
    async fn aborted_refresh_still_settles() {
        let api: Arc<dyn LedgerApi> = Arc::new(StalledApi {
            environment: Environment::default(),
        });
        let (updates, mut receiver) = UpdateSender::channel();
        let handle = spawn_refresh(api, 4, updates, Duration::from_secs(60));
        handle.abort();

        assert!(matches!(
            receiver.recv().await,
            Some(Update::Interrupted(Job::Refresh { generation: 4 }))
        ));
    }

    #[test]
    fn only_the_newest_generation_settles() {
        let mut tracker = RefreshTracker::new();
        assert!(!tracker.is_loading());
        assert!(!tracker.has_settled());

        let first = tracker.begin();
        let second = tracker.begin();
        assert!(tracker.is_loading());

        assert!(!tracker.settle(first));
        assert!(tracker.is_loading());

        assert!(tracker.settle(second));
        assert!(!tracker.is_loading());
        assert!(tracker.has_settled());

        // A late duplicate is ignored.
        assert!(!tracker.settle(second));
    }
}
