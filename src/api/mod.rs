use crate::environment::Environment;
use crate::api::error::ApiError;
use crate::api::types::{
    ActivityEntry, AuditArtifact, Block, Statistics, SystemStatus, VerificationResult,
};

pub(crate) mod client;
pub use client::LedgerClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait LedgerApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Current chain status.
    async fn get_status(&self) -> Result<SystemStatus, ApiError>;

    /// Aggregate vote statistics.
    async fn get_statistics(&self) -> Result<Statistics, ApiError>;

    /// The full block list, in index order.
    async fn get_blocks(&self) -> Result<Vec<Block>, ApiError>;

    /// The latest few blocks, most recent first.
    async fn get_recent_activity(&self) -> Result<Vec<ActivityEntry>, ApiError>;

    /// A single block by index.
    async fn get_block(&self, index: u64) -> Result<Block, ApiError>;

    /// Asks the backend to verify the whole chain.
    async fn verify_chain(&self) -> Result<VerificationResult, ApiError>;

    /// Asks the backend for an audit report.
    async fn export_audit(&self) -> Result<AuditArtifact, ApiError>;
}
