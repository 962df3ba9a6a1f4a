//! Response shapes served by the ledger backend.
//!
//! Every field is defaulted so that a partially filled or older backend
//! response still decodes. Only structurally wrong bodies are rejected.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// `GET /api/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemStatus {
    pub online: bool,
    pub last_update_ago: String,
    /// Clock time of the backend's last ledger reload.
    pub last_update: Option<String>,
    pub security_status: String,
    pub chain_integrity: String,
    pub block_height: u64,
    pub verified_blocks: u64,
    pub auto_refresh: Option<bool>,
}

impl SystemStatus {
    /// Votes cast so far. The genesis block does not carry a vote.
    pub fn votes_cast(&self) -> u64 {
        self.block_height.saturating_sub(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VotingPeriod {
    pub start: String,
    pub end: String,
    pub remaining: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateResult {
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatestBlock {
    pub index: u64,
}

/// `GET /api/statistics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub total_blocks: u64,
    pub total_votes: u64,
    pub participation_rate: f64,
    pub verified_blocks: u64,
    pub chain_integrity: Option<f64>,
    pub voting_period: Option<VotingPeriod>,
    pub candidate_results: BTreeMap<String, CandidateResult>,
    pub latest_block: Option<LatestBlock>,
}

/// One entry of `GET /api/blockchain`, also served alone by `GET /api/block/<index>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Block {
    pub index: u64,
    pub data: String,
    pub hash: String,
    /// Absent for the genesis block. An empty string counts as absent.
    #[serde(rename = "prevHash", deserialize_with = "empty_as_none")]
    pub prev_hash: Option<String>,
    /// Unix seconds.
    pub timestamp: i64,
    pub nonce: u64,
}

impl Block {
    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }
}

/// One entry of `GET /api/activity/recent`, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityEntry {
    pub time: String,
    pub index: Option<u64>,
    pub status: String,
}

impl ActivityEntry {
    pub fn is_verified(&self) -> bool {
        self.status == "Verified"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationStep {
    pub step: String,
    pub status: Option<String>,
}

/// Per-block verdict attached to a verification result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockReport {
    pub block_index: u64,
    pub valid: bool,
    pub issues: Vec<String>,
    pub hash: String,
}

/// `POST /api/verify`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationResult {
    pub total_blocks: u64,
    pub verification_steps: Vec<VerificationStep>,
    pub audit_id: Option<String>,
    pub valid: Option<bool>,
    pub blocks: Vec<BlockReport>,
}

impl VerificationResult {
    /// Blocks the backend reported as invalid, in chain order.
    pub fn failing_blocks(&self) -> impl Iterator<Item = &BlockReport> {
        self.blocks.iter().filter(|report| !report.valid)
    }
}

/// Raw successful answer of `GET /api/export/audit`.
///
/// The body is either the artifact itself or a JSON description of it; the
/// export workflow decides which from `content_type`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditArtifact {
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
