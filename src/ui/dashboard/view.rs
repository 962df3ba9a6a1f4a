//! Render description of the dashboard
//!
//! Built from the dashboard state without touching the terminal, so every
//! decision about what is shown (ranking, badges, enablement, empty states)
//! can be tested on its own. The components only lay these values out.

use super::state::{DashboardState, InputMode};
use crate::api::types::{ActivityEntry, Block, Statistics, SystemStatus, VerificationResult};
use crate::block_cursor::BlockCursor;
use crate::format::{
    UNKNOWN, format_count, format_percent, format_timestamp, percent_ratio, sanitize,
    sanitize_or_unknown,
};
use crate::notifications::NotificationKind;
use crate::workers::verifier::CONFIRMATIONS;
use std::collections::BTreeMap;

pub const NO_BLOCKS_MESSAGE: &str = "No blocks recorded yet";
pub const NO_VOTES_MESSAGE: &str = "No votes recorded yet";
pub const NO_ACTIVITY_MESSAGE: &str = "No recent activity";
pub const VERIFIED_BADGE: &str = "VERIFIED & SIGNED";
pub const FLAGGED_BADGE: &str = "INTEGRITY ISSUE";
pub const GENESIS_PREV_HASH: &str = "Genesis Block";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Connection {
    /// No refresh has finished yet.
    Connecting,
    Connected,
    Disconnected,
}

impl Connection {
    pub fn label(self) -> &'static str {
        match self {
            Connection::Connecting => "CONNECTING",
            Connection::Connected => "CONNECTED",
            Connection::Disconnected => "DISCONNECTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub connection: Connection,
    /// What the backend says about itself. May disagree with `connection`.
    pub backend_online: Option<bool>,
    pub last_update: String,
    pub security_status: String,
    pub chain_integrity: String,
    pub block_height: String,
    pub votes_cast: String,
    pub verified_blocks: String,
    pub last_synced: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsView {
    pub total_votes: String,
    pub total_blocks: String,
    pub participation: String,
    pub participation_ratio: f64,
    pub chain_integrity: Option<String>,
    pub voting_period: Option<(String, String, String)>,
    pub latest_block: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRow {
    pub rank: usize,
    pub name: String,
    pub count: u64,
    pub count_label: String,
    pub percent_label: String,
    pub ratio: f64,
    pub leading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CandidatesView {
    Empty(&'static str),
    Ranked(Vec<CandidateRow>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockView {
    pub title: String,
    pub genesis: bool,
    pub badge: &'static str,
    pub flagged: bool,
    pub issues: Vec<String>,
    pub data: String,
    pub hash: String,
    pub prev_hash: String,
    pub timestamp: String,
    pub nonce: String,
    pub position: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExplorerView {
    /// No navigation controls are offered.
    Empty(&'static str),
    Block(Box<BlockView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    pub time: String,
    pub block: String,
    pub status: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityView {
    Empty(&'static str),
    Rows(Vec<ActivityRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationView {
    pub headline: String,
    pub summary: String,
    pub confirmations: [&'static str; 4],
    pub audit: String,
    pub steps: Vec<String>,
    /// One line per block the backend flagged, empty for a clean chain.
    pub problems: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsView {
    pub refresh: Control,
    pub verify: Control,
    pub export: Control,
    /// The query being typed, when searching.
    pub search: Option<String>,
    pub search_missed: bool,
    /// Name of the last audit report produced this session.
    pub last_export: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub status: StatusView,
    pub metrics: MetricsView,
    pub candidates: CandidatesView,
    pub explorer: ExplorerView,
    pub activity: ActivityView,
    pub verification: Option<VerificationView>,
    pub controls: ControlsView,
    pub notifications: Vec<NotificationView>,
}

impl DashboardView {
    pub fn build(state: &DashboardState) -> Self {
        let connection = if !state.refresh.has_settled() {
            Connection::Connecting
        } else if state.connected {
            Connection::Connected
        } else {
            Connection::Disconnected
        };
        let default_statistics = Statistics::default();
        let statistics = state.statistics.as_ref().unwrap_or(&default_statistics);
        let report = state.verification.report();

        Self {
            status: status_view(
                connection,
                state.status.as_ref(),
                state.last_synced.as_deref(),
            ),
            metrics: metrics_view(statistics),
            candidates: candidate_ranking(&statistics.candidate_results),
            explorer: explorer_view(&state.cursor, report),
            activity: activity_view(&state.activity),
            verification: report.map(verification_view),
            controls: ControlsView {
                refresh: Control {
                    label: if state.is_loading() {
                        "Refreshing..."
                    } else {
                        "Refresh"
                    },
                    enabled: true,
                },
                verify: Control {
                    label: state.verification.trigger_label(),
                    enabled: !state.verification.is_verifying(),
                },
                export: Control {
                    label: state.export.trigger_label(),
                    enabled: !state.export.is_busy(),
                },
                search: (state.input_mode == InputMode::Search)
                    .then(|| sanitize(&state.search_query)),
                search_missed: state.search_missed,
                last_export: state
                    .export
                    .last()
                    .map(|outcome| sanitize(outcome.filename())),
            },
            notifications: state
                .notifications
                .active()
                .map(|n| NotificationView {
                    kind: n.kind,
                    message: sanitize(&n.message),
                })
                .collect(),
        }
    }
}

pub fn status_view(
    connection: Connection,
    status: Option<&SystemStatus>,
    last_synced: Option<&str>,
) -> StatusView {
    match status {
        Some(status) => StatusView {
            connection,
            backend_online: Some(status.online),
            last_update: sanitize_or_unknown(&status.last_update_ago),
            security_status: sanitize_or_unknown(&status.security_status),
            chain_integrity: sanitize_or_unknown(&status.chain_integrity),
            block_height: format_count(status.block_height),
            votes_cast: format_count(status.votes_cast()),
            verified_blocks: format_count(status.verified_blocks),
            last_synced: last_synced.map(str::to_string),
        },
        None => StatusView {
            connection,
            backend_online: None,
            last_update: UNKNOWN.to_string(),
            security_status: UNKNOWN.to_string(),
            chain_integrity: UNKNOWN.to_string(),
            block_height: "-".to_string(),
            votes_cast: "-".to_string(),
            verified_blocks: "-".to_string(),
            last_synced: last_synced.map(str::to_string),
        },
    }
}

pub fn metrics_view(statistics: &Statistics) -> MetricsView {
    MetricsView {
        total_votes: format_count(statistics.total_votes),
        total_blocks: format_count(statistics.total_blocks),
        participation: format_percent(statistics.participation_rate),
        participation_ratio: percent_ratio(statistics.participation_rate),
        chain_integrity: statistics.chain_integrity.map(format_percent),
        voting_period: statistics.voting_period.as_ref().map(|period| {
            (
                sanitize_or_unknown(&period.start),
                sanitize_or_unknown(&period.end),
                sanitize_or_unknown(&period.remaining),
            )
        }),
        latest_block: statistics
            .latest_block
            .as_ref()
            .map(|latest| format!("#{}", latest.index)),
    }
}

/// Candidates by vote count, highest first; ties are ordered by name.
/// Every candidate sharing the top count leads, as long as that count is
/// above zero.
pub fn candidate_ranking(
    results: &BTreeMap<String, crate::api::types::CandidateResult>,
) -> CandidatesView {
    if results.is_empty() {
        return CandidatesView::Empty(NO_VOTES_MESSAGE);
    }

    let mut ranked: Vec<_> = results.iter().collect();
    ranked.sort_by(|(a_name, a), (b_name, b)| b.count.cmp(&a.count).then(a_name.cmp(b_name)));
    let top = ranked.first().map(|(_, r)| r.count).unwrap_or(0);

    CandidatesView::Ranked(
        ranked
            .into_iter()
            .enumerate()
            .map(|(i, (name, result))| CandidateRow {
                rank: i + 1,
                name: sanitize_or_unknown(name),
                count: result.count,
                count_label: format!("{} votes", format_count(result.count)),
                percent_label: format_percent(result.percentage),
                ratio: percent_ratio(result.percentage),
                leading: top > 0 && result.count == top,
            })
            .collect(),
    )
}

pub fn explorer_view(cursor: &BlockCursor, report: Option<&VerificationResult>) -> ExplorerView {
    match cursor.current_block() {
        None => ExplorerView::Empty(NO_BLOCKS_MESSAGE),
        Some(block) => ExplorerView::Block(Box::new(block_view(
            block,
            cursor.current_index(),
            cursor.len(),
            report,
        ))),
    }
}

fn block_view(
    block: &Block,
    position: usize,
    total: usize,
    report: Option<&VerificationResult>,
) -> BlockView {
    let flagged_report = report.and_then(|report| {
        report
            .failing_blocks()
            .find(|failing| failing.block_index == block.index)
    });
    let prev_hash = match &block.prev_hash {
        Some(hash) => sanitize_or_unknown(hash),
        None if block.is_genesis() => GENESIS_PREV_HASH.to_string(),
        None => UNKNOWN.to_string(),
    };

    BlockView {
        title: format!("BLOCK #{}", block.index),
        genesis: block.is_genesis(),
        badge: if flagged_report.is_some() {
            FLAGGED_BADGE
        } else {
            VERIFIED_BADGE
        },
        flagged: flagged_report.is_some(),
        issues: flagged_report
            .map(|r| r.issues.iter().map(|issue| sanitize(issue)).collect())
            .unwrap_or_default(),
        data: sanitize_or_unknown(&block.data),
        hash: sanitize_or_unknown(&block.hash),
        prev_hash,
        timestamp: format_timestamp(block.timestamp),
        nonce: block.nonce.to_string(),
        position: format!("{} of {}", position + 1, total),
        prev_enabled: position > 0,
        next_enabled: position + 1 < total,
    }
}

pub fn activity_view(entries: &[ActivityEntry]) -> ActivityView {
    if entries.is_empty() {
        return ActivityView::Empty(NO_ACTIVITY_MESSAGE);
    }
    ActivityView::Rows(
        entries
            .iter()
            .map(|entry| ActivityRow {
                time: sanitize_or_unknown(&entry.time),
                block: match entry.index {
                    Some(index) => format!("Block #{}", index),
                    None => "Block #?".to_string(),
                },
                status: sanitize_or_unknown(&entry.status),
                verified: entry.is_verified(),
            })
            .collect(),
    )
}

pub fn verification_view(report: &VerificationResult) -> VerificationView {
    let problems: Vec<String> = report
        .failing_blocks()
        .map(|failing| {
            let issues = if failing.issues.is_empty() {
                "invalid".to_string()
            } else {
                failing
                    .issues
                    .iter()
                    .map(|issue| sanitize(issue))
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            format!("Block #{}: {}", failing.block_index, issues)
        })
        .collect();

    let (headline, summary) = if problems.is_empty() {
        (
            "CHAIN VERIFICATION COMPLETE".to_string(),
            format!(
                "All {} blocks successfully verified",
                format_count(report.total_blocks)
            ),
        )
    } else {
        (
            "CHAIN VERIFICATION FOUND ISSUES".to_string(),
            format!(
                "{} of {} blocks failed verification",
                problems.len(),
                format_count(report.total_blocks)
            ),
        )
    };

    let audit_id = report
        .audit_id
        .as_deref()
        .map(sanitize_or_unknown)
        .unwrap_or_else(|| UNKNOWN.to_string());

    VerificationView {
        headline,
        summary,
        confirmations: CONFIRMATIONS,
        audit: format!("Audit ID: {}", audit_id),
        steps: report
            .verification_steps
            .iter()
            .map(|step| sanitize_or_unknown(&step.step))
            .collect(),
        problems,
    }
}
