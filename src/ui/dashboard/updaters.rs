//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from job results and
//! from user input

use super::state::{DashboardState, InputMode};
use super::utils::clean_http_error_message;

use crate::api::error::ApiError;
use crate::api::types::VerificationResult;
use crate::block_cursor::Direction;
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{Event as WorkerEvent, EventType};
use crate::workers::core::{Job, Update};
use crate::workers::exporter::{ExportError, ExportOutcome};
use crate::workers::refresher::{RefreshError, Snapshot};

use chrono::Local;
use std::time::Instant;

impl DashboardState {
    /// Advance the animation tick, apply every queued update and expire old
    /// notifications. Returns the events produced, oldest first.
    pub fn update(&mut self) -> Vec<WorkerEvent> {
        self.update_at(Instant::now())
    }

    pub fn update_at(&mut self, now: Instant) -> Vec<WorkerEvent> {
        self.tick += 1;

        let mut events = Vec::new();
        while let Some(update) = self.pending_updates.pop_front() {
            if let Some(event) = self.process_update(update) {
                self.add_to_activity_log(event.clone());
                events.push(event);
            }
        }

        self.notifications.prune(now);
        events
    }

    fn process_update(&mut self, update: Update) -> Option<WorkerEvent> {
        match update {
            Update::Refreshed {
                generation,
                outcome,
            } => self.apply_refresh(generation, outcome),
            Update::Verified(outcome) => Some(self.apply_verification(outcome)),
            Update::Exported(outcome) => Some(self.apply_export(outcome)),
            Update::Interrupted(job) => self.apply_interruption(job),
        }
    }

    /// Applies a refresh result. Results of superseded cycles are dropped.
    ///
    /// A successful cycle replaces every section at once. A failed one leaves
    /// every section as it was and only marks the dashboard disconnected.
    pub fn apply_refresh(
        &mut self,
        generation: u64,
        outcome: Result<Snapshot, RefreshError>,
    ) -> Option<WorkerEvent> {
        if !self.refresh.settle(generation) {
            log::debug!("Ignoring superseded refresh #{}", generation);
            return None;
        }

        match outcome {
            Ok(snapshot) => {
                let block_count = snapshot.blocks.len();
                let height = snapshot.status.block_height;
                self.status = Some(snapshot.status);
                self.statistics = Some(snapshot.statistics);
                self.cursor.set_blocks(snapshot.blocks);
                self.activity = snapshot.activity;
                self.connected = true;
                self.last_synced = Some(Local::now().format("%H:%M:%S").to_string());
                Some(WorkerEvent::refresher(
                    format!("Synced {} blocks (height {})", block_count, height),
                    EventType::Refresh,
                    LogLevel::Info,
                ))
            }
            Err(e) => {
                self.connected = false;
                let message = format!("Failed to load dashboard data: {}", e);
                self.notifications.error(clean_http_error_message(&message));
                Some(WorkerEvent::refresher(
                    message,
                    EventType::Error,
                    ErrorClassifier::new().classify_refresh_error(&e),
                ))
            }
        }
    }

    pub fn apply_verification(
        &mut self,
        outcome: Result<VerificationResult, ApiError>,
    ) -> WorkerEvent {
        match self.verification.finish(outcome) {
            Ok(report) => {
                let failing = report.failing_blocks().count();
                let message = if failing == 0 {
                    format!(
                        "Chain verification complete: {} blocks verified",
                        report.total_blocks
                    )
                } else {
                    format!(
                        "Chain verification complete: {} of {} blocks failed",
                        failing, report.total_blocks
                    )
                };
                if failing == 0 {
                    self.notifications.success(message.clone());
                } else {
                    self.notifications.error(message.clone());
                }
                WorkerEvent::verifier(message, EventType::Success, LogLevel::Info)
            }
            Err(e) => {
                let message = format!("Failed to verify blockchain: {}", e);
                self.notifications.error(clean_http_error_message(&message));
                WorkerEvent::verifier(
                    message,
                    EventType::Error,
                    ErrorClassifier::new().classify_api_error(&e),
                )
            }
        }
    }

    pub fn apply_export(
        &mut self,
        outcome: Result<ExportOutcome, ExportError>,
    ) -> WorkerEvent {
        match self.export.finish(outcome) {
            Ok(ExportOutcome::Saved { filename, path, .. }) => {
                let message = format!(
                    "Audit report \"{}\" saved to {}",
                    filename,
                    path.display()
                );
                self.notifications.success(message.clone());
                WorkerEvent::exporter(message, EventType::Success, LogLevel::Info)
            }
            Ok(ExportOutcome::Reported { filename }) => {
                let message = format!("Audit report \"{}\" generated successfully", filename);
                self.notifications.success(message.clone());
                WorkerEvent::exporter(message, EventType::Success, LogLevel::Info)
            }
            Err(e) => {
                let message = format!("Failed to generate audit report: {}", e);
                self.notifications.error(clean_http_error_message(&message));
                WorkerEvent::exporter(
                    message,
                    EventType::Error,
                    ErrorClassifier::new().classify_export_error(&e),
                )
            }
        }
    }

    fn apply_interruption(&mut self, job: Job) -> Option<WorkerEvent> {
        match job {
            Job::Refresh { generation } => {
                self.apply_refresh(generation, Err(RefreshError::Interrupted))
            }
            Job::Verify => {
                self.verification.abandon();
                let message = "Verification was interrupted".to_string();
                self.notifications.error(message.clone());
                Some(WorkerEvent::verifier(
                    message,
                    EventType::Error,
                    LogLevel::Error,
                ))
            }
            Job::Export => {
                self.export.abandon();
                let message = "Audit export was interrupted".to_string();
                self.notifications.error(message.clone());
                Some(WorkerEvent::exporter(
                    message,
                    EventType::Error,
                    LogLevel::Error,
                ))
            }
        }
    }

    /// Moves through the block list; a no-op at either end.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.cursor.navigate(direction)
    }

    pub fn begin_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.search_query.clear();
        self.search_missed = false;
    }

    /// Appends to the query and jumps to the first match, if any.
    pub fn push_search_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        self.search_query.push(c);
        self.run_search();
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.run_search();
    }

    /// Leaves search mode. The cursor stays wherever the search put it.
    pub fn end_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search_query.clear();
        self.search_missed = false;
    }

    fn run_search(&mut self) {
        let blank = self.search_query.trim().is_empty();
        let found = self.cursor.search(&self.search_query).is_some();
        self.search_missed = !blank && !found;
    }
}
