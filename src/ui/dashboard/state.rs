//! Dashboard state management
//!
//! Contains the main dashboard state struct and related enums

use crate::api::types::{ActivityEntry, Statistics, SystemStatus};
use crate::block_cursor::BlockCursor;
use crate::consts::dashboard_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::notifications::NotificationCenter;
use crate::workers::core::Update;
use crate::workers::exporter::ExportWorkflow;
use crate::workers::refresher::RefreshTracker;
use crate::workers::verifier::VerificationWorkflow;

use std::collections::VecDeque;
use std::time::Instant;

/// What the keyboard currently drives.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a block search query.
    Search,
}

/// Everything the dashboard shows. Owned and mutated by the dashboard loop
/// only; background jobs report through [`Update`]s.
#[derive(Debug)]
pub struct DashboardState {
    /// The backend the dashboard talks to.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,

    /// Last successfully loaded status, if any.
    pub status: Option<SystemStatus>,
    /// Last successfully loaded statistics, if any.
    pub statistics: Option<Statistics>,
    /// Block list and the block being inspected.
    pub cursor: BlockCursor,
    /// Recent activity from the last successful refresh.
    pub activity: Vec<ActivityEntry>,

    /// Whether the last refresh cycle succeeded.
    pub connected: bool,
    /// Local clock time of the last successful refresh.
    pub last_synced: Option<String>,
    pub refresh: RefreshTracker,
    pub verification: VerificationWorkflow,
    pub export: ExportWorkflow,
    pub notifications: NotificationCenter,

    /// Queue of updates waiting to be applied
    pub pending_updates: VecDeque<Update>,
    /// Event log for display
    pub activity_logs: VecDeque<WorkerEvent>,

    pub input_mode: InputMode,
    pub search_query: String,
    /// Whether the last non-blank search found nothing.
    pub search_missed: bool,

    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(environment: Environment, with_background_color: bool) -> Self {
        Self {
            environment,
            start_time: Instant::now(),
            status: None,
            statistics: None,
            cursor: BlockCursor::new(),
            activity: Vec::new(),
            connected: false,
            last_synced: None,
            refresh: RefreshTracker::new(),
            verification: VerificationWorkflow::new(),
            export: ExportWorkflow::new(),
            notifications: NotificationCenter::default(),
            pending_updates: VecDeque::new(),
            activity_logs: VecDeque::new(),
            input_mode: InputMode::Normal,
            search_query: String::new(),
            search_missed: false,
            with_background_color,
            tick: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.refresh.is_loading()
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an update to the processing queue
    pub fn add_update(&mut self, update: Update) {
        self.pending_updates.push_back(update);
    }
}
