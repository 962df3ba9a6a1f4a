pub mod dashboard_consts {
    //! Dashboard Configuration Constants
    //!
    //! Timing, sizing and naming constants for the dashboard, grouped by the
    //! workflow that uses them.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the event log.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of notifications shown at once. Older ones are dropped first.
    pub const MAX_NOTIFICATIONS: usize = 4;

    // =============================================================================
    // REFRESH CONFIGURATION
    // =============================================================================

    pub mod refresh {
        use std::time::Duration;

        /// Heartbeat period between automatic refreshes (seconds)
        pub const INTERVAL_SECS: u64 = 15;

        /// Longest accepted refresh period (seconds), one day
        pub const MAX_INTERVAL_SECS: u64 = 86_400;

        /// Upper bound for one whole refresh cycle (milliseconds).
        /// Slightly above the per-request timeout so a single slow resource
        /// reports its own error first.
        pub const CYCLE_TIMEOUT_MS: u64 = 12_000;

        pub const fn cycle_timeout() -> Duration {
            Duration::from_millis(CYCLE_TIMEOUT_MS)
        }
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod http {
        use std::time::Duration;

        /// Connect timeout for every backend request (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Total timeout for every backend request (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // NOTIFICATIONS
    // =============================================================================

    pub mod notifications {
        use std::time::Duration;

        /// How long a notification stays on screen (milliseconds)
        pub const LIFETIME_MS: u64 = 4_000;

        pub const fn lifetime() -> Duration {
            Duration::from_millis(LIFETIME_MS)
        }
    }

    // =============================================================================
    // AUDIT EXPORT
    // =============================================================================

    /// File name used when the backend does not suggest one.
    pub const DEFAULT_AUDIT_FILENAME: &str = "audit_report.pdf";

    /// Message shown when an export failure carries no readable reason.
    pub const GENERIC_EXPORT_ERROR: &str = "Export failed";

    // =============================================================================
    // UI
    // =============================================================================

    /// How long the first-visit splash screen stays up (milliseconds)
    pub const SPLASH_DURATION_MS: u64 = 2_000;

    /// Key poll interval of the terminal loop (milliseconds)
    pub const UI_POLL_INTERVAL_MS: u64 = 100;
}
