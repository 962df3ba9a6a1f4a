//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod activity;
pub mod candidates;
pub mod explorer;
pub mod footer;
pub mod header;
pub mod logs;
pub mod notifications;
pub mod status;
pub mod verification;
