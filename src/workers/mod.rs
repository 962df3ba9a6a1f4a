//! Background jobs of the dashboard and the plumbing that drives them

pub mod core;
pub mod dispatcher;
pub mod exporter;
pub mod heartbeat;
pub mod refresher;
pub mod verifier;
