//! Backend test support utilities
//!
//! Shared helpers for the backend's integration tests: one logging
//! bootstrap for every test binary and helpers for reading the per-connection
//! outboxes the match registry fans snapshots into.

pub mod logging;
pub mod outbox;
