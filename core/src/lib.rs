//! Batch export and reporting over a clients/payments database.
//!
//! One linear pass: read both tables from SQLite, dump each as CSV,
//! aggregate payment statistics joined with client attributes, and emit
//! a nested summary + per-client-records JSON document.
//!
//! RULES:
//!   - Only store.rs talks to the database.
//!   - The report is built from fully loaded, immutable row sets.
//!   - No step mutates the source; a failed step aborts the run.

pub mod config;
pub mod dates;
pub mod error;
pub mod money;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod stats;
pub mod store;
pub mod summary;
pub mod types;
