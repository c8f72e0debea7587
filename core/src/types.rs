//! Shared primitive types used across the report pipeline.

/// A client's stable identifier in the source database.
pub type ClientId = i64;

/// A payment's stable identifier in the source database.
pub type TransactionId = i64;
