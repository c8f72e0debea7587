use crate::types::{ClientId, TransactionId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Payment {transaction_id} has a null or out-of-range transaction_date")]
    BadTimestamp { transaction_id: TransactionId },

    #[error("Payment {transaction_id} references client {client_id}, which is not loaded")]
    UnknownClient {
        transaction_id: TransactionId,
        client_id: ClientId,
    },

    #[error("No payments loaded; summary statistics are undefined")]
    EmptyPayments,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
