//! Report assembly and serialization.
//!
//! Two top-level fields, emitted in this order: `summary`, then
//! `records`. Every aggregate is already a plain number or string by the
//! time it lands here — nothing numeric-wrapper-shaped survives into the
//! output.

use crate::error::{ReportError, ReportResult};
use crate::records::{build_client_records, ClientRecord};
use crate::store::{Client, Payment};
use crate::summary::{build_summary, Summary};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub records: Vec<ClientRecord>,
}

impl Report {
    pub fn build(clients: &[Client], payments: &[Payment]) -> ReportResult<Self> {
        Ok(Self {
            summary: build_summary(clients, payments)?,
            records: build_client_records(clients, payments)?,
        })
    }

    /// Render as human-readable JSON with 4-space indentation. Key order
    /// follows struct declaration order.
    pub fn to_json(&self) -> ReportResult<String> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn write_to(&self, path: &str) -> ReportResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ReportError::Write {
            path: path.to_string(),
            source,
        })
    }
}
