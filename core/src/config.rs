//! Run configuration — source database, table names, output paths.
//!
//! All values are fixed for a run. Defaults match the production layout;
//! a JSON file with the same shape can override them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputPaths {
    pub clients_csv: String,
    pub payments_csv: String,
    pub report_json: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub database_location: String,
    pub client_table_name: String,
    pub payment_table_name: String,
    pub output_paths: OutputPaths,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            database_location: "testing.db".into(),
            client_table_name: "clients".into(),
            payment_table_name: "payments".into(),
            output_paths: OutputPaths {
                clients_csv: "client_details.csv".into(),
                payments_csv: "payments.csv".into(),
                report_json: "payments_report.json".into(),
            },
        }
    }
}

impl ReportConfig {
    /// Load from a JSON file with the same shape as this struct.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ReportConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
