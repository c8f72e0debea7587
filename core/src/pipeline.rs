//! The batch pipeline — the whole run, in order.
//!
//! EXECUTION ORDER (fixed):
//!   1. Export the client table as CSV.
//!   2. Export the payment table as CSV.
//!   3. Load both tables into typed rows.
//!   4. Build the report (summary + client records).
//!   5. Write the report JSON.
//!
//! Each output file is independent: a report failure leaves the CSV
//! exports already on disk intact. Nothing is retried; the job is meant
//! to be re-run manually on failure.

use crate::config::ReportConfig;
use crate::error::ReportResult;
use crate::report::Report;
use crate::store::ReportStore;

pub struct ReportPipeline {
    config: ReportConfig,
    store: ReportStore,
}

impl ReportPipeline {
    /// Open the source database. Fails before any output is written if
    /// the database is missing or unreadable.
    pub fn connect(config: ReportConfig) -> ReportResult<Self> {
        let store = ReportStore::open(&config.database_location)?;
        log::info!("connected to {}", config.database_location);
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Export the client table. Returns the exported row count.
    pub fn export_clients(&self) -> ReportResult<usize> {
        self.store.export_table(
            &self.config.client_table_name,
            &self.config.output_paths.clients_csv,
        )
    }

    /// Export the payment table. Returns the exported row count.
    pub fn export_payments(&self) -> ReportResult<usize> {
        self.store.export_table(
            &self.config.payment_table_name,
            &self.config.output_paths.payments_csv,
        )
    }

    /// Load both tables, build the report, and write it to the
    /// configured path. Returns the built report.
    pub fn write_report(&self) -> ReportResult<Report> {
        let clients = self.store.load_clients(&self.config.client_table_name)?;
        let payments = self.store.load_payments(
            &self.config.payment_table_name,
            &self.config.client_table_name,
        )?;
        log::debug!(
            "loaded {} clients and {} payments",
            clients.len(),
            payments.len()
        );

        let report = Report::build(&clients, &payments)?;
        report.write_to(&self.config.output_paths.report_json)?;
        Ok(report)
    }
}

/// Run the full pipeline in one call.
pub fn run(config: ReportConfig) -> ReportResult<Report> {
    let pipeline = ReportPipeline::connect(config)?;

    let clients_exported = pipeline.export_clients()?;
    log::info!(
        "exported {clients_exported} rows from '{}' to '{}'",
        pipeline.config().client_table_name,
        pipeline.config().output_paths.clients_csv
    );

    let payments_exported = pipeline.export_payments()?;
    log::info!(
        "exported {payments_exported} rows from '{}' to '{}'",
        pipeline.config().payment_table_name,
        pipeline.config().output_paths.payments_csv
    );

    let report = pipeline.write_report()?;
    log::info!(
        "report written to '{}'",
        pipeline.config().output_paths.report_json
    );
    Ok(report)
}
