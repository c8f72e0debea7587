//! report-runner: batch CSV export and payments report build.
//!
//! Reads the clients and payments tables from the configured SQLite
//! database, dumps each as CSV, then writes the nested summary+records
//! JSON report. Configuration comes from `report_config.json` in the
//! working directory when present, otherwise compiled-in defaults.

use anyhow::Result;
use payrep_core::{config::ReportConfig, pipeline::ReportPipeline};

const CONFIG_FILE: &str = "report_config.json";

fn main() -> Result<()> {
    env_logger::init();

    let config = if std::path::Path::new(CONFIG_FILE).exists() {
        log::info!("using configuration from {CONFIG_FILE}");
        ReportConfig::load(CONFIG_FILE)?
    } else {
        ReportConfig::default()
    };

    println!("payments report runner");
    println!("  database:       {}", config.database_location);
    println!("  client table:   {}", config.client_table_name);
    println!("  payment table:  {}", config.payment_table_name);
    println!();

    let pipeline = ReportPipeline::connect(config)?;

    let client_rows = pipeline.export_clients()?;
    println!(
        "Data from table '{}' successfully exported to '{}' ({client_rows} rows).",
        pipeline.config().client_table_name,
        pipeline.config().output_paths.clients_csv
    );

    let payment_rows = pipeline.export_payments()?;
    println!(
        "Data from table '{}' successfully exported to '{}' ({payment_rows} rows).",
        pipeline.config().payment_table_name,
        pipeline.config().output_paths.payments_csv
    );

    let report = pipeline.write_report()?;
    println!(
        "Report successfully written to '{}'.",
        pipeline.config().output_paths.report_json
    );

    println!();
    println!("=== REPORT SUMMARY ===");
    println!("  clients:         {}", report.summary.total_clients);
    println!("  payments:        {}", report.summary.total_payments);
    println!("  oldest payment:  {}", report.summary.oldest_payment);
    println!("  newest payment:  {}", report.summary.newest_payment);
    println!("  total paid:      {}", report.summary.sum_all_payments);
    println!("  client records:  {}", report.records.len());

    Ok(())
}
