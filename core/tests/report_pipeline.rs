//! End-to-end pipeline tests — fixture database in, three artifacts out.

use payrep_core::config::{OutputPaths, ReportConfig};
use payrep_core::error::ReportError;
use payrep_core::pipeline;
use tempfile::TempDir;

const JUN_15_2017: i64 = 1_497_484_800;
const JUL_01_2017: i64 = 1_498_867_200;
const MAR_10_2017: i64 = 1_489_104_000;
const JUN_01_2016: i64 = 1_464_739_200;

fn seed_schema(conn: &rusqlite::Connection) {
    conn.execute_batch(
        "CREATE TABLE clients (
             client_id INTEGER,
             entity_type TEXT,
             entity_year_established INTEGER
         );
         CREATE TABLE payments (
             transaction_id INTEGER,
             client_id INTEGER,
             contract_id INTEGER,
             transaction_date INTEGER,
             payment_amt REAL,
             payment_code TEXT
         );",
    )
    .unwrap();
}

fn seed_standard_rows(conn: &rusqlite::Connection) {
    conn.execute_batch(&format!(
        "INSERT INTO clients VALUES (2, 'Australian Private Company', 2001);
         INSERT INTO clients VALUES (1, 'Individual/Sole Trader', 2010);
         INSERT INTO payments VALUES (101, 1, 9, {JUN_15_2017}, 100.0, 'A');
         INSERT INTO payments VALUES (102, 2, 9, {JUL_01_2017}, 250.5, 'B');
         INSERT INTO payments VALUES (103, 1, 9, {MAR_10_2017}, 0.5, 'A');
         INSERT INTO payments VALUES (104, 2, 9, {JUN_01_2016}, 49.0, 'C');"
    ))
    .unwrap();
}

fn config_for(dir: &TempDir) -> ReportConfig {
    let path = |name: &str| dir.path().join(name).to_string_lossy().into_owned();
    ReportConfig {
        database_location: path("testing.db"),
        client_table_name: "clients".into(),
        payment_table_name: "payments".into(),
        output_paths: OutputPaths {
            clients_csv: path("client_details.csv"),
            payments_csv: path("payments.csv"),
            report_json: path("payments_report.json"),
        },
    }
}

fn parse_currency(s: &str) -> f64 {
    s.trim_start_matches('$').replace(',', "").parse().unwrap()
}

#[test]
fn full_run_writes_all_three_artifacts() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    let conn = rusqlite::Connection::open(&config.database_location).unwrap();
    seed_schema(&conn);
    seed_standard_rows(&conn);
    drop(conn);

    let report = pipeline::run(config.clone()).unwrap();

    assert!(std::path::Path::new(&config.output_paths.clients_csv).exists());
    assert!(std::path::Path::new(&config.output_paths.payments_csv).exists());
    assert!(std::path::Path::new(&config.output_paths.report_json).exists());

    assert_eq!(report.summary.total_clients, 2);
    assert_eq!(report.summary.total_payments, 4);
    assert_eq!(report.summary.oldest_payment, "2016-06-01T00:00:00");
    assert_eq!(report.summary.newest_payment, "2017-07-01T00:00:00");
    assert_eq!(report.summary.sum_all_payments, "$400.00");
    assert_eq!(report.summary.total_num_payments_under_1_dollar, 1);
    assert_eq!(report.summary.total_private_companies, 1);
    // June 2017 + July 2017 + June 2016, any year counts.
    assert_eq!(report.summary.total_amt_paid_in_june_and_july, "$399.50");
    // Only payment 101 is a 2017 sole-trader payment (103 is March but
    // sole trader — year 2017 counts it too).
    assert_eq!(report.summary.average_sole_trader_payment_in_2017, "$50.25");

    let ids: Vec<i64> = report.records.iter().map(|r| r.client_id).collect();
    assert_eq!(ids, vec![1, 2], "records ascend by client_id");
}

#[test]
fn report_json_is_indented_four_spaces_with_ordered_keys() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    let conn = rusqlite::Connection::open(&config.database_location).unwrap();
    seed_schema(&conn);
    seed_standard_rows(&conn);
    drop(conn);

    pipeline::run(config.clone()).unwrap();
    let content = std::fs::read_to_string(&config.output_paths.report_json).unwrap();

    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("{"));
    assert_eq!(lines.next(), Some("    \"summary\": {"));

    // Key emission order is declaration order.
    let pos = |key: &str| {
        content
            .find(&format!("\"{key}\""))
            .unwrap_or_else(|| panic!("missing key {key}"))
    };
    assert!(pos("total_clients") < pos("total_payments"));
    assert!(pos("total_payments") < pos("oldest_payment"));
    assert!(pos("payment_min") < pos("payment_quartile_1"));
    assert!(pos("payment_quartile_1") < pos("payment_median"));
    assert!(pos("payment_median") < pos("payment_quartile_3"));
    assert!(pos("payment_quartile_3") < pos("payment_max"));
    assert!(pos("summary") < pos("records"));

    // Numbers are native JSON values, currency amounts are strings.
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(value["summary"]["total_clients"].is_u64());
    assert!(value["summary"]["sum_all_payments"].is_string());
    assert!(value["records"].is_array());
}

#[test]
fn record_subtotals_round_trip_to_the_summary_sum() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    let conn = rusqlite::Connection::open(&config.database_location).unwrap();
    seed_schema(&conn);
    seed_standard_rows(&conn);
    drop(conn);

    pipeline::run(config.clone()).unwrap();
    let content = std::fs::read_to_string(&config.output_paths.report_json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();

    let subtotal: f64 = value["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| parse_currency(r["total_amt_paid"].as_str().unwrap()))
        .sum();
    let sum_all = parse_currency(value["summary"]["sum_all_payments"].as_str().unwrap());
    assert!(
        (subtotal - sum_all).abs() < 0.01 * 2.0,
        "re-parsed subtotals {subtotal} drift from {sum_all}"
    );

    let record_count: u64 = value["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["total_payments"].as_u64().unwrap())
        .sum();
    assert_eq!(record_count, value["summary"]["total_payments"].as_u64().unwrap());
}

#[test]
fn csv_exports_survive_a_report_failure() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    let conn = rusqlite::Connection::open(&config.database_location).unwrap();
    seed_schema(&conn);
    conn.execute(
        "INSERT INTO clients VALUES (1, 'Individual/Sole Trader', 2010)",
        [],
    )
    .unwrap();
    drop(conn);

    // Empty payments table: the report is undefined, but both exports
    // were written before the failure and stay on disk.
    let result = pipeline::run(config.clone());
    assert!(
        matches!(result, Err(ReportError::EmptyPayments)),
        "expected EmptyPayments, got {result:?}"
    );
    assert!(std::path::Path::new(&config.output_paths.clients_csv).exists());
    assert!(std::path::Path::new(&config.output_paths.payments_csv).exists());
    assert!(!std::path::Path::new(&config.output_paths.report_json).exists());
}

#[test]
fn payments_for_unknown_clients_are_filtered_at_load() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    let conn = rusqlite::Connection::open(&config.database_location).unwrap();
    seed_schema(&conn);
    seed_standard_rows(&conn);
    conn.execute(
        &format!("INSERT INTO payments VALUES (999, 42, 9, {JUN_15_2017}, 5.0, 'X')"),
        [],
    )
    .unwrap();
    drop(conn);

    let report = pipeline::run(config.clone()).unwrap();

    // The raw export dumps the whole table, orphan row included.
    let payments_csv = std::fs::read_to_string(&config.output_paths.payments_csv).unwrap();
    assert!(payments_csv.lines().any(|l| l.starts_with("999,42,")));

    // The report never sees it: the load filter excludes it.
    assert_eq!(report.summary.total_payments, 4);
    assert!(report.records.iter().all(|r| r.client_id != 42));
}

#[test]
fn null_timestamp_fails_the_run_naming_the_payment() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    let conn = rusqlite::Connection::open(&config.database_location).unwrap();
    seed_schema(&conn);
    seed_standard_rows(&conn);
    conn.execute(
        "INSERT INTO payments VALUES (105, 1, 9, NULL, 5.0, 'X')",
        [],
    )
    .unwrap();
    drop(conn);

    let result = pipeline::run(config);
    match result {
        Err(ReportError::BadTimestamp { transaction_id }) => {
            assert_eq!(transaction_id, 105)
        }
        other => panic!("expected BadTimestamp, got {other:?}"),
    }
}
