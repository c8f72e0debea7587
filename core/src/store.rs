//! SQLite read layer.
//!
//! RULE: Only store.rs talks to the database.
//! The report builders work on the typed rows returned here.
//!
//! The connection is opened read-only: this pipeline never writes back
//! to the source. Dropping the store releases the connection, including
//! on early failure paths.

use crate::dates;
use crate::error::{ReportError, ReportResult};
use crate::types::{ClientId, TransactionId};
use chrono::NaiveDateTime;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

#[derive(Debug, Clone)]
pub struct Client {
    pub client_id: ClientId,
    pub entity_type: String,
    pub entity_year_established: i64,
}

#[derive(Debug, Clone)]
pub struct Payment {
    pub transaction_id: TransactionId,
    pub client_id: ClientId,
    pub contract_id: i64,
    pub transaction_date: NaiveDateTime,
    pub payment_amt: f64,
    pub payment_code: String,
}

pub struct ReportStore {
    conn: Connection,
}

impl ReportStore {
    /// Open the source database read-only. A missing file fails here,
    /// before any output artifact is written.
    pub fn open(path: &str) -> ReportResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
        )?;
        Ok(Self { conn })
    }

    /// Load the full client set, preserving source row order.
    pub fn load_clients(&self, table: &str) -> ReportResult<Vec<Client>> {
        let sql =
            format!("SELECT client_id, entity_type, entity_year_established FROM {table}");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(Client {
                client_id: row.get(0)?,
                entity_type: row.get(1)?,
                entity_year_established: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Load payments whose client_id exists in the client table.
    ///
    /// The membership subquery is a load-time filter against the client
    /// id set, not a join; unmatched payments never enter the pipeline.
    /// Timestamps are normalized here — a null or out-of-range
    /// transaction_date fails the whole load.
    pub fn load_payments(
        &self,
        payment_table: &str,
        client_table: &str,
    ) -> ReportResult<Vec<Payment>> {
        let sql = format!(
            "SELECT transaction_id, client_id, contract_id, transaction_date,
                    payment_amt, payment_code
             FROM {payment_table}
             WHERE client_id IN (SELECT client_id FROM {client_table})"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, TransactionId>(0)?,
                    row.get::<_, ClientId>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, Option<i64>>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut payments = Vec::with_capacity(raw.len());
        for (transaction_id, client_id, contract_id, epoch_secs, payment_amt, payment_code) in raw
        {
            let transaction_date = epoch_secs
                .and_then(dates::from_epoch_seconds)
                .ok_or(ReportError::BadTimestamp { transaction_id })?;
            payments.push(Payment {
                transaction_id,
                client_id,
                contract_id,
                transaction_date,
                payment_amt,
                payment_code,
            });
        }
        Ok(payments)
    }

    /// Dump an entire table as CSV: header row = column names in source
    /// order, one data row per source row. Returns the row count.
    pub fn export_table(&self, table: &str, csv_path: &str) -> ReportResult<usize> {
        let sql = format!("SELECT * FROM {table}");
        let mut stmt = self.conn.prepare(&sql)?;
        let headers: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let column_count = headers.len();

        let mut writer = csv::Writer::from_path(csv_path)?;
        writer.write_record(&headers)?;

        let mut exported = 0usize;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut record = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                record.push(cell_text(row.get_ref(idx)?));
            }
            writer.write_record(&record)?;
            exported += 1;
        }
        writer.flush().map_err(|source| ReportError::Write {
            path: csv_path.to_string(),
            source,
        })?;

        log::debug!("exported {exported} rows from '{table}' to '{csv_path}'");
        Ok(exported)
    }
}

fn cell_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(v) => v.to_string(),
        ValueRef::Real(v) => v.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => String::from_utf8_lossy(b).into_owned(),
    }
}
