//! Per-client payment detail records.
//!
//! An inner join of payments to clients on client_id, grouped by client.
//! The loader's membership filter guarantees every payment matches a
//! loaded client; that precondition is checked here anyway, and a
//! violation is a fatal consistency error rather than a dropped row.

use crate::dates::format_timestamp;
use crate::error::{ReportError, ReportResult};
use crate::money::format_currency;
use crate::store::{Client, Payment};
use crate::types::{ClientId, TransactionId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Serialize)]
pub struct PaymentDetail {
    pub transaction_id: TransactionId,
    pub contract_id: i64,
    pub transaction_date: String,
    pub payment_amt: String,
    pub payment_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientRecord {
    pub client_id: ClientId,
    pub entity_type: String,
    pub entity_year_established: i64,
    pub total_payments: usize,
    pub total_amt_paid: String,
    pub payments: Vec<PaymentDetail>,
}

/// Group payments by client and denormalize client attributes onto each
/// group. Records come back sorted ascending by client_id; within a
/// record, payments keep their source row order.
pub fn build_client_records(
    clients: &[Client],
    payments: &[Payment],
) -> ReportResult<Vec<ClientRecord>> {
    let clients_by_id: HashMap<ClientId, &Client> =
        clients.iter().map(|c| (c.client_id, c)).collect();

    // BTreeMap keys give the ascending client_id order directly;
    // push order preserves source row order within each group.
    let mut groups: BTreeMap<ClientId, Vec<&Payment>> = BTreeMap::new();
    for payment in payments {
        if !clients_by_id.contains_key(&payment.client_id) {
            return Err(ReportError::UnknownClient {
                transaction_id: payment.transaction_id,
                client_id: payment.client_id,
            });
        }
        groups.entry(payment.client_id).or_default().push(payment);
    }

    let mut records = Vec::with_capacity(groups.len());
    for (client_id, group) in groups {
        let Some(client) = clients_by_id.get(&client_id) else {
            // Unreachable given the check above; kept as a hard error so
            // a broken invariant can never mis-join silently.
            return Err(ReportError::UnknownClient {
                transaction_id: group[0].transaction_id,
                client_id,
            });
        };

        let total_amt: f64 = group.iter().map(|p| p.payment_amt).sum();
        let details: Vec<PaymentDetail> = group
            .iter()
            .map(|p| PaymentDetail {
                transaction_id: p.transaction_id,
                contract_id: p.contract_id,
                transaction_date: format_timestamp(&p.transaction_date),
                payment_amt: format_currency(p.payment_amt),
                payment_code: p.payment_code.clone(),
            })
            .collect();

        records.push(ClientRecord {
            client_id,
            entity_type: client.entity_type.clone(),
            entity_year_established: client.entity_year_established,
            total_payments: details.len(),
            total_amt_paid: format_currency(total_amt),
            payments: details,
        });
    }
    Ok(records)
}
