//! Run-level summary statistics.
//!
//! Computed once per run from the full client set and the filtered
//! payment set, assembled as a single immutable value. Field order on
//! the struct is the emission order in the report.

use crate::error::{ReportError, ReportResult};
use crate::money::format_currency;
use crate::stats;
use crate::store::{Client, Payment};
use crate::types::ClientId;
use crate::dates::format_timestamp;
use chrono::Datelike;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const ENTITY_PRIVATE_COMPANY: &str = "Australian Private Company";
pub const ENTITY_SOLE_TRADER: &str = "Individual/Sole Trader";

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_clients: usize,
    pub total_payments: usize,
    pub oldest_payment: String,
    pub newest_payment: String,
    pub sum_all_payments: String,
    pub average_payment: String,
    pub payment_min: String,
    pub payment_quartile_1: String,
    pub payment_median: String,
    pub payment_quartile_3: String,
    pub payment_max: String,
    pub total_amt_paid_in_june_and_july: String,
    pub total_num_payments_under_1_dollar: usize,
    pub total_private_companies: usize,
    pub average_sole_trader_payment_in_2017: String,
}

/// Build the summary from fully loaded sets.
///
/// Client counts are computed over the full client set, payment counts
/// over the filtered payment set, independent of the per-client grouping
/// done elsewhere. An empty payment set has no defined min/max date or
/// distribution, so it fails the run.
pub fn build_summary(clients: &[Client], payments: &[Payment]) -> ReportResult<Summary> {
    if payments.is_empty() {
        return Err(ReportError::EmptyPayments);
    }

    let distinct_clients: HashSet<ClientId> = clients.iter().map(|c| c.client_id).collect();

    let mut oldest = payments[0].transaction_date;
    let mut newest = payments[0].transaction_date;
    for payment in &payments[1..] {
        if payment.transaction_date < oldest {
            oldest = payment.transaction_date;
        }
        if payment.transaction_date > newest {
            newest = payment.transaction_date;
        }
    }

    let mut amounts: Vec<f64> = payments.iter().map(|p| p.payment_amt).collect();
    amounts.sort_by(|a, b| a.total_cmp(b));
    let sum_all: f64 = amounts.iter().sum();
    let average = sum_all / amounts.len() as f64;
    let quartile = |p: f64| stats::percentile(&amounts, p).unwrap_or(f64::NAN);

    let june_july_total: f64 = payments
        .iter()
        .filter(|p| matches!(p.transaction_date.month(), 6 | 7))
        .map(|p| p.payment_amt)
        .sum();

    let under_one_dollar = payments.iter().filter(|p| p.payment_amt < 1.0).count();

    let private_companies: HashSet<ClientId> = clients
        .iter()
        .filter(|c| c.entity_type == ENTITY_PRIVATE_COMPANY)
        .map(|c| c.client_id)
        .collect();

    // Join each payment to its client's entity type for the 2017
    // sole-trader average. An empty subset yields an undefined mean,
    // rendered as the $nan sentinel rather than a misleading $0.00.
    let entity_by_client: HashMap<ClientId, &str> = clients
        .iter()
        .map(|c| (c.client_id, c.entity_type.as_str()))
        .collect();
    let sole_trader_2017: Vec<f64> = payments
        .iter()
        .filter(|p| p.transaction_date.year() == 2017)
        .filter(|p| entity_by_client.get(&p.client_id).copied() == Some(ENTITY_SOLE_TRADER))
        .map(|p| p.payment_amt)
        .collect();
    let average_sole_trader_2017 = stats::mean(&sole_trader_2017).unwrap_or(f64::NAN);

    Ok(Summary {
        total_clients: distinct_clients.len(),
        total_payments: payments.len(),
        oldest_payment: format_timestamp(&oldest),
        newest_payment: format_timestamp(&newest),
        sum_all_payments: format_currency(sum_all),
        average_payment: format_currency(average),
        payment_min: format_currency(amounts[0]),
        payment_quartile_1: format_currency(quartile(0.25)),
        payment_median: format_currency(quartile(0.50)),
        payment_quartile_3: format_currency(quartile(0.75)),
        payment_max: format_currency(amounts[amounts.len() - 1]),
        total_amt_paid_in_june_and_july: format_currency(june_july_total),
        total_num_payments_under_1_dollar: under_one_dollar,
        total_private_companies: private_companies.len(),
        average_sole_trader_payment_in_2017: format_currency(average_sole_trader_2017),
    })
}
