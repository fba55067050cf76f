//! Spending aggregation for the chart views.
//!
//! The aggregator is a pure transform over transactions that have already
//! been fetched; all filter/sort semantics live in the transaction query
//! layer, not here.

mod aggregate;
mod endpoint;

pub(crate) use endpoint::get_spending_chart;
