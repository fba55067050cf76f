//! Transaction listing for the finance tracker.
//!
//! This module contains everything related to reading transactions:
//! - The [Transaction] model
//! - Database functions for filtered, sorted and paged reads
//! - The JSON list endpoint

mod list_endpoint;
mod models;
mod query;

pub(crate) use list_endpoint::get_transactions;
pub(crate) use models::Transaction;
pub(crate) use query::get_all_transactions;

#[cfg(test)]
pub(crate) use query::TransactionPage;
