//! Defines the route handler that lists transactions as JSON.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{AppState, Error};

use super::query::{TransactionPage, TransactionQuery, query_transactions};

/// The raw query parameters of a transaction list request.
///
/// Every field stays a plain string so unrecognized values fall back to
/// their defaults instead of failing extraction with a 400.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TransactionListParams {
    /// Search text to filter by.
    pub(crate) q: Option<String>,
    /// One of `date-new`, `date-old`, `amount-high`, `amount-low`.
    pub(crate) sort: Option<String>,
    /// 1-based page number.
    pub(crate) page: Option<String>,
    /// Page size.
    pub(crate) limit: Option<String>,
}

/// Parse a numeric query parameter, treating non-numeric values as absent.
fn parse_lenient(value: Option<&str>) -> Option<i64> {
    value.and_then(|raw| raw.trim().parse().ok())
}

/// Handle a request for one page of transactions.
///
/// Out-of-range paging values are clamped rather than rejected, so this
/// endpoint only fails when the data store does.
pub(crate) async fn get_transactions(
    State(state): State<AppState>,
    Query(params): Query<TransactionListParams>,
) -> Result<Json<TransactionPage>, Error> {
    let query = TransactionQuery::new(
        params.q,
        params.sort,
        parse_lenient(params.page.as_deref()),
        parse_lenient(params.limit.as_deref()),
        &state.pagination_config,
    );

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    query_transactions(&query, &connection).map(Json)
}
