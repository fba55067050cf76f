//! Defines the route handler for the spending chart data.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use time::Date;

use crate::{AppState, Error, transaction::get_all_transactions};

use super::aggregate::{DATE_FORMAT, SpendingChart, ViewMode, aggregate_spending};

/// The raw query parameters of a spending chart request.
///
/// Every field stays a plain string so unrecognized values fall back to
/// their defaults instead of failing extraction with a 400.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SpendingParams {
    /// One of `week`, `month`, `year`.
    pub(crate) view: Option<String>,
    /// Restrict the month view to this calendar year.
    pub(crate) year: Option<String>,
    /// A `YYYY-MM-DD` Monday restricting the week view to that week.
    pub(crate) week: Option<String>,
}

/// Handle a request for chart-ready spending totals.
///
/// Reads the full transaction list and aggregates it in memory; pagination
/// does not apply here because a chart needs every debit. An unparsable
/// `week` parameter is ignored rather than rejected, matching how unknown
/// `view` values fall back to the default.
pub(crate) async fn get_spending_chart(
    State(state): State<AppState>,
    Query(params): Query<SpendingParams>,
) -> Result<Json<SpendingChart>, Error> {
    let view = params
        .view
        .as_deref()
        .map(ViewMode::parse)
        .unwrap_or_default();
    let selected_year = params
        .year
        .as_deref()
        .and_then(|raw| raw.trim().parse().ok());
    let selected_week = params
        .week
        .as_deref()
        .and_then(|raw| Date::parse(raw, DATE_FORMAT).ok());

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;
    let transactions = get_all_transactions(&connection)?;

    Ok(Json(aggregate_spending(
        &transactions,
        view,
        selected_year,
        selected_week,
    )))
}
