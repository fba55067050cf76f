//! Buckets debit transactions into chart-ready spending totals.

use std::collections::HashMap;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use time::{
    Date, Duration, Month, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::transaction::Transaction;

/// The format transaction dates are stored in by convention.
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]");

/// The calendar granularity of the spending chart.
///
/// Unknown values fall back to [ViewMode::Month]; requests never fail
/// because of an unknown view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ViewMode {
    /// One bucket per day within a week.
    Week,
    /// One bucket per calendar month.
    #[default]
    Month,
    /// One bucket per calendar year.
    Year,
}

impl ViewMode {
    /// Parse the `view` query parameter, falling back to the default for
    /// unknown values.
    pub(crate) fn parse(value: &str) -> Self {
        match value {
            "week" => Self::Week,
            "month" => Self::Month,
            "year" => Self::Year,
            _ => Self::default(),
        }
    }
}

/// Labels and values for a spending chart, aligned positionally.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct SpendingChart {
    /// One label per bucket, in chronological order of the bucket start date.
    pub(crate) labels: Vec<String>,
    /// The total spend per bucket, as a magnitude.
    pub(crate) values: Vec<f64>,
}

/// Aggregate debit transactions into spending buckets for charting.
///
/// Only transactions with a negative amount count as spending; deposits and
/// zero amounts are excluded. Rows whose date cannot be parsed are skipped
/// rather than treated as an error, since the importer's data is not under
/// this service's control.
///
/// `selected_year` restricts the month view to one calendar year, and
/// `selected_week` (a Monday) restricts the week view to that 7-day window.
///
/// Totals are accumulated as decimals and only converted to `f64` at the
/// chart boundary. Buckets are ordered by their start date, not by label,
/// so "April 2024" sorts after "March 2024".
pub(crate) fn aggregate_spending(
    transactions: &[Transaction],
    view: ViewMode,
    selected_year: Option<i32>,
    selected_week: Option<Date>,
) -> SpendingChart {
    let mut totals: HashMap<Date, Decimal> = HashMap::new();

    for transaction in transactions {
        let Ok(date) = Date::parse(&transaction.date, DATE_FORMAT) else {
            continue;
        };

        // spending only
        if transaction.amount >= Decimal::ZERO {
            continue;
        }

        let Some(bucket) = bucket_start(date, view, selected_year, selected_week) else {
            continue;
        };

        *totals.entry(bucket).or_insert(Decimal::ZERO) += transaction.amount.abs();
    }

    let mut sorted_buckets: Vec<Date> = totals.keys().copied().collect();
    sorted_buckets.sort();

    let labels = sorted_buckets
        .iter()
        .map(|bucket| bucket_label(view, *bucket, selected_week.is_some()))
        .collect();
    let values = sorted_buckets
        .iter()
        .map(|bucket| totals[bucket].to_f64().unwrap_or_default())
        .collect();

    SpendingChart { labels, values }
}

/// The start date of the bucket `date` falls into, or `None` when the
/// transaction is outside the selected year/week scope.
fn bucket_start(
    date: Date,
    view: ViewMode,
    selected_year: Option<i32>,
    selected_week: Option<Date>,
) -> Option<Date> {
    match view {
        ViewMode::Year => Date::from_calendar_date(date.year(), Month::January, 1).ok(),
        ViewMode::Month => {
            if selected_year.is_some_and(|year| year != date.year()) {
                return None;
            }

            date.replace_day(1).ok()
        }
        ViewMode::Week => {
            if let Some(monday) = selected_week
                && (date < monday || date > monday + Duration::days(6))
            {
                return None;
            }

            Some(date)
        }
    }
}

/// Format the chart label for a bucket.
///
/// Month buckets are keyed by their start date, so "March 2023" and
/// "March 2024" stay distinct even though the month name repeats. Week
/// labels omit the year only inside a selected 7-day window, where the same
/// month/day cannot recur.
fn bucket_label(view: ViewMode, start: Date, week_is_scoped: bool) -> String {
    match view {
        ViewMode::Year => start.year().to_string(),
        ViewMode::Month => format!("{} {}", month_name(start.month()), start.year()),
        ViewMode::Week if week_is_scoped => {
            format!("{:02}/{:02}", u8::from(start.month()), start.day())
        }
        ViewMode::Week => format!(
            "{:02}/{:02}/{}",
            u8::from(start.month()),
            start.day(),
            start.year()
        ),
    }
}

fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}
