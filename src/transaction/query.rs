//! Database query helpers for listing transactions.
//!
//! This is the single authoritative implementation of transaction filtering,
//! sorting and paging; callers pass normalized parameters in and get a page
//! plus a total back, so no sort/filter semantics are re-derived client-side.

use rusqlite::{Connection, Row, types::Type};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, PaginationConfig, pagination::page_count};

use super::models::Transaction;

/// The order to return transactions in.
///
/// Any value not in this enumeration falls back to [SortOption::DateNew];
/// requests never fail because of an unknown sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SortOption {
    /// Newest transactions first.
    #[default]
    DateNew,
    /// Oldest transactions first.
    DateOld,
    /// Largest amounts first.
    AmountHigh,
    /// Smallest amounts first.
    AmountLow,
}

impl SortOption {
    /// Parse the `sort` query parameter, falling back to the default for
    /// unknown values.
    pub(crate) fn parse(value: &str) -> Self {
        match value {
            "date-new" => Self::DateNew,
            "date-old" => Self::DateOld,
            "amount-high" => Self::AmountHigh,
            "amount-low" => Self::AmountLow,
            _ => Self::default(),
        }
    }

    /// The ORDER BY clause for this sort option.
    ///
    /// The clause is selected from this closed set of literals and never
    /// built from caller-supplied text. The ID tie-break runs in the same
    /// direction as the primary key so ties order deterministically, and
    /// amounts are cast so text-stored amounts order numerically.
    fn order_by_clause(self) -> &'static str {
        match self {
            Self::DateNew => "ORDER BY transaction_date DESC, id DESC",
            Self::DateOld => "ORDER BY transaction_date ASC, id ASC",
            Self::AmountHigh => "ORDER BY CAST(amount AS REAL) DESC, id DESC",
            Self::AmountLow => "ORDER BY CAST(amount AS REAL) ASC, id ASC",
        }
    }
}

/// Normalized parameters for a transaction list query.
///
/// Out-of-range values are corrected here rather than rejected, so building
/// this type cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TransactionQuery {
    /// Trimmed search text. Empty means no filter.
    pub(crate) q: String,
    /// The order to return transactions in.
    pub(crate) sort: SortOption,
    /// 1-based page number.
    pub(crate) page: u64,
    /// Page size.
    pub(crate) limit: u64,
}

impl TransactionQuery {
    /// Normalize raw query parameters.
    ///
    /// Missing values take the defaults from `config`, pages below 1 are
    /// clamped up, and limits are clamped into `1..=config.max_page_size`.
    pub(crate) fn new(
        q: Option<String>,
        sort: Option<String>,
        page: Option<i64>,
        limit: Option<i64>,
        config: &PaginationConfig,
    ) -> Self {
        Self {
            q: q.map(|q| q.trim().to_owned()).unwrap_or_default(),
            sort: sort.as_deref().map(SortOption::parse).unwrap_or_default(),
            page: page
                .unwrap_or(config.default_page as i64)
                .max(1) as u64,
            limit: limit
                .unwrap_or(config.default_page_size as i64)
                .clamp(1, config.max_page_size as i64) as u64,
        }
    }
}

/// One page of transactions plus paging metadata.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct TransactionPage {
    /// The transactions on this page, in the requested order.
    pub(crate) rows: Vec<Transaction>,
    /// The number of transactions matching the filter across all pages.
    pub(crate) total: u64,
    /// The number of pages at the requested page size, at least 1.
    #[serde(rename = "totalPages")]
    pub(crate) total_pages: u64,
    /// The 1-based page number that was returned.
    pub(crate) page: u64,
}

const SELECT_COLUMNS: &str =
    "SELECT id, description, amount, transaction_date, category FROM transactions";

// LIKE wildcards in the search text are escaped so they match literally.
const SEARCH_PREDICATE: &str =
    "WHERE (description LIKE ?1 ESCAPE '\\' OR COALESCE(category, '') LIKE ?1 ESCAPE '\\')";

/// Get one page of transactions matching `params`, plus the total match count.
///
/// The filter is a case-insensitive substring match of `params.q` against the
/// description or category. The count and the page are computed from the same
/// predicate with the same bind values, under the connection the caller holds,
/// so the two reads cannot disagree about what matches. A page past the end
/// returns an empty row set rather than an error.
///
/// # Errors
/// Returns [Error::Sql] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub(crate) fn query_transactions(
    params: &TransactionQuery,
    connection: &Connection,
) -> Result<TransactionPage, Error> {
    // Saturates for enormous page numbers so the offset stays a valid bind
    // value; a saturated offset is past the end and yields empty rows.
    let offset = params
        .page
        .saturating_sub(1)
        .saturating_mul(params.limit)
        .min(i64::MAX as u64);
    let order_by = params.sort.order_by_clause();

    let (total, rows) = if params.q.is_empty() {
        let total: i64 =
            connection.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;

        let rows = connection
            .prepare(&format!("{SELECT_COLUMNS} {order_by} LIMIT ?1 OFFSET ?2"))?
            .query_map(
                [params.limit as i64, offset as i64],
                map_transaction_row,
            )?
            .map(|row_result| row_result.map_err(Error::from))
            .collect::<Result<Vec<_>, _>>()?;

        (total, rows)
    } else {
        let pattern = format!("%{}%", escape_like_pattern(&params.q));

        let total: i64 = connection.query_row(
            &format!("SELECT COUNT(*) FROM transactions {SEARCH_PREDICATE}"),
            [&pattern],
            |row| row.get(0),
        )?;

        let rows = connection
            .prepare(&format!(
                "{SELECT_COLUMNS} {SEARCH_PREDICATE} {order_by} LIMIT ?2 OFFSET ?3"
            ))?
            .query_map(
                rusqlite::params![pattern, params.limit as i64, offset as i64],
                map_transaction_row,
            )?
            .map(|row_result| row_result.map_err(Error::from))
            .collect::<Result<Vec<_>, _>>()?;

        (total, rows)
    };

    let total = total.max(0) as u64;

    Ok(TransactionPage {
        rows,
        total,
        total_pages: page_count(total, params.limit),
        page: params.page,
    })
}

/// Get every transaction, oldest first.
///
/// Used to feed the spending aggregator, which needs the full data set
/// rather than a page.
///
/// # Errors
/// Returns [Error::Sql] if the query or row mapping fails.
pub(crate) fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_COLUMNS} ORDER BY transaction_date ASC, id ASC"
        ))?
        .query_map([], map_transaction_row)?
        .map(|row_result| row_result.map_err(Error::from))
        .collect()
}

/// Convert a row of the transactions table into a [Transaction].
fn map_transaction_row(row: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: read_amount(row, 2)?,
        date: row.get(3)?,
        category: row.get(4)?,
    })
}

/// Read an amount column as a decimal.
///
/// The importer writes amounts as TEXT, but SQLite's type affinity means a
/// column can also hold INTEGER or REAL values, so all three storage classes
/// are coerced explicitly.
fn read_amount(row: &Row, index: usize) -> rusqlite::Result<Decimal> {
    use rusqlite::types::ValueRef;

    match row.get_ref(index)? {
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
            })?;
            Decimal::from_str_exact(text.trim()).map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
            })
        }
        ValueRef::Integer(value) => Ok(Decimal::from(value)),
        ValueRef::Real(value) => Decimal::try_from(value).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(index, Type::Real, Box::new(err))
        }),
        other => Err(rusqlite::Error::InvalidColumnType(
            index,
            "amount".to_owned(),
            other.data_type(),
        )),
    }
}

/// Escape LIKE wildcards so the search text matches literally.
fn escape_like_pattern(q: &str) -> String {
    q.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;

    use crate::{
        PaginationConfig,
        test_utils::{insert_transaction, test_connection},
    };

    use super::{SortOption, TransactionQuery, query_transactions};

    fn query(q: &str, sort: &str, page: i64, limit: i64) -> TransactionQuery {
        TransactionQuery::new(
            Some(q.to_owned()),
            Some(sort.to_owned()),
            Some(page),
            Some(limit),
            &PaginationConfig::default(),
        )
    }

    fn seeded_connection() -> Connection {
        let conn = test_connection();
        insert_transaction(&conn, "WEEKLY SHOP", "-82.47", "2024-03-02", Some("Groceries"));
        insert_transaction(&conn, "SALARY - MARCH", "2500.00", "2024-03-01", None);
        insert_transaction(&conn, "BUS FARE", "-3.50", "2024-03-02", Some("Transport"));
        insert_transaction(&conn, "COFFEE", "-4.50", "2024-02-27", Some("Eating Out"));
        conn
    }

    #[test]
    fn page_below_one_is_clamped_up() {
        let params = query("", "date-new", -3, 50);

        assert_eq!(params.page, 1);
    }

    #[test]
    fn limit_above_maximum_is_clamped_down() {
        let params = query("", "date-new", 1, 10_000);

        assert_eq!(params.limit, 200);
    }

    #[test]
    fn missing_parameters_take_defaults() {
        let params = TransactionQuery::new(None, None, None, None, &PaginationConfig::default());

        assert_eq!(
            params,
            TransactionQuery {
                q: String::new(),
                sort: SortOption::DateNew,
                page: 1,
                limit: 50,
            }
        );
    }

    #[test]
    fn unknown_sort_falls_back_to_date_new() {
        assert_eq!(SortOption::parse("amount-sideways"), SortOption::DateNew);
        assert_eq!(SortOption::parse(""), SortOption::DateNew);
    }

    #[test]
    fn empty_search_returns_everything() {
        let conn = seeded_connection();

        let got = query_transactions(&query("", "date-new", 1, 50), &conn).unwrap();

        assert_eq!(got.total, 4);
        assert_eq!(got.rows.len() as u64, got.total);
        assert_eq!(got.total_pages, 1);
    }

    #[test]
    fn search_matches_category_case_insensitively() {
        let conn = seeded_connection();

        // The description "WEEKLY SHOP" does not contain the search text,
        // only the category does.
        for q in ["grocer", "GROCER", "Grocer"] {
            let got = query_transactions(&query(q, "date-new", 1, 50), &conn).unwrap();

            assert_eq!(got.total, 1, "q={q:?} should match the Groceries row");
            assert_eq!(got.rows[0].description, "WEEKLY SHOP");
        }
    }

    #[test]
    fn search_matches_description_substring() {
        let conn = seeded_connection();

        let got = query_transactions(&query("salary", "date-new", 1, 50), &conn).unwrap();

        assert_eq!(got.total, 1);
        assert_eq!(got.rows[0].description, "SALARY - MARCH");
    }

    #[test]
    fn like_wildcards_match_literally() {
        let conn = seeded_connection();
        insert_transaction(&conn, "50% OFF SALE", "-10.00", "2024-03-03", None);

        let got = query_transactions(&query("%", "date-new", 1, 50), &conn).unwrap();

        assert_eq!(got.total, 1);
        assert_eq!(got.rows[0].description, "50% OFF SALE");
    }

    #[test]
    fn amount_sort_is_numeric_not_lexicographic() {
        let conn = test_connection();
        insert_transaction(&conn, "a", "-5", "2024-01-01", None);
        insert_transaction(&conn, "b", "10.50", "2024-01-02", None);
        insert_transaction(&conn, "c", "-100", "2024-01-03", None);

        let got = query_transactions(&query("", "amount-high", 1, 50), &conn).unwrap();

        let amounts: Vec<Decimal> = got.rows.iter().map(|row| row.amount).collect();
        assert_eq!(
            amounts,
            vec![
                Decimal::new(1050, 2),
                Decimal::new(-5, 0),
                Decimal::new(-100, 0)
            ]
        );
    }

    #[test]
    fn date_sort_ties_break_on_id_in_same_direction() {
        let conn = seeded_connection();

        // Two transactions share 2024-03-02; the later insert has the higher ID.
        let got = query_transactions(&query("", "date-new", 1, 50), &conn).unwrap();
        assert_eq!(got.rows[0].description, "BUS FARE");
        assert_eq!(got.rows[1].description, "WEEKLY SHOP");

        let got = query_transactions(&query("", "date-old", 1, 50), &conn).unwrap();
        assert_eq!(got.rows[2].description, "WEEKLY SHOP");
        assert_eq!(got.rows[3].description, "BUS FARE");
    }

    #[test]
    fn pages_slice_the_result_set() {
        let conn = seeded_connection();

        let first = query_transactions(&query("", "date-old", 1, 3), &conn).unwrap();
        let second = query_transactions(&query("", "date-old", 2, 3), &conn).unwrap();

        assert_eq!(first.rows.len(), 3);
        assert_eq!(second.rows.len(), 1);
        assert_eq!(first.total, 4);
        assert_eq!(first.total_pages, 2);
        assert_eq!(second.page, 2);
    }

    #[test]
    fn page_past_the_end_returns_empty_rows() {
        let conn = seeded_connection();

        let got = query_transactions(&query("", "date-new", 99, 50), &conn).unwrap();

        assert_eq!(got.rows, vec![]);
        assert_eq!(got.total, 4);
        assert_eq!(got.total_pages, 1);
        assert_eq!(got.page, 99);
    }

    #[test]
    fn page_at_the_integer_limit_returns_empty_rows() {
        let conn = seeded_connection();

        let got = query_transactions(&query("", "date-new", i64::MAX, 200), &conn).unwrap();

        assert_eq!(got.rows, vec![]);
        assert_eq!(got.total, 4);
    }

    #[test]
    fn empty_table_still_has_one_page() {
        let conn = test_connection();

        let got = query_transactions(&query("", "date-new", 1, 50), &conn).unwrap();

        assert_eq!(got.total, 0);
        assert_eq!(got.total_pages, 1);
    }

    #[test]
    fn count_and_rows_use_the_same_predicate() {
        let conn = seeded_connection();

        let got = query_transactions(&query("o", "date-new", 1, 50), &conn).unwrap();

        assert_eq!(got.rows.len() as u64, got.total);
    }
}
