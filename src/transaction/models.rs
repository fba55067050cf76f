//! The core transaction data model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

/// The database ID of a transaction.
pub(crate) type TransactionId = i64;

/// The label shown for transactions whose category is absent or blank.
///
/// Normalization happens when serializing a response; the raw column keeps
/// its NULL/blank value so search and storage are unaffected.
pub(crate) const UNCATEGORIZED_LABEL: &str = "UNCATEGORIZED";

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Rows are written by an external importer; this service only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    /// The ID of the transaction.
    pub(crate) id: TransactionId,
    /// A text description of what the transaction was for.
    pub(crate) description: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Negative values are expenses/debits, positive values are
    /// deposits/credits. Kept as a decimal so amounts stored as text never
    /// pick up floating-point drift.
    pub(crate) amount: Decimal,
    /// When the transaction happened, as stored by the importer.
    ///
    /// `YYYY-MM-DD` by convention, but not validated here. Consumers that
    /// need calendar logic parse it and skip rows that fail to parse.
    #[serde(rename = "transaction_date")]
    pub(crate) date: String,
    /// The free-text category of the transaction, e.g. "Groceries".
    #[serde(serialize_with = "serialize_category")]
    pub(crate) category: Option<String>,
}

/// The category label to display for a transaction.
fn display_category(category: Option<&str>) -> &str {
    match category {
        Some(name) if !name.trim().is_empty() => name,
        _ => UNCATEGORIZED_LABEL,
    }
}

/// Serialize a category with absent or blank values normalized to
/// [UNCATEGORIZED_LABEL].
fn serialize_category<S>(category: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(display_category(category.as_deref()))
}
