//! Creates the application's database schema.

use rusqlite::Connection;

use crate::Error;

/// Create the transactions table if it does not exist yet.
///
/// The table is populated by an external importer, so the schema is created
/// idempotently rather than migrated.
///
/// Amounts are stored as TEXT to preserve the exact decimal representation
/// the importer produced. Dates are stored as TEXT in `YYYY-MM-DD` form by
/// convention but are not validated here.
///
/// # Errors
/// Returns [Error::Sql] if the table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            amount TEXT NOT NULL,
            transaction_date TEXT NOT NULL,
            category TEXT
        )",
        (),
    )?;

    Ok(())
}
