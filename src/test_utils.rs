//! Shared helpers for unit tests.

use axum::response::Response;
use rusqlite::Connection;

use crate::{AppState, db::initialize, pagination::PaginationConfig};

/// Create an app state backed by an empty in-memory database.
///
/// The registered application password is `hunter2`.
pub(crate) fn test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory database");

    AppState::new(
        connection,
        "nafstjM6wV9vHHyPGfPGnO6Bzz0VEWLcIAoWpkLxttWvCLmE5lfwFEhZAeTSBtzK",
        "hunter2",
        PaginationConfig::default(),
    )
    .expect("Could not create app state")
}

/// Create an initialized in-memory database connection.
pub(crate) fn test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory database");
    initialize(&connection).expect("Could not initialize database");

    connection
}

/// Insert a transaction row directly, bypassing the query layer under test.
pub(crate) fn insert_transaction(
    connection: &Connection,
    description: &str,
    amount: &str,
    date: &str,
    category: Option<&str>,
) {
    connection
        .execute(
            "INSERT INTO transactions (description, amount, transaction_date, category)
             VALUES (?1, ?2, ?3, ?4)",
            (description, amount, date, category),
        )
        .expect("Could not insert transaction");
}

/// Collect a response body and parse it as JSON.
pub(crate) async fn response_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    serde_json::from_slice(&body).expect("Could not parse response body as JSON")
}
