//! The API endpoint URIs.

/// The route for logging in with the application password.
pub const LOG_IN_API: &str = "/api/login";
/// The route for the client to end the current session.
pub const LOG_OUT_API: &str = "/api/logout";
/// The route to list, search, sort and page transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for the spending chart data.
pub const SPENDING_API: &str = "/api/spending";
