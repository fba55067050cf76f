//! Cookie session handling for the single-password log in.
//!
//! The query and aggregation endpoints never check credentials themselves;
//! they run behind [auth_guard], which decides whether the request carries a
//! valid session before any handler is invoked.

mod cookie;
mod log_in;
mod log_out;
mod middleware;

pub(crate) use cookie::DEFAULT_COOKIE_DURATION;
pub(crate) use log_in::post_log_in;
pub(crate) use log_out::post_log_out;
pub(crate) use middleware::auth_guard;

#[cfg(test)]
pub(crate) use cookie::set_auth_cookie;
