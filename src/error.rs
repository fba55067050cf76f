//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided the wrong password when logging in.
    #[error("invalid password")]
    InvalidCredentials,

    /// The request did not carry a valid session cookie.
    #[error("authentication required")]
    Unauthenticated,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    ///
    /// The error detail should only be logged for debugging on the server.
    /// Clients receive a generic internal server error message instead.
    #[error("an unexpected SQL error occurred: {0}")]
    Sql(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::Sql(error)
            }
        }
    }
}

/// The JSON body sent with every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self {
            Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid password"),
            Error::Unauthenticated => (StatusCode::UNAUTHORIZED, "authentication required"),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "the requested resource could not be found",
            ),
            // Store failures are not intended to be shown to the client.
            Error::DatabaseLock | Error::Sql(_) => {
                tracing::error!("An unexpected error occurred: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "something went wrong, check the server logs for more details",
                )
            }
        };

        (
            status_code,
            Json(ErrorBody {
                error: message.to_owned(),
            }),
        )
            .into_response()
    }
}
