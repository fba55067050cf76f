//! Authentication middleware that validates the session cookie before protected handlers run.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};

use crate::{AppState, Error};

use super::cookie::session_is_active;

/// The state needed for the auth middleware.
#[derive(Clone)]
pub(crate) struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub(crate) cookie_key: Key,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// Middleware function that checks for a valid session cookie.
///
/// The request is executed normally if the session is valid, otherwise a 401
/// JSON error is returned and the handler never runs. Handlers behind this
/// guard can therefore trust that the request is authenticated.
pub(crate) async fn auth_guard(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(err) => {
            tracing::error!("Error getting cookie jar: {err:?}. Rejecting request.");
            return Error::Unauthenticated.into_response();
        }
    };

    if !session_is_active(&jar) {
        return Error::Unauthenticated.into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}
