//! Defines the route handler for logging in with the application password.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

use crate::{AppState, Error};

use super::cookie::set_auth_cookie;

/// The JSON body of a log in request.
#[derive(Debug, Deserialize)]
pub(crate) struct LogInForm {
    /// The application password.
    pub(crate) password: String,
}

#[derive(Debug, Serialize)]
struct LogInResponse {
    ok: bool,
}

/// Handle a log in request by comparing the submitted password against the
/// configured application password and, on success, starting a session.
///
/// Returns a 401 JSON error for a wrong password. A single shared password is
/// enough here since the app serves one user; there are no accounts.
pub(crate) async fn post_log_in(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(form): Json<LogInForm>,
) -> Response {
    let submitted_digest = Sha512::digest(&form.password);

    if submitted_digest.as_slice() != state.password_digest.as_slice() {
        return Error::InvalidCredentials.into_response();
    }

    match set_auth_cookie(jar, state.cookie_duration) {
        Ok(jar) => (jar, Json(LogInResponse { ok: true })).into_response(),
        Err(err) => {
            tracing::error!("Could not format session expiry: {err}");
            Error::Unauthenticated.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, extract::State, http::StatusCode, http::header::SET_COOKIE};
    use axum_extra::extract::PrivateCookieJar;

    use crate::test_utils::test_state;

    use super::{LogInForm, post_log_in};

    #[tokio::test]
    async fn correct_password_sets_session_cookie() {
        let state = test_state();
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = post_log_in(
            State(state),
            jar,
            Json(LogInForm {
                password: "hunter2".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .expect("response is missing a Set-Cookie header")
            .to_str()
            .unwrap();
        assert!(cookie.starts_with("session="));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let state = test_state();
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = post_log_in(
            State(state),
            jar,
            Json(LogInForm {
                password: "*******".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(SET_COOKIE).is_none());
    }
}
