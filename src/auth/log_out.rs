//! Defines the route handler for ending the current session.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use serde_json::json;

use super::cookie::invalidate_auth_cookie;

/// Handle a log out request by invalidating the session cookie.
///
/// Always succeeds, even if there was no active session.
pub(crate) async fn post_log_out(jar: PrivateCookieJar) -> Response {
    (invalidate_auth_cookie(jar), Json(json!({ "ok": true }))).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header::SET_COOKIE};
    use axum_extra::extract::PrivateCookieJar;

    use crate::{
        app_state::create_cookie_key,
        auth::{DEFAULT_COOKIE_DURATION, set_auth_cookie},
    };

    use super::post_log_out;

    #[tokio::test]
    async fn log_out_expires_session_cookie() {
        let jar = PrivateCookieJar::new(create_cookie_key("secret"));
        let jar = set_auth_cookie(jar, DEFAULT_COOKIE_DURATION).unwrap();

        let response = post_log_out(jar).await;

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .expect("response is missing a Set-Cookie header")
            .to_str()
            .unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }
}
