//! Defines functions for handling user authentication with cookies.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime, format_description::well_known::Rfc3339};

pub(crate) const COOKIE_SESSION: &str = "session";

/// The default duration for which auth cookies are valid.
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::days(30);

/// Add an auth cookie to the cookie jar, indicating that the user is logged in.
///
/// The cookie value is the session expiry, so a tampered or stale cookie
/// fails validation even if the client keeps sending it.
///
/// # Errors
/// Returns a [time::error::Format] if the expiry time cannot be formatted.
pub(crate) fn set_auth_cookie(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, time::error::Format> {
    let expiry = OffsetDateTime::now_utc() + duration;
    let expiry_string = expiry.format(&Rfc3339)?;

    Ok(jar.add(
        Cookie::build((COOKIE_SESSION, expiry_string))
            .expires(expiry)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(true),
    ))
}

/// Set the auth cookie to an invalid value and set its max age to zero, which should delete the
/// cookie on the client side.
pub(crate) fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(true),
    )
}

/// Whether `jar` holds a session cookie that has not yet expired.
pub(crate) fn session_is_active(jar: &PrivateCookieJar) -> bool {
    jar.get(COOKIE_SESSION)
        .and_then(|cookie| OffsetDateTime::parse(cookie.value(), &Rfc3339).ok())
        .is_some_and(|expiry| expiry > OffsetDateTime::now_utc())
}
