//! Cookie builders for access and refresh tokens.
//!
//! Both cookies are HttpOnly, Secure, `SameSite=None` (the frontend is served from a
//! different origin) and scoped to `/`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Cookie name for the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

fn token_cookie(name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .max_age(max_age)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .build()
}

/// Set the access-token cookie on the jar, living as long as the token itself.
///
/// ```
/// use axum_extra::extract::cookie::{CookieJar, SameSite};
/// use dti_auth_types::cookie::{set_access_token_cookie, ACCESS_TOKEN_COOKIE};
///
/// let jar = CookieJar::new();
/// let jar = set_access_token_cookie(jar, "token_value".to_string(), 300);
/// let cookie = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(300)));
/// assert_eq!(cookie.same_site(), Some(SameSite::None));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_access_token_cookie(jar: CookieJar, value: String, ttl_secs: u64) -> CookieJar {
    jar.add(token_cookie(
        ACCESS_TOKEN_COOKIE,
        value,
        Duration::seconds(ttl_secs as i64),
    ))
}

/// Set the refresh-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use dti_auth_types::cookie::{set_refresh_token_cookie, REFRESH_TOKEN_COOKIE};
///
/// let jar = CookieJar::new();
/// let jar = set_refresh_token_cookie(jar, "refresh_value".to_string(), 86400);
/// let cookie = jar.get(REFRESH_TOKEN_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86400)));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_refresh_token_cookie(jar: CookieJar, value: String, ttl_secs: u64) -> CookieJar {
    jar.add(token_cookie(
        REFRESH_TOKEN_COOKIE,
        value,
        Duration::seconds(ttl_secs as i64),
    ))
}

/// Clear both token cookies by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use dti_auth_types::cookie::{
///     clear_cookies, set_access_token_cookie, set_refresh_token_cookie,
///     ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE,
/// };
///
/// let jar = CookieJar::new();
/// let jar = set_access_token_cookie(jar, "a".to_string(), 300);
/// let jar = set_refresh_token_cookie(jar, "r".to_string(), 86400);
/// let jar = clear_cookies(jar);
/// let access = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
/// let refresh = jar.get(REFRESH_TOKEN_COOKIE).unwrap();
/// assert_eq!(access.max_age(), Some(time::Duration::ZERO));
/// assert_eq!(refresh.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_cookies(jar: CookieJar) -> CookieJar {
    jar.add(token_cookie(ACCESS_TOKEN_COOKIE, String::new(), Duration::ZERO))
        .add(token_cookie(REFRESH_TOKEN_COOKIE, String::new(), Duration::ZERO))
}
