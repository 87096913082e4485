//! Auth cookies
//!
//! Both tokens are also delivered as http-only cookies scoped to `/` with
//! `SameSite=None`, so a browser client on another origin can send them back
//! with credentialed requests.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::backend::auth::sessions::TokenPair;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

fn auth_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::None)
        .path("/")
        .build()
}

/// Add both token cookies to the jar
pub fn set_auth_cookies(jar: CookieJar, tokens: &TokenPair, secure: bool) -> CookieJar {
    jar.add(auth_cookie(ACCESS_TOKEN_COOKIE, tokens.access_token.clone(), secure))
        .add(auth_cookie(REFRESH_TOKEN_COOKIE, tokens.refresh_token.clone(), secure))
}

fn removal_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build((name, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::None)
        .path("/")
        .removal()
        .build()
}

/// Expire both token cookies
///
/// Removal cookies are always sent, even when the request carried the
/// tokens in the `Authorization` header instead of cookies.
pub fn clear_auth_cookies(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(removal_cookie(ACCESS_TOKEN_COOKIE, secure))
        .add(removal_cookie(REFRESH_TOKEN_COOKIE, secure))
}
