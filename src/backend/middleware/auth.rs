/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It locates the access token, verifies it, resolves
 * the user it names and provides that user to handlers.
 *
 * # Token Lookup
 *
 * 1. The `accessToken` cookie
 * 2. The `Authorization` header, with an optional `Bearer ` prefix
 *
 * # Rejections (all 401)
 *
 * - No token: `"Unauthorized request"`
 * - Bad signature or expired: `"Invalid access token"`
 * - Token names a user that no longer exists:
 *   `"Invalid Access Token: user no longer exists"`
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::auth::cookies::ACCESS_TOKEN_COOKIE;
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::PublicUser;

/// Authenticated user data resolved from the access token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
        }
    }
}

/// Find the access token in the request headers
///
/// The cookie wins over the `Authorization` header. Empty values count as
/// absent.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(ACCESS_TOKEN_COOKIE) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    let header = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the access token from the cookie or Authorization header
/// 2. Verifies the token
/// 3. Loads the user named by the token
/// 4. Attaches the user to request extensions for use in handlers
#[tracing::instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = extract_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing access token");
        BackendError::unauthorized("Unauthorized request")
    })?;

    let claims = app_state.tokens.verify_access(&token).map_err(|e| {
        tracing::warn!("Invalid access token: {}", e);
        BackendError::unauthorized("Invalid access token")
    })?;

    let user = app_state
        .users
        .find_user_by_id(claims.id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Access token for missing user {}", claims.id);
            BackendError::unauthorized("Invalid Access Token: user no longer exists")
        })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser::from(&user));

    Ok(next.run(request).await)
}

/// Axum extractor for authenticated user
///
/// This can be used as a parameter in handlers behind `auth_middleware` to
/// get the user resolved by the middleware.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Unauthorized request")
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_extract_token_from_cookie() {
        let map = headers(&[("cookie", "theme=dark; accessToken=abc.def.ghi")]);
        assert_eq!(extract_token(&map).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_token_from_bearer_header() {
        let map = headers(&[("authorization", "Bearer abc.def.ghi")]);
        assert_eq!(extract_token(&map).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_token_without_bearer_prefix() {
        let map = headers(&[("authorization", "abc.def.ghi")]);
        assert_eq!(extract_token(&map).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_cookie_wins_over_header() {
        let map = headers(&[
            ("cookie", "accessToken=from-cookie"),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(extract_token(&map).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_empty_values_are_absent() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
        assert_eq!(extract_token(&headers(&[("authorization", "Bearer ")])), None);
        assert_eq!(extract_token(&headers(&[("cookie", "accessToken=")])), None);
    }

    #[test]
    fn test_empty_cookie_falls_back_to_header() {
        let map = headers(&[
            ("cookie", "accessToken="),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(extract_token(&map).as_deref(), Some("from-header"));
    }

    #[tokio::test]
    async fn test_auth_user_missing_from_extensions() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/api/v1/users/currentUser")
            .body(())
            .unwrap()
            .into_parts();

        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert_eq!(
            result.unwrap_err().status_code(),
            axum::http::StatusCode::UNAUTHORIZED
        );
    }
}
