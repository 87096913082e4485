/**
 * Refresh Handler
 *
 * POST /api/v1/users/refreshToken
 *
 * Exchanges a valid refresh token for a new access/refresh pair. The token
 * is read from the `refreshToken` cookie, or from a JSON body
 * `{ "refreshToken": "..." }` when the cookie is absent.
 */

use axum::{body::Bytes, extract::State};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::cookies::{set_auth_cookies, REFRESH_TOKEN_COOKIE};
use crate::backend::auth::handlers::types::{AuthResponse, RefreshRequest};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

fn refresh_token_from(jar: &CookieJar, body: &Bytes) -> Result<Option<String>, BackendError> {
    if let Some(cookie) = jar.get(REFRESH_TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Ok(Some(cookie.value().to_string()));
        }
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let request: RefreshRequest = serde_json::from_slice(body)?;
    Ok(request.refresh_token.filter(|t| !t.trim().is_empty()))
}

/// Refresh handler
///
/// # Errors
///
/// * `400 Bad Request` - Body present but not valid JSON
/// * `401 Unauthorized` - No refresh token, or it is invalid, expired or
///   names a user that no longer exists
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, ApiResponse<AuthResponse>), BackendError> {
    let token = refresh_token_from(&jar, &body)?.ok_or_else(|| {
        tracing::warn!("Refresh request without a refresh token");
        BackendError::unauthorized("Unauthorized request")
    })?;

    let claims = state.tokens.verify_refresh(&token).map_err(|e| {
        tracing::warn!("Invalid refresh token: {}", e);
        BackendError::unauthorized("Invalid refresh token")
    })?;

    let user = state
        .users
        .find_user_by_id(claims.id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Refresh token for missing user {}", claims.id);
            BackendError::unauthorized("Invalid refresh token")
        })?;

    let tokens = state.tokens.issue(&user)?;
    let jar = set_auth_cookies(jar, &tokens, state.config.auth.cookie_secure);

    tracing::info!("Tokens refreshed for user: {}", user.id);

    Ok((
        jar,
        ApiResponse::ok(
            AuthResponse {
                user: user.to_public(),
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            },
            "Access token refreshed",
        ),
    ))
}
