/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /api/v1/users/loginUser.
 *
 * # Authentication Process
 *
 * 1. Look up user by normalized email
 * 2. Verify password using bcrypt
 * 3. Issue an access/refresh token pair
 * 4. Set both tokens as cookies and return them with the user
 *
 * # Security
 *
 * - Unknown email and wrong password produce the same 401 (no user
 *   enumeration), and both run one bcrypt verification
 * - Passwords and tokens are never logged
 */

use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::cookies::set_auth_cookies;
use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::users::{verify_password, verify_unknown_user};
use crate::backend::error::{ApiJson, BackendError};
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Returns
///
/// The cookie jar with `accessToken` and `refreshToken` set, and the
/// envelope carrying `{ user, accessToken, refreshToken }`.
///
/// # Errors
///
/// * `400 Bad Request` - Email or password missing
/// * `401 Unauthorized` - Unknown email or wrong password
/// * `500 Internal Server Error` - Store, hashing or signing failure
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<AuthResponse>), BackendError> {
    let (email, password) = request.validate()?;
    tracing::info!("Login request for: {}", email);

    let Some(user) = state.users.find_user_by_email(&email).await? else {
        verify_unknown_user(&password, state.config.auth.bcrypt_cost)?;
        tracing::warn!("Login for unknown email: {}", email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(&password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", user.id);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let tokens = state.tokens.issue(&user)?;
    let jar = set_auth_cookies(jar, &tokens, state.config.auth.cookie_secure);

    tracing::info!("User logged in successfully: {}", user.id);

    Ok((
        jar,
        ApiResponse::ok(
            AuthResponse {
                user: user.to_public(),
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            },
            "User logged in successfully",
        ),
    ))
}
