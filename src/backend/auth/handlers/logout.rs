/**
 * Logout Handler
 *
 * POST /api/v1/users/logoutUser
 *
 * Clears both auth cookies. Tokens are stateless, so an access token copied
 * before logout stays valid until it expires.
 */

use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::cookies::clear_auth_cookies;
use crate::backend::auth::handlers::types::LogoutResponse;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    jar: CookieJar,
) -> (CookieJar, ApiResponse<LogoutResponse>) {
    tracing::info!("User logged out: {}", user.id);

    (
        clear_auth_cookies(jar, state.config.auth.cookie_secure),
        ApiResponse::ok(
            LogoutResponse {
                id: user.id,
                email: user.email,
            },
            "User logged out successfully",
        ),
    )
}
