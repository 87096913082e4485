/**
 * User Routes
 *
 * Mounted under `/api/v1/users`.
 *
 * ## Public
 * - `POST /registerUser` - User registration
 * - `POST /loginUser` - User login, sets auth cookies
 * - `POST /refreshToken` - New token pair from a refresh token
 *
 * ## Authenticated
 * - `POST /logoutUser` - Clears auth cookies
 * - `GET /currentUser` - Current user info
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{current_user, login, logout, refresh, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure user routes
///
/// # Arguments
///
/// * `app_state` - Needed by the auth middleware on the protected routes
pub fn configure_user_routes(app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/logoutUser", post(logout))
        .route("/currentUser", get(current_user))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    Router::new()
        .route("/registerUser", post(register))
        .route("/loginUser", post(login))
        .route("/refreshToken", post(refresh))
        .merge(protected)
}
