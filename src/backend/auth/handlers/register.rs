/**
 * Register Handler
 *
 * This module implements the user registration handler for
 * POST /api/v1/users/registerUser.
 *
 * # Registration Process
 *
 * 1. Require email, name and password
 * 2. Normalize the email
 * 3. Hash the password using bcrypt
 * 4. Insert the user; the store rejects duplicate emails
 * 5. Return the public user (never the hash)
 */

use axum::extract::State;

use crate::backend::auth::handlers::types::RegisterRequest;
use crate::backend::auth::users::hash_password;
use crate::backend::error::{ApiJson, BackendError};
use crate::backend::server::state::AppState;
use crate::backend::store::{NewUser, StoreError};
use crate::shared::{ApiResponse, PublicUser};

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - A field is missing or blank
/// * `409 Conflict` - The email is already registered
/// * `500 Internal Server Error` - Hashing or store failure
///
/// # Example Request
///
/// ```http
/// POST /api/v1/users/registerUser HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "ada@example.com", "name": "Ada", "password": "correct horse" }
/// ```
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<ApiResponse<PublicUser>, BackendError> {
    let registration = request.validate()?;
    tracing::info!("Register request for: {}", registration.email);

    let password_hash = hash_password(&registration.password, state.config.auth.bcrypt_cost)?;

    let user = state
        .users
        .create_user(NewUser {
            email: registration.email,
            name: registration.name,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => {
                tracing::warn!("Registration with an existing email");
                BackendError::conflict("User with this email already exists")
            }
            other => other.into(),
        })?;

    tracing::info!("User registered: {}", user.id);
    Ok(ApiResponse::created(user.to_public(), "User registered successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::state::test_state;
    use axum::http::StatusCode;

    fn request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: Some(email.to_string()),
            name: Some("Ada".to_string()),
            password: Some("password123".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let state = test_state();
        let response = register(State(state.clone()), ApiJson(request("Ada@Example.com")))
            .await
            .unwrap();

        assert_eq!(response.status_code, 201);
        assert_eq!(response.data.email, "ada@example.com");

        let stored = state
            .users
            .find_user_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash, "password123");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let state = test_state();
        register(State(state.clone()), ApiJson(request("ada@example.com")))
            .await
            .unwrap();

        let err = register(State(state), ApiJson(request("ADA@example.com ")))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_register_missing_field() {
        let err = register(State(test_state()), ApiJson(RegisterRequest::default()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
