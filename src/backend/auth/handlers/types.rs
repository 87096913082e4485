/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication
 * handlers. Request fields are optional so that a missing field is reported
 * through the error envelope as a validation error rather than as a JSON
 * rejection.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::normalize_email;
use crate::shared::error::{non_blank, SharedError};
use crate::shared::PublicUser;

/// Register request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Plain password (hashed before storage)
    #[serde(default)]
    pub password: Option<String>,
}

/// Register request after validation
#[derive(Debug)]
pub struct ValidRegistration {
    /// Normalized (trimmed, lowercase) email
    pub email: String,
    pub name: String,
    pub password: String,
}

impl RegisterRequest {
    /// Require every field to be present and non-blank
    pub fn validate(self) -> Result<ValidRegistration, SharedError> {
        let email = non_blank(self.email);
        let name = non_blank(self.name);
        let password = self.password.filter(|p| !p.trim().is_empty());

        match (email, name, password) {
            (Some(email), Some(name), Some(password)) => Ok(ValidRegistration {
                email: normalize_email(&email),
                name,
                password,
            }),
            (None, _, _) => Err(SharedError::validation("email", "All fields are required")),
            (_, None, _) => Err(SharedError::validation("name", "All fields are required")),
            (_, _, None) => Err(SharedError::validation("password", "All fields are required")),
        }
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns the normalized email and the password
    pub fn validate(self) -> Result<(String, String), SharedError> {
        let email = non_blank(self.email)
            .ok_or_else(|| SharedError::validation("email", "Email and password are required"))?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| SharedError::validation("password", "Email and password are required"))?;
        Ok((normalize_email(&email), password))
    }
}

/// Refresh request body, used when the refresh cookie is absent
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Login and refresh response data
///
/// The tokens are also set as cookies; they are repeated in the body for
/// clients that send them back in the `Authorization` header.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
}

/// Logout response data
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogoutResponse {
    pub id: Uuid,
    pub email: String,
}
