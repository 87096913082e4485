/**
 * Session Tokens
 *
 * This module issues and verifies the two JWTs that make up a session:
 *
 * - **Access token** - short-lived, carries `{ id, email, name }`, signed
 *   with the access secret
 * - **Refresh token** - long-lived, carries `{ id }` only, signed with the
 *   refresh secret
 *
 * The secrets are distinct, so a token of one kind never verifies as the
 * other. Tokens are stateless; nothing is recorded server-side.
 */

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::backend::server::config::{AuthConfig, ConfigError};

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// User ID
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Claims carried by a refresh token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshClaims {
    pub id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly issued access/refresh pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SigningKeys {
    fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    fn window(&self) -> (i64, i64) {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        (now, now.saturating_add(ttl))
    }
}

/// Signs and verifies session tokens; cheap to clone
#[derive(Clone)]
pub struct TokenIssuer {
    access: Arc<SigningKeys>,
    refresh: Arc<SigningKeys>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access.ttl)
            .field("refresh_ttl", &self.refresh.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(
        access_secret: &str,
        access_ttl: Duration,
        refresh_secret: &str,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access: Arc::new(SigningKeys::new(access_secret, access_ttl)),
            refresh: Arc::new(SigningKeys::new(refresh_secret, refresh_ttl)),
        }
    }

    /// Build an issuer from the auth section of the server configuration
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidDuration` if an expiry does not parse.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            &config.access_token_secret,
            config.access_lifetime()?,
            &config.refresh_token_secret,
            config.refresh_lifetime()?,
        ))
    }

    /// Create an access token for a user
    pub fn issue_access(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let (iat, exp) = self.access.window();
        let claims = AccessClaims {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            iat,
            exp,
        };
        encode(&Header::default(), &claims, &self.access.encoding)
    }

    /// Create a refresh token for a user
    pub fn issue_refresh(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let (iat, exp) = self.refresh.window();
        let claims = RefreshClaims { id: user_id, iat, exp };
        encode(&Header::default(), &claims, &self.refresh.encoding)
    }

    /// Create both tokens for a user
    pub fn issue(&self, user: &User) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: self.issue_access(user)?,
            refresh_token: self.issue_refresh(user.id)?,
        })
    }

    /// Verify an access token's signature and expiry
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
        let data = decode::<AccessClaims>(token, &self.access.decoding, &Validation::default())?;
        Ok(data.claims)
    }

    /// Verify a refresh token's signature and expiry
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, jsonwebtoken::errors::Error> {
        let data = decode::<RefreshClaims>(token, &self.refresh.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}
