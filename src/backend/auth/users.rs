/**
 * User Model and Database Operations
 *
 * This module holds the stored user record, password hashing helpers and the
 * PostgreSQL implementation of `UserStore`.
 */

use std::sync::OnceLock;

use async_trait::async_trait;
use bcrypt::{hash, verify};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::store::{NewUser, StoreError, UserStore};
use crate::shared::PublicUser;

/// User struct representing a user in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// User email address (unique, stored lowercase)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The projection of this user that may be sent to clients.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// Hash a password with bcrypt at the given cost
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a stored bcrypt hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, password_hash)
}

/// Run one bcrypt verification against a hash that belongs to no user
///
/// Unknown emails pay the same bcrypt cost as a wrong password, so login
/// timing does not reveal which emails are registered. Always `false`.
pub fn verify_unknown_user(password: &str, cost: u32) -> Result<bool, bcrypt::BcryptError> {
    static PLACEHOLDER: OnceLock<(u32, String)> = OnceLock::new();

    let (placeholder_cost, placeholder_hash) = match PLACEHOLDER.get() {
        Some(cached) => cached,
        None => {
            let fresh = (cost, hash(Uuid::new_v4().to_string(), cost)?);
            PLACEHOLDER.get_or_init(|| fresh)
        }
    };

    if *placeholder_cost == cost {
        verify(password, placeholder_hash)?;
    } else {
        hash(password, cost)?;
    }
    Ok(false)
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    /// Create a new user
    ///
    /// # Returns
    /// Created user, or `StoreError::Conflict` if the email is taken
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                StoreError::Conflict("User with this email already exists".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// Get user by email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by ID
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("password123", 4).unwrap();
        assert!(verify_password("password123", &hashed).unwrap());
        assert!(!verify_password("wrongpassword", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same", 4).unwrap();
        let b = hash_password("same", 4).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unknown_user_never_verifies() {
        assert!(!verify_unknown_user("password123", 4).unwrap());
        assert!(!verify_unknown_user("", 4).unwrap());
        // A different cost still does the work and still fails.
        assert!(!verify_unknown_user("password123", 5).unwrap());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_to_public_omits_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "secret-hash".to_string(),
            created_at: Utc::now(),
        };
        let public = serde_json::to_string(&user.to_public()).unwrap();
        assert!(!public.contains("secret-hash"));
    }
}
