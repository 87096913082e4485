/**
 * Public User Data
 *
 * The projection of a user record that may leave the server. The password
 * hash is deliberately absent from this type.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User information that is safe to return to clients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// User's unique ID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
}
