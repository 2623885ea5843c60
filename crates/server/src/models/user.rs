//! User account models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use beauty_queen_core::{Email, UserId};

/// A registered user.
///
/// The password hash is never part of this struct; repositories return it
/// separately where verification needs it.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Email address (unique, lowercased).
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The authenticated user attached to a request by the auth extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}
