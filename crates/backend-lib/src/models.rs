// ============================
// accounts-backend/src/models.rs
// ============================
//! Persisted records and the validated commands that create or change them.
use accounts_common::{GroupView, Id, UserView};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered account as the store keeps it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public representation, without the password hash
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            avatar: self.avatar.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Stored half of an API token. Only the digest of the bearer value is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiToken {
    pub token_hash: String,
    pub user_id: Id,
    pub created_at: DateTime<Utc>,
}

/// A token handed to the client right after login. `value` is not recoverable later.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub value: String,
    pub record: ApiToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn view(&self) -> GroupView {
        GroupView {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
        }
    }
}

/// Fields that carry a uniqueness constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueField {
    Email,
    Username,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::Email => f.write_str("email"),
            UniqueField::Username => f.write_str("username"),
        }
    }
}

/// Validated registration payload
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
    pub avatar: Option<String>,
}

/// Validated profile update. `avatar: None` leaves the stored avatar alone.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub email: String,
    pub password: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewGroup {
    pub name: String,
    pub description: Option<String>,
}
