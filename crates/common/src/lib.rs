// ================
// common/src/lib.rs
// ================
//! Wire types shared between the accounts server and its clients.
//! Request payloads keep every field optional so the server can report
//! missing fields through its own error envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier type for users and groups
pub type Id = Uuid;

/// Body of `POST /users`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
}

/// Body of `PUT /users/:id`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
}

/// Body of `POST /sessions`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreateSessionRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /groups`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreateGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Outward representation of a user. Carries no credential material.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: Id,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Freshly issued bearer token. The `token` value is only ever sent once.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenView {
    #[serde(rename = "type")]
    pub kind: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl TokenView {
    /// Wrap a plaintext token value as a bearer token
    pub fn bearer(token: String, created_at: DateTime<Utc>) -> Self {
        Self {
            kind: "bearer".to_string(),
            token,
            created_at,
        }
    }
}

/// Outward representation of a group
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub id: Id,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `{ "user": ... }`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserBody {
    pub user: UserView,
}

/// `{ "user": ..., "token": ... }`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionBody {
    pub user: UserView,
    pub token: TokenView,
}

/// `{ "group": ... }`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GroupBody {
    pub group: GroupView,
}

/// Uniform error envelope returned by every failing endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    /// Machine-readable error family, e.g. `BAD_REQUEST`
    pub code: String,
    /// HTTP status code repeated in the body
    pub status: u16,
    /// Human readable message
    pub message: String,
}
