// ============================
// accounts-backend/src/storage.rs
// ============================
//! Storage abstraction with in-memory and flat-file implementations.
//!
//! Services receive a store explicitly; nothing here is a global. The store
//! owns the authoritative uniqueness constraint on `email` and `username`:
//! service-level pre-checks only exist to produce the common-case error early.
use crate::auth::token_generator::{generate_secure_token_with_size, token_digest};
use crate::error::AppError;
use crate::models::{ApiToken, Group, IssuedToken, User};
use accounts_common::Id;
use async_trait::async_trait;
use chrono::Utc;

pub mod flat_file;
pub mod memory;

pub use flat_file::FlatFileStorage;
pub use memory::MemoryStore;

/// Lookup and persistence of user records
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Fails with `NotFound` when absent
    async fn find_user_by_id(&self, id: Id) -> Result<User, AppError>;

    /// Fails with `Conflict` if email or username is already taken
    async fn insert_user(&self, user: User) -> Result<User, AppError>;

    /// Replace a stored user. Fails with `NotFound` for unknown ids and
    /// `Conflict` if the new email belongs to another user.
    async fn update_user(&self, user: User) -> Result<User, AppError>;
}

/// Bearer token persistence. Records are keyed by the token digest.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn insert_token(&self, token: ApiToken) -> Result<(), AppError>;

    async fn find_token_by_digest(&self, digest: &str) -> Result<Option<ApiToken>, AppError>;

    /// Returns whether a record was removed
    async fn delete_token_by_digest(&self, digest: &str) -> Result<bool, AppError>;

    /// Remove every token owned by `user_id`, returning how many were removed
    async fn delete_tokens_for_user(&self, user_id: Id) -> Result<usize, AppError>;

    /// Mint a random token for `user_id`. The plaintext value is only
    /// available in the returned `IssuedToken`.
    async fn create_token(&self, user_id: Id, token_bytes: usize) -> Result<IssuedToken, AppError> {
        let value = generate_secure_token_with_size(token_bytes);
        let record = ApiToken {
            token_hash: token_digest(&value),
            user_id,
            created_at: Utc::now(),
        };
        self.insert_token(record.clone()).await?;
        Ok(IssuedToken { value, record })
    }

    async fn find_token(&self, value: &str) -> Result<Option<ApiToken>, AppError> {
        self.find_token_by_digest(&token_digest(value)).await
    }

    /// Idempotent: deleting an unknown token is not an error
    async fn delete_token(&self, value: &str) -> Result<bool, AppError> {
        self.delete_token_by_digest(&token_digest(value)).await
    }
}

#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn insert_group(&self, group: Group) -> Result<Group, AppError>;

    async fn find_group_by_id(&self, id: Id) -> Result<Group, AppError>;
}

/// Everything the services need from a backing store
pub trait Store: CredentialStore + TokenStore + GroupStore + Clone + 'static {}

impl<T> Store for T where T: CredentialStore + TokenStore + GroupStore + Clone + 'static {}
