//! In-process tables guarded by a single lock.
use super::{CredentialStore, GroupStore, TokenStore};
use crate::error::AppError;
use crate::models::{ApiToken, Group, UniqueField, User};
use accounts_common::Id;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Serializable image of every table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub tokens: Vec<ApiToken>,
    pub groups: Vec<Group>,
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Id, User>,
    by_email: HashMap<String, Id>,
    by_username: HashMap<String, Id>,
    tokens: HashMap<String, ApiToken>,
    groups: HashMap<Id, Group>,
}

impl Tables {
    /// First unique field of `user` already held by a different record
    fn conflict_for(&self, user: &User) -> Option<UniqueField> {
        let taken_by_other =
            |index: &HashMap<String, Id>, key: &str| index.get(key).is_some_and(|id| *id != user.id);

        if taken_by_other(&self.by_email, &user.email) {
            return Some(UniqueField::Email);
        }
        if taken_by_other(&self.by_username, &user.username) {
            return Some(UniqueField::Username);
        }
        None
    }

    fn put_user(&mut self, user: User) {
        if let Some(previous) = self.users.get(&user.id) {
            self.by_email.remove(&previous.email);
            self.by_username.remove(&previous.username);
        }
        self.by_email.insert(user.email.clone(), user.id);
        self.by_username.insert(user.username.clone(), user.id);
        self.users.insert(user.id, user);
    }
}

/// Store backed by process memory. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a snapshot, rejecting duplicate unique keys
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, AppError> {
        let mut tables = Tables::default();
        for user in snapshot.users {
            if let Some(field) = tables.conflict_for(&user) {
                return Err(AppError::Internal(format!(
                    "snapshot holds duplicate {field} for user {}",
                    user.id
                )));
            }
            tables.put_user(user);
        }
        tables.tokens = snapshot
            .tokens
            .into_iter()
            .map(|t| (t.token_hash.clone(), t))
            .collect();
        tables.groups = snapshot.groups.into_iter().map(|g| (g.id, g)).collect();

        Ok(Self {
            tables: Arc::new(RwLock::new(tables)),
        })
    }

    pub async fn snapshot(&self) -> Snapshot {
        let tables = self.tables.read().await;
        Snapshot {
            users: tables.users.values().cloned().collect(),
            tokens: tables.tokens.values().cloned().collect(),
            groups: tables.groups.values().cloned().collect(),
        }
    }

    /// Move every table out of `staged` into this store in one step
    pub(crate) async fn replace_with(&self, staged: MemoryStore) {
        let tables = std::mem::take(&mut *staged.tables.write().await);
        *self.tables.write().await = tables;
    }

    pub async fn token_count(&self) -> usize {
        self.tables.read().await.tokens.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_username
            .get(username)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_user_by_id(&self, id: Id) -> Result<User, AppError> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("user {id}")))
    }

    async fn insert_user(&self, user: User) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.id) {
            return Err(AppError::Internal(format!("duplicate user id {}", user.id)));
        }
        if let Some(field) = tables.conflict_for(&user) {
            return Err(AppError::Conflict(field));
        }
        tables.put_user(user.clone());
        tracing::debug!(user_id = %user.id, "user inserted");
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(AppError::NotFound(format!("user {}", user.id)));
        }
        if let Some(field) = tables.conflict_for(&user) {
            return Err(AppError::Conflict(field));
        }
        tables.put_user(user.clone());
        tracing::debug!(user_id = %user.id, "user updated");
        Ok(user)
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    async fn insert_token(&self, token: ApiToken) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if tables.tokens.contains_key(&token.token_hash) {
            return Err(AppError::Internal("token digest collision".to_string()));
        }
        tables.tokens.insert(token.token_hash.clone(), token);
        Ok(())
    }

    async fn find_token_by_digest(&self, digest: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self.tables.read().await.tokens.get(digest).cloned())
    }

    async fn delete_token_by_digest(&self, digest: &str) -> Result<bool, AppError> {
        Ok(self.tables.write().await.tokens.remove(digest).is_some())
    }

    async fn delete_tokens_for_user(&self, user_id: Id) -> Result<usize, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.tokens.len();
        tables.tokens.retain(|_, t| t.user_id != user_id);
        Ok(before - tables.tokens.len())
    }
}

#[async_trait]
impl GroupStore for MemoryStore {
    async fn insert_group(&self, group: Group) -> Result<Group, AppError> {
        let mut tables = self.tables.write().await;
        tables.groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn find_group_by_id(&self, id: Id) -> Result<Group, AppError> {
        self.tables
            .read()
            .await
            .groups
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("group {id}")))
    }
}
