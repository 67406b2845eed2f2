// ============================
// accounts-backend/src/users.rs
// ============================
//! User lifecycle: registration and profile updates.
use crate::auth::PasswordHasher;
use crate::error::AppError;
use crate::metrics::{USER_CONFLICT, USER_REGISTERED, USER_UPDATED};
use crate::models::{NewUser, UniqueField, User, UserChanges};
use crate::storage::Store;
use accounts_common::Id;
use chrono::Utc;
use metrics::counter;
use uuid::Uuid;

pub struct UserService<S> {
    store: S,
    hasher: PasswordHasher,
}

impl<S: Store> UserService<S> {
    pub fn new(store: S, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Create an account. Email is checked before username and the first
    /// taken field alone decides the error; the store re-checks both on insert.
    pub async fn register(&self, new_user: NewUser) -> Result<User, AppError> {
        let NewUser {
            email,
            username,
            mut password,
            avatar,
        } = new_user;

        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(conflict(UniqueField::Email));
        }
        if self.store.find_user_by_username(&username).await?.is_some() {
            return Err(conflict(UniqueField::Username));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            username,
            password_hash: self.hasher.hash_secure(&mut password)?,
            avatar,
            created_at: now,
            updated_at: now,
        };

        let user = match self.store.insert_user(user).await {
            Ok(user) => user,
            Err(AppError::Conflict(field)) => return Err(conflict(field)),
            Err(err) => return Err(err),
        };

        counter!(USER_REGISTERED).increment(1);
        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Replace email and password, and the avatar only when one is supplied.
    /// The username never changes. Email is not re-checked here; the store's
    /// unique index still rejects an address owned by someone else.
    pub async fn update(&self, id: Id, changes: UserChanges) -> Result<User, AppError> {
        let mut user = self.store.find_user_by_id(id).await?;
        let UserChanges {
            email,
            mut password,
            avatar,
        } = changes;

        user.email = email;
        user.password_hash = self.hasher.hash_secure(&mut password)?;
        if let Some(avatar) = avatar {
            user.avatar = Some(avatar);
        }
        user.updated_at = Utc::now();

        let user = self.store.update_user(user).await?;
        counter!(USER_UPDATED).increment(1);
        tracing::info!(user_id = %user.id, "user updated");
        Ok(user)
    }
}

fn conflict(field: UniqueField) -> AppError {
    counter!(USER_CONFLICT).increment(1);
    tracing::info!(%field, "registration rejected");
    AppError::Conflict(field)
}
