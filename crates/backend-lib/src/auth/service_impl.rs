use crate::auth::{AuthService, PasswordHasher};
use crate::error::AppError;
use crate::metrics::{LOGIN_FAILED, SESSION_CREATED, SESSION_REVOKED};
use crate::models::{IssuedToken, User};
use crate::storage::Store;
use async_trait::async_trait;
use metrics::counter;

/// `AuthService` over any `Store`
pub struct DefaultAuth<S> {
    store: S,
    hasher: PasswordHasher,
    token_bytes: usize,
}

impl<S: Store> DefaultAuth<S> {
    pub fn new(store: S, hasher: PasswordHasher, token_bytes: usize) -> Self {
        Self {
            store,
            hasher,
            token_bytes,
        }
    }
}

#[async_trait]
impl<S: Store> AuthService for DefaultAuth<S> {
    async fn login(&self, email: &str, password: &str) -> Result<(User, IssuedToken), AppError> {
        let user = match self.store.find_user_by_email(email).await? {
            Some(user) if self.hasher.verify(&user.password_hash, password) => user,
            _ => {
                counter!(LOGIN_FAILED).increment(1);
                tracing::warn!("login rejected");
                return Err(AppError::InvalidCredentials);
            },
        };

        let token = self.store.create_token(user.id, self.token_bytes).await?;
        counter!(SESSION_CREATED).increment(1);
        tracing::info!(user_id = %user.id, "session created");

        Ok((user, token))
    }

    async fn logout(&self, token: &str) -> Result<(), AppError> {
        if token.is_empty() {
            return Err(AppError::Unauthenticated);
        }

        let record = self
            .store
            .find_token(token)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        if self.store.delete_token(token).await? {
            counter!(SESSION_REVOKED).increment(1);
            tracing::info!(user_id = %record.user_id, "session revoked");
        } else {
            // a concurrent logout won the race; the token is gone either way
            tracing::debug!(user_id = %record.user_id, "session already revoked");
        }

        Ok(())
    }

    async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        if token.is_empty() {
            return Err(AppError::Unauthenticated);
        }

        let record = match self.store.find_token(token).await? {
            Some(record) => record,
            None => {
                tracing::warn!("unknown or revoked API token presented");
                return Err(AppError::Unauthenticated);
            },
        };

        match self.store.find_user_by_id(record.user_id).await {
            Ok(user) => Ok(user),
            Err(AppError::NotFound(_)) => Err(AppError::Unauthenticated),
            Err(err) => Err(err),
        }
    }
}
