use crate::error::AppError;
use crate::models::{IssuedToken, User};
use async_trait::async_trait;

/// Session lifecycle: credentials become a token, a token identifies a
/// user, and logout revokes the token for good.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange email and password for a fresh bearer token.
    /// Unknown email and wrong password both fail with `InvalidCredentials`.
    async fn login(&self, email: &str, password: &str) -> Result<(User, IssuedToken), AppError>;

    /// Revoke a bearer token. Empty or unknown tokens fail with `Unauthenticated`.
    async fn logout(&self, token: &str) -> Result<(), AppError>;

    /// Resolve a bearer token to its user without side effects
    async fn authenticate(&self, token: &str) -> Result<User, AppError>;
}
