//! Bearer-token authentication guard.
use crate::error::AppError;
use crate::models::User;
use crate::storage::Store;
use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use std::sync::Arc;

/// The user behind a valid `Authorization: Bearer <token>` header.
///
/// Extracting it is a pure lookup: no expiry, no refresh, no side effects.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    /// The bearer value exactly as presented
    pub token: String,
}

/// Pull the token out of an `Authorization` header.
/// Missing header, wrong scheme, or an empty/ill-formed token is `Unauthenticated`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AppError::Unauthenticated)?
        .to_str()
        .map_err(|_| AppError::Unauthenticated)?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(AppError::Unauthenticated)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::Unauthenticated);
    }

    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AppError::Unauthenticated);
    }
    Ok(token)
}

impl<S: Store> FromRequestParts<Arc<AppState<S>>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<S>>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?.to_string();
        let user = state.auth.authenticate(&token).await?;
        Ok(CurrentUser { user, token })
    }
}
