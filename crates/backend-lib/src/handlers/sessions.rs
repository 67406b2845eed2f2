//! `POST /sessions` and `DELETE /sessions`
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::storage::Store;
use crate::AppState;
use accounts_common::{CreateSessionRequest, SessionBody, TokenView};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

/// Log in. Missing credentials are reported exactly like wrong ones.
pub async fn store<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionBody>), AppError> {
    let Json(payload) = payload.map_err(|_| AppError::InvalidCredentials)?;
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(AppError::InvalidCredentials);
    };

    let (user, token) = state.auth.login(&email, &password).await?;
    let body = SessionBody {
        user: user.view(),
        token: TokenView::bearer(token.value, token.record.created_at),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

/// Log out: revoke the presented bearer token
pub async fn destroy<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    current: CurrentUser,
) -> Result<StatusCode, AppError> {
    state.auth.logout(&current.token).await?;
    Ok(StatusCode::OK)
}
