//! `POST /users` and `PUT /users/{id}`
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::storage::Store;
use crate::validation::{validate_create_user, validate_update_user, ValidationError};
use crate::AppState;
use accounts_common::{CreateUserRequest, UpdateUserRequest, UserBody};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// Register a new user
pub async fn store<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserBody>), AppError> {
    let Json(payload) = payload.map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
    let new_user = validate_create_user(payload, state.settings.auth.min_password_length)?;

    let user = state.users.register(new_user).await?;
    Ok((StatusCode::CREATED, Json(UserBody { user: user.view() })))
}

/// Update email, password and optionally avatar. Requires a bearer token.
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    _current: CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserBody>, AppError> {
    let Json(payload) = payload.map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
    let changes = validate_update_user(payload, state.settings.auth.min_password_length)?;

    // an id that cannot exist is simply not found
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFound(format!("user {id}")))?;

    let user = state.users.update(id, changes).await?;
    Ok(Json(UserBody { user: user.view() }))
}
