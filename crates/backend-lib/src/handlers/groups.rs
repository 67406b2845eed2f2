//! `POST /groups`
use crate::error::AppError;
use crate::groups::create_group;
use crate::storage::Store;
use crate::validation::{validate_create_group, ValidationError};
use crate::AppState;
use accounts_common::{CreateGroupRequest, GroupBody};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

pub async fn store<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateGroupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GroupBody>), AppError> {
    let Json(payload) = payload.map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
    let new_group = validate_create_group(payload)?;

    let group = create_group(&state.storage, new_group).await?;
    Ok((StatusCode::CREATED, Json(GroupBody { group: group.view() })))
}
