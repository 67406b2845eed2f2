// ============================
// accounts-backend/src/groups.rs
// ============================
//! Group creation. No uniqueness and no derived fields.
use crate::error::AppError;
use crate::metrics::GROUP_CREATED;
use crate::models::{Group, NewGroup};
use crate::storage::GroupStore;
use chrono::Utc;
use metrics::counter;
use uuid::Uuid;

pub async fn create_group<S: GroupStore>(store: &S, new_group: NewGroup) -> Result<Group, AppError> {
    let group = store
        .insert_group(Group {
            id: Uuid::new_v4(),
            name: new_group.name,
            description: new_group.description,
            created_at: Utc::now(),
        })
        .await?;

    counter!(GROUP_CREATED).increment(1);
    tracing::info!(group_id = %group.id, "group created");
    Ok(group)
}
