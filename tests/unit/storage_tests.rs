use crate::test_utils::test_settings;
use accounts_common::CreateUserRequest;
use backend_lib::{
    error::AppError,
    models::UniqueField,
    storage::{CredentialStore, FlatFileStorage, MemoryStore, TokenStore},
    validation::validate_create_user,
    AppState,
};
use tempfile::tempdir;

fn request(email: &str, username: &str) -> CreateUserRequest {
    CreateUserRequest {
        email: Some(email.to_string()),
        username: Some(username.to_string()),
        password: Some("secret".to_string()),
        avatar: None,
    }
}

#[tokio::test]
async fn test_services_share_one_memory_store() {
    let state = AppState::new(MemoryStore::new(), test_settings()).unwrap();
    let new_user = validate_create_user(request("a@x.com", "a"), 4).unwrap();

    let user = state.users.register(new_user).await.unwrap();
    let (logged_in, token) = state.auth.login("a@x.com", "secret").await.unwrap();

    assert_eq!(logged_in.id, user.id);
    assert_eq!(state.storage.token_count().await, 1);
    assert!(state.storage.find_token(&token.value).await.unwrap().is_some());
}

#[tokio::test]
async fn test_flat_file_state_survives_restart() {
    let temp_dir = tempdir().unwrap();

    let (user_id, token) = {
        let storage = FlatFileStorage::new(temp_dir.path()).unwrap();
        let state = AppState::new(storage, test_settings()).unwrap();
        let new_user = validate_create_user(request("a@x.com", "a"), 4).unwrap();
        let user = state.users.register(new_user).await.unwrap();
        let (_, token) = state.auth.login("a@x.com", "secret").await.unwrap();
        (user.id, token.value)
    };

    let storage = FlatFileStorage::new(temp_dir.path()).unwrap();
    let state = AppState::new(storage, test_settings()).unwrap();

    assert_eq!(state.auth.authenticate(&token).await.unwrap().id, user_id);
    let again = validate_create_user(request("a@x.com", "other"), 4).unwrap();
    assert!(matches!(
        state.users.register(again).await,
        Err(AppError::Conflict(UniqueField::Email))
    ));
}

#[tokio::test]
async fn test_flat_file_logout_survives_restart() {
    let temp_dir = tempdir().unwrap();

    let token = {
        let storage = FlatFileStorage::new(temp_dir.path()).unwrap();
        let state = AppState::new(storage, test_settings()).unwrap();
        let new_user = validate_create_user(request("a@x.com", "a"), 4).unwrap();
        state.users.register(new_user).await.unwrap();
        let (_, token) = state.auth.login("a@x.com", "secret").await.unwrap();
        state.auth.logout(&token.value).await.unwrap();
        token.value
    };

    let storage = FlatFileStorage::new(temp_dir.path()).unwrap();
    assert!(storage.find_token(&token).await.unwrap().is_none());
    assert!(storage.find_user_by_email("a@x.com").await.unwrap().is_some());
}
