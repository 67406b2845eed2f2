use crate::test_utils::{login, register, send, setup_test_app};
use axum::http::{Method, StatusCode};
use backend_lib::auth::verify_password;
use backend_lib::storage::CredentialStore;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_register_returns_user_without_password() {
    let (app, state) = setup_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({
            "email": "john@example.com",
            "username": "john",
            "password": "secret",
            "avatar": "http://images.com/images/1",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let user = &body["user"];
    assert_eq!(user["email"], "john@example.com");
    assert_eq!(user["username"], "john");
    assert_eq!(user["avatar"], "http://images.com/images/1");
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());

    let stored = state
        .storage
        .find_user_by_email("john@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, "secret");
    assert!(verify_password(&stored.password_hash, "secret"));
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let (app, _) = setup_test_app();
    register(&app, "john@example.com", "john", "secret").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({
            "email": "john@example.com",
            "username": "johnny",
            "password": "secret",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["status"], 409);
    assert!(body["message"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let (app, _) = setup_test_app();
    register(&app, "john@example.com", "john", "secret").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({
            "email": "other@example.com",
            "username": "john",
            "password": "secret",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("username"));
}

#[tokio::test]
async fn test_register_rejects_invalid_payloads() {
    let (app, state) = setup_test_app();

    let payloads = vec![
        json!({}),
        json!({ "username": "john", "password": "secret" }),
        json!({ "email": "not-an-email", "username": "john", "password": "secret" }),
        json!({ "email": "john@example.com", "username": "john", "password": "abc" }),
        json!({
            "email": "john@example.com",
            "username": "john",
            "password": "secret",
            "avatar": "not a url",
        }),
    ];

    for payload in payloads {
        let (status, body) =
            send(&app, Method::POST, "/users", None, Some(payload.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "payload: {payload}");
        assert_eq!(body["status"], 422);
    }

    assert!(state
        .storage
        .find_user_by_username("john")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_update_changes_email_and_password() {
    let (app, state) = setup_test_app();
    let user = register(&app, "john@example.com", "john", "secret").await;
    let token = login(&app, "john@example.com", "secret").await;
    let id = user["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/users/{id}"),
        Some(&token),
        Some(json!({ "email": "new@example.com", "password": "better-secret" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "new@example.com");
    assert_eq!(body["user"]["username"], "john");
    assert_eq!(body["user"]["created_at"], user["created_at"]);
    assert!(body["user"].get("password").is_none());

    let stored = state
        .storage
        .find_user_by_id(Uuid::parse_str(id).unwrap())
        .await
        .unwrap();
    assert!(verify_password(&stored.password_hash, "better-secret"));
    assert!(!verify_password(&stored.password_hash, "secret"));

    // the old email no longer logs in, the new one does
    let (status, _) = send(
        &app,
        Method::POST,
        "/sessions",
        None,
        Some(json!({ "email": "john@example.com", "password": "better-secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    login(&app, "new@example.com", "better-secret").await;
}

#[tokio::test]
async fn test_update_without_avatar_keeps_it() {
    let (app, _) = setup_test_app();
    let (_, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({
            "email": "john@example.com",
            "username": "john",
            "password": "secret",
            "avatar": "http://images.com/images/1",
        })),
    )
    .await;
    let id = body["user"]["id"].as_str().unwrap().to_string();
    let token = login(&app, "john@example.com", "secret").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/users/{id}"),
        Some(&token),
        Some(json!({ "email": "john@example.com", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["avatar"], "http://images.com/images/1");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/users/{id}"),
        Some(&token),
        Some(json!({
            "email": "john@example.com",
            "password": "secret",
            "avatar": "https://images.com/images/2",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["avatar"], "https://images.com/images/2");
}

#[tokio::test]
async fn test_update_requires_token() {
    let (app, _) = setup_test_app();
    let user = register(&app, "john@example.com", "john", "secret").await;
    let uri = format!("/users/{}", user["id"].as_str().unwrap());
    let payload = json!({ "email": "new@example.com", "password": "secret" });

    let (status, body) = send(&app, Method::PUT, &uri, None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = send(&app, Method::PUT, &uri, Some("made-up"), Some(payload)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_unknown_user_is_not_found() {
    let (app, _) = setup_test_app();
    register(&app, "john@example.com", "john", "secret").await;
    let token = login(&app, "john@example.com", "secret").await;
    let payload = json!({ "email": "new@example.com", "password": "secret" });

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", Uuid::new_v4()),
        Some(&token),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/users/not-a-uuid",
        Some(&token),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rejects_invalid_payload() {
    let (app, _) = setup_test_app();
    let user = register(&app, "john@example.com", "john", "secret").await;
    let token = login(&app, "john@example.com", "secret").await;
    let uri = format!("/users/{}", user["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "email": "john@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "email": "nope", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_to_taken_email_conflicts() {
    let (app, _) = setup_test_app();
    let user = register(&app, "john@example.com", "john", "secret").await;
    register(&app, "jane@example.com", "jane", "secret").await;
    let token = login(&app, "john@example.com", "secret").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", user["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({ "email": "jane@example.com", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("email"));
}
