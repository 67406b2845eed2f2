use crate::test_utils::{send, setup_test_app};
use axum::http::{Method, StatusCode};
use backend_lib::storage::GroupStore;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_group() {
    let (app, state) = setup_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/groups",
        None,
        Some(json!({ "name": "Lifters", "description": "Saturday crew" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["group"]["name"], "Lifters");
    assert_eq!(body["group"]["description"], "Saturday crew");

    let id = Uuid::parse_str(body["group"]["id"].as_str().unwrap()).unwrap();
    let stored = state.storage.find_group_by_id(id).await.unwrap();
    assert_eq!(stored.name, "Lifters");
}

#[tokio::test]
async fn test_group_names_need_not_be_unique() {
    let (app, _) = setup_test_app();

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            Method::POST,
            "/groups",
            None,
            Some(json!({ "name": "Lifters" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_create_group_rejects_invalid_payload() {
    let (app, _) = setup_test_app();

    for payload in [json!({}), json!({ "name": "   " })] {
        let (status, body) = send(&app, Method::POST, "/groups", None, Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "BAD_REQUEST");
    }
}
