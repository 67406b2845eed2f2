// ============================
// accounts-backend/src/router.rs
// ============================
//! HTTP routes.
use crate::handlers::{self, groups, sessions, users};
use crate::storage::Store;
use crate::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the application router
pub fn create_router<S: Store>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/users", post(users::store::<S>))
        .route("/users/{id}", put(users::update::<S>))
        .route(
            "/sessions",
            post(sessions::store::<S>).delete(sessions::destroy::<S>),
        )
        .route("/groups", post(groups::store::<S>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
