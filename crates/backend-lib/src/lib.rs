// ============================
// accounts-backend/src/lib.rs
// ============================
//! Core functionality for the accounts server: registration, profile
//! updates and API-token sessions.

pub mod auth;
pub mod config;
pub mod error;
pub mod groups;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod router;
pub mod storage;
pub mod telemetry;
pub mod users;
pub mod validation;

use crate::auth::{AuthService, DefaultAuth, PasswordHasher};
use crate::config::Settings;
use crate::error::AppError;
use crate::storage::Store;
use crate::users::UserService;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Session service
    pub auth: Arc<dyn AuthService>,
    /// User lifecycle service
    pub users: Arc<UserService<S>>,
    /// Settings the process started with
    pub settings: Arc<Settings>,
    /// Storage backend
    pub storage: S,
}

impl<S: Store> AppState<S> {
    /// Wire the services to one shared store
    pub fn new(storage: S, settings: Settings) -> Result<Self, AppError> {
        let hasher = PasswordHasher::with_log_n(settings.auth.scrypt_log_n)?;
        let auth = Arc::new(DefaultAuth::new(
            storage.clone(),
            hasher.clone(),
            settings.auth.token_bytes,
        ));
        let users = Arc::new(UserService::new(storage.clone(), hasher));

        Ok(Self {
            auth,
            users,
            settings: Arc::new(settings),
            storage,
        })
    }
}
