// ============================
// accounts-backend/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod token_generator;
mod service;
mod service_impl;

pub use password::{verify_password, PasswordHasher};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
pub use token_generator::token_digest;
