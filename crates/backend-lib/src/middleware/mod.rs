// crates/backend-lib/src/middleware/mod.rs

//! Request guards for the accounts HTTP surface.

pub mod auth;

pub use auth::{bearer_token, CurrentUser};
