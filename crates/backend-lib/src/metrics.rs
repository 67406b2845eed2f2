// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const USER_REGISTERED: &str = "user.registered";
pub const USER_UPDATED: &str = "user.updated";
pub const USER_CONFLICT: &str = "user.conflict";
pub const SESSION_CREATED: &str = "session.created";
pub const SESSION_REVOKED: &str = "session.revoked";
pub const LOGIN_FAILED: &str = "session.login_failed";
pub const GROUP_CREATED: &str = "group.created";
