// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request payload validation.
//!
//! Wire payloads arrive with every field optional; the functions here turn
//! them into the typed commands the services accept, or report the first
//! field that fails.

use crate::models::{NewGroup, NewUser, UserChanges};
use accounts_common::{CreateGroupRequest, CreateUserRequest, UpdateUserRequest};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use url::Url;

const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit
const MAX_NAME_LENGTH: usize = 255;
const MAX_PASSWORD_LENGTH: usize = 128;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Possible validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid avatar: {0}")]
    InvalidAvatar(String),

    #[error("Invalid group name: {0}")]
    InvalidGroupName(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

fn required(value: Option<String>, field: &'static str) -> ValidationResult<String> {
    value.ok_or(ValidationError::Missing(field))
}

/// Empty strings count as "not supplied" for optional fields
fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validate an email address. Matching is exact: no case folding, no trimming.
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email must not be empty".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Email format is invalid".to_string(),
        ));
    }

    Ok(email)
}

pub fn validate_username(username: &str) -> ValidationResult<&str> {
    if username.trim().is_empty() {
        return Err(ValidationError::InvalidUsername(
            "Username must not be empty".to_string(),
        ));
    }

    if username.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::InvalidUsername(format!(
            "Username cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }

    Ok(username)
}

/// Validate a password against the configured minimum length
pub fn validate_password(password: &str, min_length: usize) -> ValidationResult<&str> {
    let len = password.chars().count();

    if len < min_length {
        return Err(ValidationError::InvalidPassword(format!(
            "Password must be at least {min_length} characters"
        )));
    }

    if len > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password cannot exceed {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(password)
}

/// Avatars must be absolute http(s) URLs
pub fn validate_avatar(avatar: &str) -> ValidationResult<&str> {
    let url = Url::parse(avatar)
        .map_err(|e| ValidationError::InvalidAvatar(format!("Avatar must be a URL ({e})")))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(avatar),
        _ => Err(ValidationError::InvalidAvatar(
            "Avatar must be an http or https URL".to_string(),
        )),
    }
}

pub fn validate_group_name(name: &str) -> ValidationResult<&str> {
    if name.trim().is_empty() {
        return Err(ValidationError::InvalidGroupName(
            "Group name must not be empty".to_string(),
        ));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::InvalidGroupName(format!(
            "Group name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }

    Ok(name)
}

/// Validate a `POST /users` payload
pub fn validate_create_user(
    req: CreateUserRequest,
    min_password_length: usize,
) -> ValidationResult<NewUser> {
    let email = required(req.email, "email")?;
    let username = required(req.username, "username")?;
    let password = required(req.password, "password")?;
    let avatar = optional(req.avatar);

    validate_email(&email)?;
    validate_username(&username)?;
    validate_password(&password, min_password_length)?;
    if let Some(avatar) = &avatar {
        validate_avatar(avatar)?;
    }

    Ok(NewUser {
        email,
        username,
        password,
        avatar,
    })
}

/// Validate a `PUT /users/:id` payload
pub fn validate_update_user(
    req: UpdateUserRequest,
    min_password_length: usize,
) -> ValidationResult<UserChanges> {
    let email = required(req.email, "email")?;
    let password = required(req.password, "password")?;
    let avatar = optional(req.avatar);

    validate_email(&email)?;
    validate_password(&password, min_password_length)?;
    if let Some(avatar) = &avatar {
        validate_avatar(avatar)?;
    }

    Ok(UserChanges {
        email,
        password,
        avatar,
    })
}

/// Validate a `POST /groups` payload
pub fn validate_create_group(req: CreateGroupRequest) -> ValidationResult<NewGroup> {
    let name = required(req.name, "name")?;
    validate_group_name(&name)?;

    Ok(NewGroup {
        name: name.trim().to_string(),
        description: optional(req.description),
    })
}
