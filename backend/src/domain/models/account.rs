//! Domain models for user accounts and login sessions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. `id` is the login name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// A logged-in user, looked up by bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub is_admin: bool,
    pub login_time: DateTime<Utc>,
}

/// Sessions older than this are treated as logged out
pub const SESSION_TTL_HOURS: i64 = 24;

impl Session {
    pub fn generate_token() -> String {
        Uuid::new_v4().simple().to_string()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.login_time > Duration::hours(SESSION_TTL_HOURS)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("User ID cannot be empty")]
    EmptyId,
    #[error("User ID may only contain letters, digits, '-' and '_'")]
    InvalidId,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("User ID is already taken")]
    IdTaken,
    #[error("Email is already registered")]
    EmailTaken,
    #[error("Invalid user ID or password")]
    InvalidCredentials,
}
