// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! User account records and their public projection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned id, `0` until inserted
    pub id: i64,
    pub username: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Locked accounts cannot log in nor refresh their tokens
    pub locked: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// A new, unlocked account not yet stored
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: 0,
            username: username.into(),
            password_hash: password_hash.into(),
            locked: false,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }
}

/// What the API reveals about a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            locked: user.locked,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}
