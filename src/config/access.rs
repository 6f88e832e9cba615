// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Accounts created at startup

use serde::{Deserialize, Serialize};

/// An account to create when the server starts
///
/// The password is hashed before it is stored; accounts whose username is
/// already registered are left untouched.
///
/// # Example
///
/// ```
/// use rust_todolist::config::SeedUser;
///
/// let admin = SeedUser {
///     username: "admin".to_string(),
///     password: "admin123".to_string(),
/// };
/// assert_eq!(admin.username, "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Accounts seeded at startup, none by default
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

impl AccessConfig {
    /// Id the account of `username` receives when seeded into an empty store
    ///
    /// Seeding follows the configuration order, so the n-th user gets id n.
    pub fn seeded_id(&self, username: &str) -> Option<i64> {
        self.users
            .iter()
            .position(|u| u.username == username)
            .map(|index| index as i64 + 1)
    }
}
