// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! User persistence
//!
//! [`UserStore`] is the seam between the account service and whatever keeps
//! the user records. [`MemoryUserStore`] keeps them in a process-local map,
//! which is all this service needs.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::RwLock;

use super::model::User;

/// Storage of user accounts
#[cfg_attr(test, mockall::automock)]
pub trait UserStore: Send + Sync {
    fn find_by_id(&self, id: i64) -> Option<User>;

    fn find_by_username(&self, username: &str) -> Option<User>;

    /// Store a new user and return it with its assigned id
    ///
    /// Returns `None` if the username is already taken.
    fn insert(&self, user: User) -> Option<User>;

    // Each write below changes one field under the store's own lock and
    // returns `false` if no user has that id.

    /// Record a successful login
    fn touch_login(&self, id: i64, at: DateTime<Utc>) -> bool;

    fn set_password_hash(&self, id: i64, password_hash: String) -> bool;

    fn set_locked(&self, id: i64, locked: bool) -> bool;
}

#[derive(Debug, Default)]
struct Users {
    next_id: i64,
    by_id: BTreeMap<i64, User>,
}

/// In-memory [`UserStore`]
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    inner: RwLock<Users>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn modify<F>(&self, id: i64, change: F) -> bool
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.inner.write().unwrap_or_else(|e| e.into_inner());
        match users.by_id.get_mut(&id) {
            Some(user) => {
                change(user);
                true
            }
            None => false,
        }
    }
}

impl UserStore for MemoryUserStore {
    fn find_by_id(&self, id: i64) -> Option<User> {
        let users = self.inner.read().unwrap_or_else(|e| e.into_inner());
        users.by_id.get(&id).cloned()
    }

    fn find_by_username(&self, username: &str) -> Option<User> {
        let users = self.inner.read().unwrap_or_else(|e| e.into_inner());
        users
            .by_id
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    fn insert(&self, mut user: User) -> Option<User> {
        let mut users = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if users.by_id.values().any(|u| u.username == user.username) {
            return None;
        }
        users.next_id += 1;
        user.id = users.next_id;
        users.by_id.insert(user.id, user.clone());
        Some(user)
    }

    fn touch_login(&self, id: i64, at: DateTime<Utc>) -> bool {
        self.modify(id, |user| user.last_login_at = Some(at))
    }

    fn set_password_hash(&self, id: i64, password_hash: String) -> bool {
        self.modify(id, |user| user.password_hash = password_hash)
    }

    fn set_locked(&self, id: i64, locked: bool) -> bool {
        self.modify(id, |user| user.locked = locked)
    }
}
