// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Authenticated identity and its per-request context
//!
//! An [`IdentityContext`] carries the identity resolved by the bearer
//! authentication fairing to the business operations of the same request.
//! There is one context per request (it lives in Rocket's request-local
//! cache), never one per process, so concurrent requests cannot see each
//! other's identity.
//!
//! The context must be emptied on every exit path. The fairing clears it when
//! the response leaves the pipeline; code running outside Rocket (workers,
//! tests) uses [`IdentityContext::enter`], whose [`IdentityScope`] clears the
//! context on drop, including while unwinding from a panic.

use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// The authenticated subject of a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Numeric user id
    pub subject_id: i64,
    /// Username at the time the access token was issued
    pub subject_name: String,
}

impl Identity {
    pub fn new(subject_id: i64, subject_name: impl Into<String>) -> Self {
        Self {
            subject_id,
            subject_name: subject_name.into(),
        }
    }
}

/// Request-scoped holder of the current [`Identity`]
///
/// # Examples
///
/// ```
/// use rust_todolist::auth::{Identity, IdentityContext};
///
/// let context = IdentityContext::default();
/// {
///     let _scope = context.enter(Identity::new(1, "alice"));
///     assert_eq!(context.current().unwrap().subject_id, 1);
/// }
/// assert!(context.current().is_none());
/// ```
#[derive(Debug, Default)]
pub struct IdentityContext {
    slot: RwLock<Option<Identity>>,
}

impl IdentityContext {
    /// Attach the identity of the request
    ///
    /// Expected once per request, before business logic runs. A second call
    /// replaces the previous identity and is logged.
    pub fn set(&self, identity: Identity) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.as_ref() {
            warn!(
                "Identity context already held user {}, replacing with user {}",
                previous.subject_id, identity.subject_id
            );
        }
        *slot = Some(identity);
    }

    /// Identity of the request, `None` when anonymous
    pub fn current(&self) -> Option<Identity> {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Forget the identity
    pub fn clear(&self) {
        self.slot.write().unwrap_or_else(|e| e.into_inner()).take();
    }

    /// Attach `identity` until the returned scope is dropped
    pub fn enter(&self, identity: Identity) -> IdentityScope<'_> {
        self.set(identity);
        IdentityScope { context: self }
    }
}

/// Clears its [`IdentityContext`] when dropped
#[must_use = "the identity is cleared as soon as the scope is dropped"]
#[derive(Debug)]
pub struct IdentityScope<'a> {
    context: &'a IdentityContext,
}

impl IdentityScope<'_> {
    /// Identity held by the scope's context
    pub fn current(&self) -> Option<Identity> {
        self.context.current()
    }
}

impl Drop for IdentityScope<'_> {
    fn drop(&mut self) {
        self.context.clear();
    }
}
