// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Ownership checks for user-owned resources
//!
//! Business operations call [`AccessGuard`] before they read or mutate an
//! [`OwnedResource`]. The checks run in a fixed order:
//!
//! | Condition | Result |
//! |-----------|--------|
//! | no identity | [`AuthError::NotAuthenticated`] |
//! | resource absent | [`AuthError::NotFound`] |
//! | resource owned by someone else | [`AuthError::Forbidden`] |
//! | otherwise | `Ok` |
//!
//! The identity is checked before the resource is even looked up, so an
//! anonymous caller learns nothing about which ids exist.

use log::debug;

use super::error::{AuthError, AuthResult};
use super::identity::Identity;

/// An entity whose access is restricted to the user that created it
pub trait OwnedResource {
    /// Resource id
    fn id(&self) -> i64;
    /// Id of the owning user
    fn owner_id(&self) -> i64;
}

/// Stateless ownership checker
pub struct AccessGuard;

impl AccessGuard {
    /// Require an authenticated identity
    pub fn require_identity(identity: Option<&Identity>) -> AuthResult<&Identity> {
        identity.ok_or(AuthError::NotAuthenticated)
    }

    /// Check that `identity` owns `resource`
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_todolist::auth::{AccessGuard, AuthError, Identity, OwnedResource};
    ///
    /// struct Note { id: i64, owner: i64 }
    /// impl OwnedResource for Note {
    ///     fn id(&self) -> i64 { self.id }
    ///     fn owner_id(&self) -> i64 { self.owner }
    /// }
    ///
    /// let note = Note { id: 5, owner: 42 };
    /// let stranger = Identity::new(7, "mallory");
    /// assert_eq!(
    ///     AccessGuard::require_owner(Some(&stranger), Some(&note)),
    ///     Err(AuthError::Forbidden)
    /// );
    /// ```
    pub fn require_owner<R: OwnedResource>(
        identity: Option<&Identity>,
        resource: Option<&R>,
    ) -> AuthResult<()> {
        let identity = Self::require_identity(identity)?;
        let resource = resource.ok_or(AuthError::NotFound)?;
        if resource.owner_id() != identity.subject_id {
            debug!(
                "User {} denied access to resource {} owned by {}",
                identity.subject_id,
                resource.id(),
                resource.owner_id()
            );
            return Err(AuthError::Forbidden);
        }
        Ok(())
    }

    /// Look a resource up by id and check ownership
    ///
    /// `lookup` is only invoked once an identity is known to be present.
    pub fn load_owned<R, F>(identity: Option<&Identity>, id: i64, lookup: F) -> AuthResult<R>
    where
        R: OwnedResource,
        F: FnOnce(i64) -> Option<R>,
    {
        Self::require_identity(identity)?;
        let resource = lookup(id);
        Self::require_owner(identity, resource.as_ref())?;
        resource.ok_or(AuthError::NotFound)
    }
}
