// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Password hashing
//!
//! Passwords are stored as bcrypt hashes (`$2b$<cost>$...`) produced with
//! `pwhash`. The cost is configurable so tests can use the minimum.

use pwhash::bcrypt::{self, BcryptSetup, BcryptVariant};
use thiserror::Error;

/// Lowest cost accepted by bcrypt
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest cost accepted by bcrypt
pub const MAX_BCRYPT_COST: u32 = 31;
/// Cost used when none is configured
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// A password could not be hashed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Password hashing failed: {0}")]
pub struct HashError(String);

impl From<pwhash::error::Error> for HashError {
    fn from(err: pwhash::error::Error) -> Self {
        HashError(err.to_string())
    }
}

/// Hashes and verifies passwords with a fixed bcrypt cost
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher {
    /// Create a hasher; the cost is clamped to the range bcrypt accepts
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a fresh salt
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let setup = BcryptSetup {
            cost: Some(self.cost),
            variant: Some(BcryptVariant::V2b),
            ..Default::default()
        };
        Ok(bcrypt::hash_with(setup, password)?)
    }

    /// Check a plaintext password against a stored hash
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash)
    }
}
