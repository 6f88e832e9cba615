// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Account operations: registration, login, token refresh, profile and
//! password change
//!
//! The refresh flow never trusts anything but the user id of a refresh
//! token: the username placed in the new access token is re-read from the
//! [`UserStore`], and accounts that were removed or locked since the refresh
//! token was issued are refused.

use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;
use thiserror::Error;

use super::model::{User, UserProfile};
use super::store::UserStore;
use crate::auth::{
    AccessGuard, AuthError, AuthTokens, HashError, Identity, PasswordHasher, TokenService,
};

/// Minimum username length
pub const USERNAME_MIN_LEN: usize = 3;
/// Maximum username length
pub const USERNAME_MAX_LEN: usize = 50;
/// Minimum password length
pub const PASSWORD_MIN_LEN: usize = 6;

/// Errors of account operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account is locked")]
    AccountLocked,

    #[error("User not found")]
    UserNotFound,

    #[error(transparent)]
    Hashing(#[from] HashError),
}

/// Convenience alias for account operations
pub type AccountResult<T> = Result<T, AccountError>;

/// Check a username: 3 to 50 characters among letters, digits and underscore
pub fn validate_username(username: &str) -> AccountResult<()> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(AccountError::InvalidInput(format!(
            "Username must be between {} and {} characters",
            USERNAME_MIN_LEN, USERNAME_MAX_LEN
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AccountError::InvalidInput(
            "Username can only contain letters, numbers and underscores".to_string(),
        ));
    }
    Ok(())
}

/// Check a password: at least 6 characters with a letter and a digit
pub fn validate_password(password: &str) -> AccountResult<()> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(AccountError::InvalidInput(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LEN
        )));
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Err(AccountError::InvalidInput(
            "Password must contain letters and numbers".to_string(),
        ));
    }
    Ok(())
}

/// Account lifecycle on top of a [`UserStore`] and a [`TokenService`]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    hasher: PasswordHasher,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>, hasher: PasswordHasher) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    /// Create an account and log it in
    pub fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> AccountResult<AuthTokens> {
        if password != confirm_password {
            return Err(AccountError::InvalidInput(
                "Passwords do not match".to_string(),
            ));
        }
        validate_username(username)?;
        validate_password(password)?;
        if self.users.find_by_username(username).is_some() {
            return Err(AccountError::UsernameTaken);
        }

        let hash = self.hasher.hash(password)?;
        let user = self
            .users
            .insert(User::new(username, hash))
            .ok_or(AccountError::UsernameTaken)?;

        info!("User registered successfully: {}", user.username);
        Ok(self.tokens.issue_token_pair(user.id, &user.username)?)
    }

    /// Check credentials and issue a token pair
    ///
    /// Writes back nothing but the login timestamp.
    pub fn login(&self, username: &str, password: &str) -> AccountResult<AuthTokens> {
        let user = self
            .users
            .find_by_username(username)
            .ok_or(AccountError::InvalidCredentials)?;
        if !self.hasher.verify(password, &user.password_hash) {
            warn!("Failed login attempt for user: {}", username);
            return Err(AccountError::InvalidCredentials);
        }
        if user.locked {
            return Err(AccountError::AccountLocked);
        }

        if !self.users.touch_login(user.id, Utc::now()) {
            warn!("User {} vanished during login", user.username);
            return Err(AccountError::InvalidCredentials);
        }

        info!("User logged in successfully: {}", user.username);
        Ok(self.tokens.issue_token_pair(user.id, &user.username)?)
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// The username comes from the user store, not from any token.
    pub fn refresh(&self, refresh_token: &str) -> AccountResult<AuthTokens> {
        let user_id = self.tokens.refresh_subject(refresh_token)?;
        let user = self.users.find_by_id(user_id).ok_or_else(|| {
            warn!("Refresh token presented for unknown user {}", user_id);
            AccountError::Auth(AuthError::NotAuthenticated)
        })?;
        if user.locked {
            return Err(AccountError::AccountLocked);
        }

        info!("Tokens refreshed for user: {}", user.username);
        Ok(self.tokens.issue_token_pair(user.id, &user.username)?)
    }

    /// Profile of the calling user
    pub fn profile(&self, identity: Option<&Identity>) -> AccountResult<UserProfile> {
        let identity = AccessGuard::require_identity(identity)?;
        let user = self
            .users
            .find_by_id(identity.subject_id)
            .ok_or(AccountError::UserNotFound)?;
        Ok(UserProfile::from(&user))
    }

    /// Change the password of the calling user
    pub fn update_password(
        &self,
        identity: Option<&Identity>,
        old_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> AccountResult<()> {
        let identity = AccessGuard::require_identity(identity)?;
        if new_password != confirm_password {
            return Err(AccountError::InvalidInput(
                "New passwords do not match".to_string(),
            ));
        }
        let user = self
            .users
            .find_by_id(identity.subject_id)
            .ok_or(AccountError::UserNotFound)?;
        if !self.hasher.verify(old_password, &user.password_hash) {
            return Err(AccountError::InvalidInput(
                "Old password is incorrect".to_string(),
            ));
        }
        validate_password(new_password)?;

        let hash = self.hasher.hash(new_password)?;
        if !self.users.set_password_hash(user.id, hash) {
            return Err(AccountError::UserNotFound);
        }

        info!("Password updated successfully for user: {}", user.username);
        Ok(())
    }

    /// Create an account from configuration, skipping names already taken
    ///
    /// Returns `true` if the account was created.
    pub fn seed(&self, username: &str, password: &str) -> AccountResult<bool> {
        if self.users.find_by_username(username).is_some() {
            return Ok(false);
        }
        let hash = self.hasher.hash(password)?;
        Ok(self.users.insert(User::new(username, hash)).is_some())
    }

    /// Lock or unlock an account
    pub fn set_locked(&self, user_id: i64, locked: bool) -> AccountResult<()> {
        if !self.users.set_locked(user_id, locked) {
            return Err(AccountError::UserNotFound);
        }
        info!(
            "User {} {}",
            user_id,
            if locked { "locked" } else { "unlocked" }
        );
        Ok(())
    }
}
