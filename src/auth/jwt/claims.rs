// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JWT claim structures for authentication tokens
//!
//! This module defines the claim set carried by both access and refresh
//! tokens, and the token kind discriminator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a token
///
/// Access tokens authenticate API calls. Refresh tokens are only accepted by
/// the refresh flow, which exchanges them for a new access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims embedded in every token issued by this service
///
/// The structure is serialized to JSON when creating tokens and deserialized
/// when validating them. Timestamps are Unix time in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username)
    ///
    /// Present on access tokens only. Refresh tokens carry the numeric user id
    /// and nothing else about the user, so the refresh flow has to re-read the
    /// username from the user store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Numeric user id
    pub user_id: i64,

    /// Issuer
    pub iss: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    ///
    /// The token must not be accepted once the current time reaches this value.
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    ///
    /// Makes two tokens issued within the same second distinguishable.
    pub jti: String,

    /// Access or refresh
    #[serde(rename = "type")]
    pub kind: TokenKind,
}
