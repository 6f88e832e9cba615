// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Authentication and authorization error taxonomy
//!
//! Every failure of the token codec, the token service and the access guard
//! is reported as an [`AuthError`] value. Nothing in the authentication core
//! panics or aborts the request pipeline; the HTTP layer maps each variant to
//! its own transport-level response.

use thiserror::Error;

use super::jwt::TokenKind;

/// Errors raised by the authentication and authorization core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The token signature does not match the signing key
    #[error("Invalid token signature")]
    InvalidSignature,

    /// The token is not a structurally valid JWT for this service
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// The token signature is valid but its expiry has passed
    #[error("Token has expired")]
    ExpiredToken,

    /// A refresh token was presented where an access token is required, or the
    /// other way around
    #[error("Expected {expected} token, got {found} token")]
    WrongTokenKind { expected: TokenKind, found: TokenKind },

    /// No authenticated identity is attached to the request
    #[error("User not authenticated")]
    NotAuthenticated,

    /// The identity is present but does not own the targeted resource
    #[error("No permission to access this resource")]
    Forbidden,

    /// The targeted resource does not exist
    #[error("Resource not found")]
    NotFound,

    /// Signing a claim set failed
    #[error("Token encoding failed: {0}")]
    TokenEncoding(String),
}

impl AuthError {
    /// Whether the error was raised while decoding a presented token
    ///
    /// The HTTP layer reports all of these as an authentication failure.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidSignature
                | AuthError::MalformedToken(_)
                | AuthError::ExpiredToken
                | AuthError::WrongTokenKind { .. }
        )
    }
}

/// Convenience alias used throughout the authentication core
pub type AuthResult<T> = Result<T, AuthError>;
