// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Application-facing token lifecycle
//!
//! [`TokenService`] issues access and refresh tokens, validates them and
//! projects their claims. It owns a [`TokenCodec`] and a [`Clock`], both
//! injected at construction, and is immutable afterwards: it is shared across
//! requests behind an `Arc` without any locking.
//!
//! # Example
//!
//! ```
//! use rust_todolist::auth::jwt::{TokenCodec, TokenService};
//!
//! let codec = TokenCodec::new(b"a-signing-secret-of-at-least-32-bytes!", "rust-todolist");
//! let service = TokenService::with_system_clock(codec, 86400);
//!
//! let token = service.issue_access_token(42, "alice").unwrap();
//! assert!(service.validate(&token));
//! assert_eq!(service.subject_id(&token).unwrap(), 42);
//! assert_eq!(service.subject_name(&token).unwrap(), "alice");
//! ```

use chrono::Duration;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::claims::{TokenClaims, TokenKind};
use super::codec::TokenCodec;
use crate::auth::clock::{Clock, SystemClock};
use crate::auth::error::{AuthError, AuthResult};
use crate::auth::identity::Identity;

/// Refresh tokens live this many times longer than access tokens
pub const REFRESH_TTL_MULTIPLIER: i64 = 7;

/// Default access token lifetime (24 hours)
pub const DEFAULT_ACCESS_TTL_SECONDS: i64 = 86400;

/// Longest accepted access token lifetime
///
/// Refresh tokens of an access token this long-lived expire within ten years.
pub const MAX_ACCESS_TTL_SECONDS: i64 = 10 * 365 * 86400 / REFRESH_TTL_MULTIPLIER;

/// Tokens returned to a client after login, registration or refresh
///
/// Serialized with the field names the web client expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    /// Numeric user id
    #[serde(rename = "userId")]
    pub subject_id: i64,
    /// Username
    #[serde(rename = "username")]
    pub subject_name: String,
    /// Access token
    #[serde(rename = "token")]
    pub access_token: String,
    /// Refresh token
    pub refresh_token: String,
    /// Access token lifetime in seconds
    #[serde(rename = "expiresIn")]
    pub expires_in_seconds: i64,
}

/// Issues and checks the tokens of this service
pub struct TokenService {
    codec: TokenCodec,
    access_ttl_seconds: i64,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a token service
    ///
    /// # Parameters
    ///
    /// * `codec` - Signs and verifies tokens
    /// * `access_ttl_seconds` - Lifetime of access tokens; refresh tokens live
    ///   [`REFRESH_TTL_MULTIPLIER`] times longer
    /// * `clock` - Time source for `iat`, `exp` and expiry checks
    ///
    /// A lifetime whose expiry cannot be represented makes every issuance
    /// fail with [`AuthError::TokenEncoding`].
    pub fn new(codec: TokenCodec, access_ttl_seconds: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            codec,
            access_ttl_seconds,
            clock,
        }
    }

    /// Create a token service reading the wall clock
    pub fn with_system_clock(codec: TokenCodec, access_ttl_seconds: i64) -> Self {
        Self::new(codec, access_ttl_seconds, Arc::new(SystemClock))
    }

    /// Access token lifetime in seconds
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl_seconds
    }

    fn lifetime(&self, kind: TokenKind) -> Option<Duration> {
        let seconds = match kind {
            TokenKind::Access => Some(self.access_ttl_seconds),
            TokenKind::Refresh => self.access_ttl_seconds.checked_mul(REFRESH_TTL_MULTIPLIER),
        }?;
        Duration::try_seconds(seconds)
    }

    fn issue(&self, user_id: i64, sub: Option<String>, kind: TokenKind) -> AuthResult<String> {
        let now = self.clock.now();
        let expires_at = self
            .lifetime(kind)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AuthError::TokenEncoding(format!(
                    "{} token lifetime out of range ({} seconds per access token)",
                    kind, self.access_ttl_seconds
                ))
            })?;
        let claims = TokenClaims {
            sub,
            user_id,
            iss: self.codec.issuer().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
            kind,
        };
        let token = self.codec.encode(&claims)?;
        debug!("Issued {} token for user {} (jti {})", kind, user_id, claims.jti);
        Ok(token)
    }

    /// Issue an access token carrying the user id and username
    pub fn issue_access_token(&self, subject_id: i64, subject_name: &str) -> AuthResult<String> {
        self.issue(subject_id, Some(subject_name.to_string()), TokenKind::Access)
    }

    /// Issue a refresh token carrying only the user id
    pub fn issue_refresh_token(&self, subject_id: i64) -> AuthResult<String> {
        self.issue(subject_id, None, TokenKind::Refresh)
    }

    /// Issue an access/refresh pair in the shape returned to clients
    pub fn issue_token_pair(&self, subject_id: i64, subject_name: &str) -> AuthResult<AuthTokens> {
        Ok(AuthTokens {
            subject_id,
            subject_name: subject_name.to_string(),
            access_token: self.issue_access_token(subject_id, subject_name)?,
            refresh_token: self.issue_refresh_token(subject_id)?,
            expires_in_seconds: self.access_ttl_seconds(),
        })
    }

    /// Verify and decode a token of either kind
    pub fn decode(&self, token: &str) -> AuthResult<TokenClaims> {
        self.codec.decode(token, self.clock.now())
    }

    /// Cheap pre-check: `true` iff the token decodes now
    ///
    /// Never fails; the reason of a rejection is only logged.
    pub fn validate(&self, token: &str) -> bool {
        match self.decode(token) {
            Ok(_) => true,
            Err(e) => {
                warn!("Token validation failed: {}", e);
                false
            }
        }
    }

    /// User id of a valid token
    pub fn subject_id(&self, token: &str) -> AuthResult<i64> {
        self.decode(token).map(|claims| claims.user_id)
    }

    /// Username of a valid access token
    ///
    /// Refresh tokens carry no username and fail with
    /// [`AuthError::MalformedToken`].
    pub fn subject_name(&self, token: &str) -> AuthResult<String> {
        self.decode(token)?
            .sub
            .ok_or_else(|| AuthError::MalformedToken("token carries no subject name".to_string()))
    }

    /// Resolve the identity behind an access token
    ///
    /// Refresh tokens are refused so they can never authenticate an API call.
    pub fn authenticate(&self, token: &str) -> AuthResult<Identity> {
        let claims = self.decode(token)?;
        if claims.kind != TokenKind::Access {
            return Err(AuthError::WrongTokenKind {
                expected: TokenKind::Access,
                found: claims.kind,
            });
        }
        let name = claims
            .sub
            .ok_or_else(|| AuthError::MalformedToken("access token without subject".to_string()))?;
        Ok(Identity::new(claims.user_id, name))
    }

    /// User id behind a refresh token
    ///
    /// Access tokens are refused: only a refresh token can be exchanged.
    pub fn refresh_subject(&self, token: &str) -> AuthResult<i64> {
        let claims = self.decode(token)?;
        if claims.kind != TokenKind::Refresh {
            return Err(AuthError::WrongTokenKind {
                expected: TokenKind::Refresh,
                found: claims.kind,
            });
        }
        Ok(claims.user_id)
    }
}
