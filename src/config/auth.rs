// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Token and password settings

use serde::{Deserialize, Serialize};

use crate::auth::jwt::DEFAULT_ACCESS_TTL_SECONDS;
use crate::auth::password::DEFAULT_BCRYPT_COST;
use crate::auth::TokenCodec;

/// Issuer written to and required in every token unless configured otherwise
pub const DEFAULT_ISSUER: &str = "rust-todolist";

/// Publicly known secret of a freshly generated configuration
///
/// Anyone can sign tokens with it; a startup warning is logged while it is
/// in use.
pub const DEFAULT_SIGNING_SECRET: &str =
    "rust-todolist-development-secret-change-me-before-deploying";

/// Settings of the token service and the password hasher
///
/// The refresh token lifetime is not configurable on its own: it is always
/// seven times the access token lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret shared by token signing and verification
    ///
    /// Generate one with the `hmac_keygen` binary. Secrets shorter than 32
    /// bytes are accepted but reported at startup.
    #[serde(default = "default_signing_secret")]
    pub signing_secret: String,

    /// Access token lifetime in seconds, one day by default
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl_seconds: i64,

    /// Value of the `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// bcrypt cost for stored passwords (4 to 31)
    #[serde(default = "default_password_cost")]
    pub password_cost: u32,
}

fn default_signing_secret() -> String {
    DEFAULT_SIGNING_SECRET.to_string()
}

fn default_access_token_ttl() -> i64 {
    DEFAULT_ACCESS_TTL_SECONDS
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

fn default_password_cost() -> u32 {
    DEFAULT_BCRYPT_COST
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_secret: default_signing_secret(),
            access_token_ttl_seconds: default_access_token_ttl(),
            issuer: default_issuer(),
            password_cost: default_password_cost(),
        }
    }
}

impl AuthConfig {
    /// Codec signing and verifying with the configured secret and issuer
    pub fn token_codec(&self) -> TokenCodec {
        TokenCodec::new(self.signing_secret.as_bytes(), self.issuer.clone())
    }

    /// Whether tokens are signed with [`DEFAULT_SIGNING_SECRET`]
    pub fn uses_default_secret(&self) -> bool {
        self.signing_secret == DEFAULT_SIGNING_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secret_is_detected() {
        let mut auth = AuthConfig::default();
        assert!(auth.uses_default_secret());
        auth.signing_secret = "a-secret-generated-with-hmac-keygen-0123".to_string();
        assert!(!auth.uses_default_secret());
    }
}
