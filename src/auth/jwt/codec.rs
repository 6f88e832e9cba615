// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Signed token serialization
//!
//! [`TokenCodec`] turns a [`TokenClaims`] set into a compact HS256 JWT and
//! back. It holds the signing key and nothing else mutable, so a single codec
//! can be shared by every request.
//!
//! Decoding checks, in order:
//!
//! 1. the signature (any tampered byte in payload or signature fails here)
//! 2. the structure of the header and claims (issuer, required claims)
//! 3. the expiry against the instant supplied by the caller
//!
//! The expiry check is done here rather than by `jsonwebtoken` so that the
//! caller's [`Clock`](crate::auth::Clock) is the only time source.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use super::claims::TokenClaims;
use crate::auth::error::{AuthError, AuthResult};

/// HS256 encoder/decoder bound to one signing secret and one issuer
#[derive(Clone)]
pub struct TokenCodec {
    signing_key: EncodingKey,
    verification_key: DecodingKey,
    validation: Validation,
    issuer: String,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Create a codec for the given HMAC secret and issuer name
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_todolist::auth::jwt::TokenCodec;
    ///
    /// let codec = TokenCodec::new(b"a-signing-secret-of-at-least-32-bytes!", "rust-todolist");
    /// assert_eq!(codec.issuer(), "rust-todolist");
    /// ```
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iat", "iss"]);

        Self {
            signing_key: EncodingKey::from_secret(secret),
            verification_key: DecodingKey::from_secret(secret),
            validation,
            issuer,
        }
    }

    /// Issuer name written into and expected from every token
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Sign a claim set
    ///
    /// HS256 signing is deterministic: the same claims always produce the same
    /// string.
    pub fn encode(&self, claims: &TokenClaims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.signing_key)
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))
    }

    /// Verify and decode a token as of `now`
    ///
    /// # Errors
    ///
    /// * [`AuthError::InvalidSignature`] - the token was not signed with this key
    /// * [`AuthError::MalformedToken`] - bad encoding, wrong algorithm, wrong
    ///   issuer, missing or inconsistent claims
    /// * [`AuthError::ExpiredToken`] - `now` has reached the `exp` claim
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> AuthResult<TokenClaims> {
        let token_data = decode::<TokenClaims>(token, &self.verification_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::MalformedToken(e.to_string()),
            })?;
        let claims = token_data.claims;

        if claims.exp < claims.iat {
            return Err(AuthError::MalformedToken(
                "expiry precedes issuance".to_string(),
            ));
        }
        if now.timestamp() >= claims.exp {
            return Err(AuthError::ExpiredToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::TokenKind;
    use chrono::TimeZone;

    const SECRET: &[u8] = b"unit-test-secret-key-for-token-codec-0123";

    fn claims_at(iat: i64, ttl: i64) -> TokenClaims {
        TokenClaims {
            sub: Some("alice".to_string()),
            user_id: 42,
            iss: "rust-todolist".to_string(),
            iat,
            exp: iat + ttl,
            jti: "jti-1".to_string(),
            kind: TokenKind::Access,
        }
    }

    fn instant(ts: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(ts, 0).unwrap()
    }

    #[test]
    fn test_round_trip_before_expiry() {
        let codec = TokenCodec::new(SECRET, "rust-todolist");
        let claims = claims_at(1_700_000_000, 3600);
        let token = codec.encode(&claims).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let decoded = codec.decode(&token, instant(1_700_000_000)).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let codec = TokenCodec::new(SECRET, "rust-todolist");
        let claims = claims_at(1_700_000_000, 3600);
        assert_eq!(codec.encode(&claims).unwrap(), codec.encode(&claims).unwrap());
    }

    #[test]
    fn test_expired_exactly_at_exp() {
        let codec = TokenCodec::new(SECRET, "rust-todolist");
        let token = codec.encode(&claims_at(1_700_000_000, 60)).unwrap();

        assert!(codec.decode(&token, instant(1_700_000_059)).is_ok());
        assert_eq!(
            codec.decode(&token, instant(1_700_000_060)),
            Err(AuthError::ExpiredToken)
        );
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        let codec = TokenCodec::new(SECRET, "rust-todolist");
        let other = TokenCodec::new(b"another-secret-key-entirely-different!!", "rust-todolist");
        let token = other.encode(&claims_at(1_700_000_000, 60)).unwrap();

        // Expired and foreign: the signature failure wins
        assert_eq!(
            codec.decode(&token, instant(1_800_000_000)),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_issuer_is_malformed() {
        let codec = TokenCodec::new(SECRET, "rust-todolist");
        let foreign = TokenCodec::new(SECRET, "someone-else");
        let mut claims = claims_at(1_700_000_000, 60);
        claims.iss = "someone-else".to_string();
        let token = foreign.encode(&claims).unwrap();

        assert!(matches!(
            codec.decode(&token, instant(1_700_000_000)),
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = TokenCodec::new(SECRET, "rust-todolist");
        for token in ["", "invalid.token.here", "invalid.token", "a.b.c.d"] {
            assert!(
                matches!(
                    codec.decode(token, instant(1_700_000_000)),
                    Err(AuthError::MalformedToken(_)) | Err(AuthError::InvalidSignature)
                ),
                "token {:?} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_inverted_timestamps_are_malformed() {
        let codec = TokenCodec::new(SECRET, "rust-todolist");
        let mut claims = claims_at(1_700_000_000, 60);
        claims.exp = claims.iat - 1;
        let token = codec.encode(&claims).unwrap();

        assert!(matches!(
            codec.decode(&token, instant(1_600_000_000)),
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_debug_hides_keys() {
        let codec = TokenCodec::new(SECRET, "rust-todolist");
        let debug = format!("{:?}", codec);
        assert!(debug.contains("rust-todolist"));
        assert!(!debug.contains("unit-test-secret"));
    }
}
