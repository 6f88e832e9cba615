// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rocket fairing and request guard for Bearer token authentication
//!
//! [`BearerAuthentication`] runs on every request:
//!
//! 1. **Header Extraction**: reads `Authorization: Bearer <token>`
//! 2. **Token Validation**: asks the managed [`TokenService`] to authenticate
//!    the token (signature, structure, expiry, access kind)
//! 3. **Identity Propagation**: on success, stores the [`Identity`] in the
//!    request-local [`IdentityContext`]
//! 4. **Cleanup**: clears the context when the response is sent
//!
//! A missing or invalid token does not reject the request here: the request
//! continues anonymously, and business operations that need an identity
//! answer `401 Unauthorized` themselves.
//!
//! Route handlers read the identity through the [`CurrentIdentity`] guard.
//!
//! ```rust,no_run
//! use rocket::get;
//! use rust_todolist::auth::CurrentIdentity;
//!
//! #[get("/whoami")]
//! fn whoami(identity: CurrentIdentity) -> String {
//!     match identity.get() {
//!         Some(identity) => format!("User: {}", identity.subject_name),
//!         None => "anonymous".to_string(),
//!     }
//! }
//! ```

use log::{debug, error, warn};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::{Data, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::auth::identity::{Identity, IdentityContext};
use crate::auth::jwt::TokenService;

/// Name of the header carrying the token
pub const TOKEN_HEADER: &str = "Authorization";
/// Prefix of the header value
pub const TOKEN_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization` header value
///
/// Returns `None` when the value does not use the Bearer scheme or carries an
/// empty token.
///
/// # Examples
///
/// ```
/// use rust_todolist::auth::guards::bearer_token;
///
/// assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
/// assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
/// assert_eq!(bearer_token("Bearer "), None);
/// ```
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix(TOKEN_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The request-local identity context of `request`
pub fn identity_context<'r>(request: &'r Request<'_>) -> &'r IdentityContext {
    request.local_cache(IdentityContext::default)
}

/// Fairing resolving the bearer token of each request into an identity
pub struct BearerAuthentication;

#[rocket::async_trait]
impl Fairing for BearerAuthentication {
    fn info(&self) -> Info {
        Info {
            name: "Bearer token authentication",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _data: &mut Data<'_>) {
        let Some(token) = request
            .headers()
            .get_one(TOKEN_HEADER)
            .and_then(bearer_token)
        else {
            return;
        };

        let Some(tokens) = request.rocket().state::<Arc<TokenService>>() else {
            error!("TokenService is not managed, requests stay anonymous");
            return;
        };

        match tokens.authenticate(token) {
            Ok(identity) => {
                debug!(
                    "Authenticated user {} ({}) for {}",
                    identity.subject_id,
                    identity.subject_name,
                    request.uri()
                );
                identity_context(request).set(identity);
            }
            Err(e) => warn!("Rejected bearer token on {}: {}", request.uri(), e),
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, _response: &mut Response<'r>) {
        identity_context(request).clear();
    }
}

/// Request guard exposing the identity of the request, if any
///
/// Always succeeds: an anonymous request yields `CurrentIdentity(None)` and it
/// is up to the business operation to require an identity.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Option<Identity>);

impl CurrentIdentity {
    /// Borrow the identity as the access guard expects it
    pub fn get(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CurrentIdentity {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(CurrentIdentity(identity_context(request).current()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token("Bearer token123"), Some("token123"));
        assert_eq!(bearer_token("Bearer   spaced  "), Some("spaced"));
        assert_eq!(bearer_token("bearer token123"), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer    "), None);
        assert_eq!(bearer_token(""), None);
    }

    #[test]
    fn test_current_identity_get() {
        let anonymous = CurrentIdentity(None);
        assert!(anonymous.get().is_none());

        let known = CurrentIdentity(Some(Identity::new(3, "zoe")));
        assert_eq!(known.get().map(|i| i.subject_id), Some(3));
    }
}
