// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Authentication and authorization core
//!
//! ## Components
//!
//! - [`jwt`]: token encoding/decoding ([`TokenCodec`]) and the token
//!   lifecycle ([`TokenService`])
//! - [`identity`]: the authenticated [`Identity`] and its per-request
//!   [`IdentityContext`]
//! - [`access_guard`]: ownership checks on [`OwnedResource`]s
//! - [`guards`]: the Rocket fairing and request guard wiring the above into
//!   the request pipeline
//! - [`password`]: bcrypt password hashing
//!
//! ## Request flow
//!
//! ```text
//! Authorization: Bearer <jwt>
//!        │
//!        ▼
//! BearerAuthentication ──► TokenService::authenticate ──► IdentityContext::set
//!        │
//!        ▼
//! handler(CurrentIdentity) ──► service ──► AccessGuard::load_owned
//!        │
//!        ▼
//! on_response ──► IdentityContext::clear
//! ```

pub mod access_guard;
pub mod clock;
pub mod error;
pub mod guards;
pub mod identity;
pub mod jwt;
pub mod password;

pub use access_guard::{AccessGuard, OwnedResource};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AuthError, AuthResult};
pub use guards::{BearerAuthentication, CurrentIdentity};
pub use identity::{Identity, IdentityContext, IdentityScope};
pub use jwt::{AuthTokens, TokenClaims, TokenCodec, TokenKind, TokenService};
pub use password::{HashError, PasswordHasher};
