// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JWT issuance and validation
//!
//! - [`TokenCodec`] signs and verifies compact HS256 tokens
//! - [`TokenService`] issues access/refresh tokens and projects their claims

pub mod claims;
pub mod codec;
pub mod service;

pub use claims::{TokenClaims, TokenKind};
pub use codec::TokenCodec;
pub use service::{
    AuthTokens, TokenService, DEFAULT_ACCESS_TTL_SECONDS, MAX_ACCESS_TTL_SECONDS,
    REFRESH_TTL_MULTIPLIER,
};
