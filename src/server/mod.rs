// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! HTTP API server
//!
//! A Rocket application exposing the account, todo and category operations
//! under `/api/v1`. Every request goes through the [`BearerAuthentication`]
//! fairing, which resolves the `Authorization: Bearer` header into the
//! request's identity; handlers read it with the [`CurrentIdentity`] guard.
//!
//! [`BearerAuthentication`]: crate::auth::BearerAuthentication
//! [`CurrentIdentity`]: crate::auth::CurrentIdentity

pub mod builder;
pub mod cors;
pub mod handlers;
pub mod response;

pub use builder::{build_rocket, figment_from_config};
pub use response::{ApiError, ApiResponse, ApiResult};
