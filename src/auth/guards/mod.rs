// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rocket integration of the authentication core

pub mod bearer;

pub use bearer::{
    bearer_token, identity_context, BearerAuthentication, CurrentIdentity, TOKEN_HEADER,
    TOKEN_PREFIX,
};
