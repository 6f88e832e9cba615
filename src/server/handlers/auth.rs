// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Registration, login, logout and token refresh
//!
//! These routes are reachable without a token. Successful calls return an
//! [`AuthTokens`] pair.

use log::{debug, info};
use rocket::serde::json::Json;
use rocket::{post, State};
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::{AuthTokens, CurrentIdentity};
use crate::server::response::{ApiError, ApiResponse, ApiResult};
use crate::users::{AccountError, AccountService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[post("/auth/register", data = "<body>")]
pub fn register(
    accounts: &State<Arc<AccountService>>,
    body: Json<RegisterRequest>,
) -> ApiResult<AuthTokens> {
    let tokens = accounts.register(&body.username, &body.password, &body.confirm_password)?;
    Ok(ApiResponse::created("Registration successful", tokens))
}

#[post("/auth/login", data = "<body>")]
pub fn login(accounts: &State<Arc<AccountService>>, body: Json<LoginRequest>) -> ApiResult<AuthTokens> {
    let tokens = accounts.login(&body.username, &body.password)?;
    Ok(ApiResponse::ok("Login successful", tokens))
}

/// Tokens are stateless: logging out only means the client drops them
#[post("/auth/logout")]
pub fn logout(identity: CurrentIdentity) -> ApiResponse<()> {
    match identity.get() {
        Some(identity) => info!("User logged out: {}", identity.subject_name),
        None => debug!("Logout without a valid token"),
    }
    ApiResponse::message("Logout successful")
}

/// Exchange a refresh token for a new pair
///
/// Every token problem is reported with the same message.
#[post("/auth/refresh", data = "<body>")]
pub fn refresh(
    accounts: &State<Arc<AccountService>>,
    body: Json<RefreshRequest>,
) -> ApiResult<AuthTokens> {
    match accounts.refresh(&body.refresh_token) {
        Ok(tokens) => Ok(ApiResponse::ok("Token refreshed successfully", tokens)),
        Err(AccountError::Auth(_)) => Err(ApiError::unauthorized(
            "Invalid or expired refresh token",
        )),
        Err(e) => Err(e.into()),
    }
}
