// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Routes acting on the calling user's own account

use rocket::serde::json::Json;
use rocket::{get, put, State};
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::CurrentIdentity;
use crate::server::response::{ApiResponse, ApiResult};
use crate::users::{AccountService, UserProfile};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[get("/users/me")]
pub fn me(accounts: &State<Arc<AccountService>>, identity: CurrentIdentity) -> ApiResult<UserProfile> {
    let profile = accounts.profile(identity.get())?;
    Ok(ApiResponse::ok("Operation successful", profile))
}

#[put("/users/me/password", data = "<body>")]
pub fn update_password(
    accounts: &State<Arc<AccountService>>,
    identity: CurrentIdentity,
    body: Json<UpdatePasswordRequest>,
) -> ApiResult<()> {
    accounts.update_password(
        identity.get(),
        &body.old_password,
        &body.new_password,
        &body.confirm_password,
    )?;
    Ok(ApiResponse::message("Password updated successfully"))
}
