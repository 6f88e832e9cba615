// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Category routes

use rocket::serde::json::Json;
use rocket::{delete, get, post, put, State};
use std::sync::Arc;

use crate::auth::CurrentIdentity;
use crate::server::response::{ApiResponse, ApiResult};
use crate::todos::{Category, CategoryInput, CategoryService};

#[get("/categories")]
pub fn list(
    categories: &State<Arc<CategoryService>>,
    identity: CurrentIdentity,
) -> ApiResult<Vec<Category>> {
    let items = categories.list(identity.get())?;
    Ok(ApiResponse::ok("Operation successful", items))
}

#[get("/categories/<id>")]
pub fn show(
    categories: &State<Arc<CategoryService>>,
    identity: CurrentIdentity,
    id: i64,
) -> ApiResult<Category> {
    let category = categories.get(identity.get(), id)?;
    Ok(ApiResponse::ok("Operation successful", category))
}

#[post("/categories", data = "<body>")]
pub fn create(
    categories: &State<Arc<CategoryService>>,
    identity: CurrentIdentity,
    body: Json<CategoryInput>,
) -> ApiResult<Category> {
    let category = categories.create(identity.get(), body.into_inner())?;
    Ok(ApiResponse::created("Category created successfully", category))
}

#[put("/categories/<id>", data = "<body>")]
pub fn update(
    categories: &State<Arc<CategoryService>>,
    identity: CurrentIdentity,
    id: i64,
    body: Json<CategoryInput>,
) -> ApiResult<Category> {
    let category = categories.update(identity.get(), id, body.into_inner())?;
    Ok(ApiResponse::ok("Category updated successfully", category))
}

#[delete("/categories/<id>")]
pub fn remove(
    categories: &State<Arc<CategoryService>>,
    identity: CurrentIdentity,
    id: i64,
) -> ApiResult<()> {
    categories.delete(identity.get(), id)?;
    Ok(ApiResponse::message("Category deleted successfully"))
}
