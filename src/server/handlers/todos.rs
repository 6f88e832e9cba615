// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Todo item routes
//!
//! All of them need a valid access token; ownership is enforced by
//! [`TodoService`].

use rocket::serde::json::Json;
use rocket::{delete, get, patch, post, put, FromForm, State};
use std::sync::Arc;

use crate::auth::CurrentIdentity;
use crate::server::response::{ApiError, ApiResponse, ApiResult};
use crate::todos::{Todo, TodoFilter, TodoInput, TodoPriority, TodoService, TodoStatus};

/// Query string of the listing route
#[derive(Debug, FromForm)]
pub struct TodoQuery<'r> {
    pub status: Option<&'r str>,
    pub priority: Option<&'r str>,
    #[field(name = "categoryId")]
    pub category_id: Option<i64>,
}

impl TryFrom<TodoQuery<'_>> for TodoFilter {
    type Error = ApiError;

    fn try_from(query: TodoQuery<'_>) -> Result<Self, Self::Error> {
        Ok(TodoFilter {
            status: query
                .status
                .map(str::parse::<TodoStatus>)
                .transpose()
                .map_err(ApiError::bad_request)?,
            priority: query
                .priority
                .map(str::parse::<TodoPriority>)
                .transpose()
                .map_err(ApiError::bad_request)?,
            category_id: query.category_id,
        })
    }
}

#[get("/todos?<query..>")]
pub fn list(
    todos: &State<Arc<TodoService>>,
    identity: CurrentIdentity,
    query: TodoQuery<'_>,
) -> ApiResult<Vec<Todo>> {
    let filter = TodoFilter::try_from(query)?;
    let items = todos.list(identity.get(), &filter)?;
    Ok(ApiResponse::ok("Operation successful", items))
}

#[get("/todos/<id>")]
pub fn show(todos: &State<Arc<TodoService>>, identity: CurrentIdentity, id: i64) -> ApiResult<Todo> {
    let todo = todos.get(identity.get(), id)?;
    Ok(ApiResponse::ok("Operation successful", todo))
}

#[post("/todos", data = "<body>")]
pub fn create(
    todos: &State<Arc<TodoService>>,
    identity: CurrentIdentity,
    body: Json<TodoInput>,
) -> ApiResult<Todo> {
    let todo = todos.create(identity.get(), body.into_inner())?;
    Ok(ApiResponse::created("Todo created successfully", todo))
}

#[put("/todos/<id>", data = "<body>")]
pub fn update(
    todos: &State<Arc<TodoService>>,
    identity: CurrentIdentity,
    id: i64,
    body: Json<TodoInput>,
) -> ApiResult<Todo> {
    let todo = todos.update(identity.get(), id, body.into_inner())?;
    Ok(ApiResponse::ok("Todo updated successfully", todo))
}

#[patch("/todos/<id>/toggle")]
pub fn toggle(todos: &State<Arc<TodoService>>, identity: CurrentIdentity, id: i64) -> ApiResult<Todo> {
    let todo = todos.toggle_status(identity.get(), id)?;
    Ok(ApiResponse::ok("Todo status toggled", todo))
}

#[delete("/todos/<id>")]
pub fn remove(todos: &State<Arc<TodoService>>, identity: CurrentIdentity, id: i64) -> ApiResult<()> {
    todos.delete(identity.get(), id)?;
    Ok(ApiResponse::message("Todo deleted successfully"))
}
