// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Route handlers of the `/api/v1` API

pub mod auth;
pub mod categories;
pub mod todos;
pub mod users;

use log::debug;
use rocket::http::Status;
use rocket::{catch, catchers, routes, Catcher, Request, Route};

use super::response::ApiError;

/// Mount point of every API route
pub const API_BASE: &str = "/api/v1";

/// All API routes, to mount under [`API_BASE`]
pub fn api_routes() -> Vec<Route> {
    routes![
        auth::register,
        auth::login,
        auth::logout,
        auth::refresh,
        users::me,
        users::update_password,
        todos::list,
        todos::show,
        todos::create,
        todos::update,
        todos::toggle,
        todos::remove,
        categories::list,
        categories::show,
        categories::create,
        categories::update,
        categories::remove,
    ]
}

/// Answer errors raised outside handlers with the API envelope
///
/// Unparsable bodies (`422`) are reported as `400 Bad Request`.
#[catch(default)]
pub fn api_catcher(status: Status, request: &Request<'_>) -> ApiError {
    let (status, message) = match status.code {
        400 | 422 => (Status::BadRequest, "Invalid request body"),
        401 => (status, "User not authenticated"),
        403 => (status, "No permission to access this resource"),
        404 => (status, "Resource not found"),
        _ => (status, status.reason_lossy()),
    };
    debug!("{} {} answered by catcher with {}", request.method(), request.uri(), status);
    ApiError::new(status, message)
}

pub fn api_catchers() -> Vec<Catcher> {
    catchers![api_catcher]
}
