// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Cross-Origin Resource Sharing (CORS) support
//!
//! Browser clients send the bearer token in the `Authorization` header, which
//! makes every API call a preflighted request. [`Cors`] adds the headers
//! browsers look for and [`preflight`] answers the `OPTIONS` requests.

use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::options;
use rocket::{Request, Response};
use std::path::PathBuf;

use crate::auth::guards::TOKEN_HEADER;

/// Fairing adding CORS headers to every response
///
/// Any origin is accepted. Tokens travel in a header rather than in cookies,
/// so credentials are not allowed.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, PATCH, DELETE, OPTIONS",
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            format!("{}, Content-Type", TOKEN_HEADER),
        ));
        response.set_header(Header::new("Access-Control-Max-Age", "3600"));
    }
}

/// Answer CORS preflight requests on any path
///
/// The [`Cors`] fairing adds the actual headers.
#[options("/<_path..>")]
pub fn preflight(_path: PathBuf) {}
