// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rust TodoList library
//!
//! A todo list API secured by stateless JWT bearer tokens. The [`auth`]
//! module holds the authentication core (token codec and lifecycle,
//! per-request identity, ownership checks); [`users`] and [`todos`] are the
//! business operations built on it and [`server`] exposes them over HTTP.

pub mod auth;
pub mod config;
pub mod server;
pub mod todos;
pub mod users;
