// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rocket server builder
//!
//! Wires the configuration into the services, manages them as Rocket state
//! and attaches the fairings and routes.

use anyhow::{Context, Result};
use log::{debug, info};
use rocket::config::LogLevel;
use rocket::data::{Limits, ToByteUnit};
use rocket::figment::Figment;
use rocket::{Build, Rocket};
use std::sync::Arc;

use super::cors::{preflight, Cors};
use super::handlers::{api_catchers, api_routes, API_BASE};
use crate::auth::{BearerAuthentication, Clock, PasswordHasher, SystemClock, TokenService};
use crate::config::Config;
use crate::todos::{CategoryService, OwnedStore, TodoService};
use crate::users::{AccountService, MemoryUserStore};

/// Rocket figment for the configured binding
pub fn figment_from_config(config: &Config) -> Figment {
    rocket::Config::figment()
        .merge(("ident", config.server.name.clone()))
        .merge(("limits", Limits::new().limit("json", 1.mebibytes())))
        .merge(("address", config.server.address.clone()))
        .merge(("port", config.server.port))
        .merge(("log_level", LogLevel::Normal))
}

/// Build a configured Rocket server instance
///
/// Tokens are issued and checked against `clock`; production code passes a
/// [`SystemClock`] while tests drive expiry with a manual clock.
///
/// ### Managed state
///
/// * `Arc<Config>`
/// * `Arc<TokenService>` (read by the [`BearerAuthentication`] fairing)
/// * `Arc<AccountService>`, `Arc<TodoService>`, `Arc<CategoryService>`
///
/// ### Errors
///
/// Fails if a seed account from `access.users` cannot be created.
///
/// ### Example
///
/// ```no_run
/// use rust_todolist::config::Config;
/// use rust_todolist::server::{build_rocket, figment_from_config};
/// use std::sync::Arc;
///
/// # async fn run() -> anyhow::Result<()> {
/// let config = Arc::new(Config::default());
/// let rocket = build_rocket(figment_from_config(&config), config, None)?;
/// rocket.launch().await?;
/// # Ok(())
/// # }
/// ```
pub fn build_rocket(
    figment: Figment,
    config: Arc<Config>,
    clock: Option<Arc<dyn Clock>>,
) -> Result<Rocket<Build>> {
    let clock = clock.unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);
    let tokens = Arc::new(TokenService::new(
        config.auth.token_codec(),
        config.auth.access_token_ttl_seconds,
        clock,
    ));

    let accounts = Arc::new(AccountService::new(
        Arc::new(MemoryUserStore::new()),
        tokens.clone(),
        PasswordHasher::new(config.auth.password_cost),
    ));
    for user in &config.access.users {
        let created = accounts
            .seed(&user.username, &user.password)
            .with_context(|| format!("Failed to create seed user {}", user.username))?;
        if created {
            info!("Seed user created: {}", user.username);
        }
    }

    let todo_store = Arc::new(OwnedStore::new());
    let category_store = Arc::new(OwnedStore::new());
    let todos = Arc::new(TodoService::new(todo_store.clone(), category_store.clone()));
    let categories = Arc::new(CategoryService::new(category_store, todo_store));

    debug!(
        "Access tokens valid for {} seconds, issuer {}",
        tokens.access_ttl_seconds(),
        config.auth.issuer
    );

    Ok(rocket::custom(figment)
        .attach(Cors)
        .attach(BearerAuthentication)
        .mount("/", rocket::routes![preflight])
        .mount(API_BASE, api_routes())
        .register("/", api_catchers())
        .manage(tokens)
        .manage(accounts)
        .manage(todos)
        .manage(categories)
        .manage(config))
}
