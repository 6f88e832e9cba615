// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! Schema output and the validation rules JSON schema cannot express.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::collections::HashSet;

use super::{Config, CONFIG_SCHEMA};
use crate::auth::jwt::MAX_ACCESS_TTL_SECONDS;
use crate::auth::password::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::users::service::{validate_password, validate_username};

/// Secrets shorter than this are accepted with a warning
pub const RECOMMENDED_SECRET_LEN: usize = 32;

/// Output the embedded JSON schema to the console.
///
/// Called for the `--show-config-schema` flag.
///
/// # Example
///
/// ```bash
/// ./rust_todolist --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;
    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;
    println!("{}", formatted_schema);
    Ok(())
}

/// Check if a string is a valid IP address
///
/// Accepts IPv4 and IPv6 addresses plus `localhost`.
pub fn is_valid_ip_address(addr: &str) -> bool {
    if addr.parse::<std::net::IpAddr>().is_ok() {
        return true;
    }

    matches!(addr, "localhost")
}

/// Validates the configuration against additional rules that aren't covered by the JSON schema.
///
/// # Validation Rules
///
/// - **Signing secret**: must not be empty; the built-in default or fewer
///   than 32 bytes only warn
/// - **Token lifetime**: strictly positive and at most [`MAX_ACCESS_TTL_SECONDS`]
/// - **Bind address**: an IP address or `localhost`
/// - **Password cost**: within the range bcrypt accepts
/// - **Seed accounts**: unique usernames satisfying the registration rules
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");

    if config.auth.signing_secret.is_empty() {
        anyhow::bail!("The token signing secret cannot be empty");
    }
    if config.auth.uses_default_secret() {
        warn!(
            "The token signing secret is the built-in default, anyone can forge tokens; \
             set auth.signing_secret (see hmac_keygen)"
        );
    } else if config.auth.signing_secret.len() < RECOMMENDED_SECRET_LEN {
        warn!(
            "The token signing secret is only {} bytes long, at least {} are recommended",
            config.auth.signing_secret.len(),
            RECOMMENDED_SECRET_LEN
        );
    }

    if !(1..=MAX_ACCESS_TTL_SECONDS).contains(&config.auth.access_token_ttl_seconds) {
        anyhow::bail!(
            "Invalid access token lifetime: {} (must be between 1 and {} seconds)",
            config.auth.access_token_ttl_seconds,
            MAX_ACCESS_TTL_SECONDS
        );
    }

    if !is_valid_ip_address(&config.server.address) {
        anyhow::bail!("Invalid bind address: {}", config.server.address);
    }

    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&config.auth.password_cost) {
        anyhow::bail!("Invalid password cost: {}", config.auth.password_cost);
    }

    let mut seen = HashSet::new();
    for user in &config.access.users {
        if !seen.insert(user.username.as_str()) {
            anyhow::bail!("Duplicate seed user: {}", user.username);
        }
        validate_username(&user.username)
            .with_context(|| format!("Invalid seed user name: {}", user.username))?;
        validate_password(&user.password)
            .with_context(|| format!("Invalid password for seed user {}", user.username))?;
    }

    Ok(())
}
