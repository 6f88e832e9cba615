// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Mint a token for a seed user from the command line
//!
//! The token is signed with the configured secret and issuer. The user id is
//! the one the server assigns to the account when it seeds the users listed
//! in `access.users`.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rust_todolist::auth::jwt::MAX_ACCESS_TTL_SECONDS;
use rust_todolist::auth::{TokenKind, TokenService};
use rust_todolist::config::Config;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Access,
    Refresh,
}

impl From<Kind> for TokenKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Access => TokenKind::Access,
            Kind::Refresh => TokenKind::Refresh,
        }
    }
}

/// Create tokens for users of the configuration
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Username (must exist in access.users)
    #[arg(short, long)]
    user: String,

    /// Kind of token to create
    #[arg(short, long, value_enum, default_value_t = Kind::Access)]
    kind: Kind,

    /// Access token lifetime in seconds (overrides config)
    #[arg(short, long)]
    duration: Option<i64>,

    /// Only print the token
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    let user_id = config
        .access
        .seeded_id(&args.user)
        .with_context(|| format!("User {} is not defined in access.users", args.user))?;

    let ttl = args
        .duration
        .unwrap_or(config.auth.access_token_ttl_seconds);
    if !(1..=MAX_ACCESS_TTL_SECONDS).contains(&ttl) {
        anyhow::bail!(
            "Token duration must be between 1 and {} seconds",
            MAX_ACCESS_TTL_SECONDS
        );
    }
    let tokens = TokenService::with_system_clock(config.auth.token_codec(), ttl);

    let kind = TokenKind::from(args.kind);
    let token = match kind {
        TokenKind::Access => tokens.issue_access_token(user_id, &args.user)?,
        TokenKind::Refresh => tokens.issue_refresh_token(user_id)?,
    };
    let claims = tokens.decode(&token)?;

    if args.quiet {
        print!("{}", token);
    } else {
        println!("Token created successfully");
        println!("User: {} (id {})", args.user, user_id);
        println!("Kind: {}", kind);
        println!("Issuer: {}", claims.iss);
        println!("Expires: {}", claims.exp);
        println!("Token: {}", token);
    }
    Ok(())
}
