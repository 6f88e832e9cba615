// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Main entry point of the todo list API server

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use rust_todolist::config::{self, Config};
use rust_todolist::server::{build_rocket, figment_from_config};

/// Todo list API server with JWT authentication
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (YAML format)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Server port (default: 8080)
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Server address (default: 127.0.0.1)
    #[arg(short = 'a', long)]
    address: Option<String>,

    /// HMAC secret for token signing
    #[arg(long)]
    signing_secret: Option<String>,

    /// Path to a configuration to validate and exit
    #[arg(long)]
    validate_config: Option<PathBuf>,

    /// Output the configuration schema as JSON and exit
    #[arg(long)]
    show_config_schema: bool,

    /// Enable verbose logging (debug level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Disable all logging output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[rocket::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.quiet {
        log::LevelFilter::Off
    } else if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if args.show_config_schema {
        return config::output_config_schema();
    }

    if let Some(validate_path) = args.validate_config {
        if !validate_path.exists() {
            return Err(anyhow::anyhow!(
                "Configuration file does not exist: {}",
                validate_path.display()
            ));
        }

        Config::from_file(&validate_path)
            .map_err(|err| anyhow::anyhow!("Configuration validation failed: {}", err))?;
        println!("Configuration file is valid: {}", validate_path.display());
        return Ok(());
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("config.yaml"));
    let mut config = Config::from_file(&config_path)?;
    config.apply_args(args.port, args.address.clone(), args.signing_secret.clone());
    // Command line values skip schema validation
    config::validate_specific_rules(&config)?;

    info!(
        "Starting {} on {}:{}",
        config.server.name, config.server.address, config.server.port
    );
    let figment = figment_from_config(&config);
    let rocket = build_rocket(figment, Arc::new(config), None)?;
    rocket.launch().await?;

    info!("Server stopped");
    Ok(())
}
