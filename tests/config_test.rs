// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use anyhow::Result;
use rust_todolist::config::{Config, SeedUser};
use std::fs;
use std::sync::Once;
use tempfile::tempdir;

static INIT: Once = Once::new();

fn setup() {
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    });
}

#[test]
fn test_config_load_and_save() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");

    let mut config = Config::default();
    config.server.port = 8081;
    config.server.address = "192.168.1.1".to_string();
    config.auth.access_token_ttl_seconds = 600;
    config.access.users.push(SeedUser {
        username: "admin".to_string(),
        password: "admin123".to_string(),
    });
    config.save_to_file(&config_path)?;

    let loaded = Config::from_file(&config_path)?;
    assert_eq!(loaded, config);
    Ok(())
}

#[test]
fn test_missing_file_is_created_with_defaults() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("missing.yaml");

    let config = Config::from_file(&config_path)?;
    assert!(config_path.exists());
    assert_eq!(config, Config::default());
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.auth.access_token_ttl_seconds, 86400);
    Ok(())
}

#[test]
fn test_invalid_file_writes_sample() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(
        &config_path,
        "server:\n  port: \"not-an-integer\"\nauth:\n  signing_secret: 12345\n",
    )?;

    assert!(Config::from_file(&config_path).is_err());

    let sample_path = config_path.with_extension("sample.yaml");
    assert!(sample_path.exists(), "sample configuration was not written");
    assert_eq!(Config::from_file(&sample_path)?, Config::default());
    Ok(())
}

#[test]
fn test_rules_beyond_schema_are_enforced() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(
        &config_path,
        "access:\n  users:\n    - username: admin\n      password: admin123\n    - username: admin\n      password: other123\n",
    )?;

    let err = Config::from_file(&config_path).unwrap_err();
    assert!(format!("{:#}", err).contains("Duplicate seed user"));
    Ok(())
}

#[test]
fn test_apply_args() {
    let mut config = Config::default();
    config.apply_args(Some(9000), Some("0.0.0.0".to_string()), None);
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.address, "0.0.0.0");
    assert_eq!(config.auth.signing_secret, Config::default().auth.signing_secret);
}
