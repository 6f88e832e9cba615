// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management
//!
//! The configuration is a YAML file validated against an embedded JSON schema
//! before it is deserialized, then checked against the rules the schema
//! cannot express ([`utils::validate_specific_rules`]).
//!
//! ## Configuration Structure
//!
//! - `server`: network binding of the API server
//! - `auth`: token signing secret, token lifetime, issuer and password cost
//! - `access`: accounts created at startup
//!
//! ## Usage
//!
//! ```no_run
//! use rust_todolist::config::Config;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file("config.yaml").unwrap();
//!
//! // Command line overrides
//! config.apply_args(Some(8081), Some("0.0.0.0".to_string()), None);
//!
//! println!("Server port: {}", config.server.port);
//! ```

pub mod access;
pub mod auth;
pub mod server;
pub mod utils;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};

pub use access::{AccessConfig, SeedUser};
pub use auth::{AuthConfig, DEFAULT_ISSUER, DEFAULT_SIGNING_SECRET};
pub use server::ServerConfig;
pub use utils::{is_valid_ip_address, output_config_schema, validate_specific_rules};

/// JSON schema the YAML configuration must satisfy
pub(crate) const CONFIG_SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Root configuration structure
///
/// Every section falls back to its defaults when absent, so an empty file is
/// a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Network binding of the API server
    #[serde(default)]
    pub server: ServerConfig,

    /// Token and password settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Accounts seeded at startup
    #[serde(default)]
    pub access: AccessConfig,
}

impl Config {
    /// Write a configuration with default values next to `path`
    ///
    /// `config.yaml` gets a `config.sample.yaml` sibling the user can edit
    /// and rename.
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let sample_path = path.with_extension("sample.yaml");
        debug!("Original path: {:?}, Sample path: {:?}", path, sample_path);

        if let Some(parent) = sample_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directory: {:?}", parent);
                fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create parent directory for sample config at {:?}",
                        parent
                    )
                })?;
            }
        }

        Self::default()
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file
    ///
    /// A missing file is created with default values. A file failing schema
    /// validation, deserialization or the specific rules is reported as an
    /// error, and a sample configuration is written next to it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;
        Self::from_yaml_str(&contents).map_err(|err| {
            error!("Invalid configuration in {}: {:#}", path.display(), err);
            if let Err(e) = Self::create_sample_config(path) {
                error!("Failed to create sample config: {}", e);
            }
            err
        })
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let yaml_value: serde_yml::Value =
            serde_yml::from_str(contents).context("Failed to parse YAML configuration")?;
        // An empty document is an empty mapping
        let json_value = match serde_json::to_value(&yaml_value)
            .context("Failed to convert YAML to JSON for validation")?
        {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            value => value,
        };

        let schema: serde_json::Value =
            serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;
        let validator = jsonschema::draft202012::options()
            .should_validate_formats(true)
            .build(&schema)?;

        debug!("Validating configuration against schema");
        if let Err(error) = validator.validate(&json_value) {
            anyhow::bail!("Configuration validation failed: {}", error);
        }

        debug!("Schema validation passed, deserializing into Config structure");
        let config: Config = serde_json::from_value(json_value)
            .context("Failed to deserialize configuration")?;

        validate_specific_rules(&config)?;
        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Override configuration values with command line arguments
    ///
    /// Only arguments actually given replace the loaded values.
    ///
    /// # Parameters
    ///
    /// * `port` - TCP port of the API server
    /// * `address` - Network address the API server binds to
    /// * `signing_secret` - HMAC secret for token signing
    pub fn apply_args(
        &mut self,
        port: Option<u16>,
        address: Option<String>,
        signing_secret: Option<String>,
    ) {
        if let Some(port) = port {
            debug!("Overriding port from command line: {}", port);
            self.server.port = port;
        }

        if let Some(address) = address {
            debug!("Overriding address from command line: {}", address);
            self.server.address = address;
        }

        if let Some(secret) = signing_secret {
            debug!("Overriding signing secret from command line");
            self.auth.signing_secret = secret;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        assert_eq!(Config::from_yaml_str("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections_are_completed() {
        let config = Config::from_yaml_str(
            "server:\n  port: 9000\nauth:\n  access_token_ttl_seconds: 60\n",
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.address, "127.0.0.1");
        assert_eq!(config.auth.access_token_ttl_seconds, 60);
        assert_eq!(config.auth.issuer, DEFAULT_ISSUER);
    }

    #[test]
    fn test_schema_rejects_wrong_types() {
        assert!(Config::from_yaml_str("server:\n  port: \"eighty\"\n").is_err());
        assert!(Config::from_yaml_str("auth:\n  unknown_key: 1\n").is_err());
    }

    #[test]
    fn test_token_lifetime_is_bounded() {
        assert!(Config::from_yaml_str("auth:\n  access_token_ttl_seconds: 100000000000000\n").is_err());
        assert!(Config::from_yaml_str("auth:\n  access_token_ttl_seconds: 45051429\n").is_err());

        let config =
            Config::from_yaml_str("auth:\n  access_token_ttl_seconds: 45051428\n").unwrap();
        let tokens = crate::auth::TokenService::with_system_clock(
            config.auth.token_codec(),
            config.auth.access_token_ttl_seconds,
        );
        assert!(tokens.issue_token_pair(1, "alice").is_ok());
    }

    #[test]
    fn test_apply_args_overrides_only_given_values() {
        let mut config = Config::default();
        config.apply_args(Some(8181), None, Some("another-secret".to_string()));
        assert_eq!(config.server.port, 8181);
        assert_eq!(config.server.address, "127.0.0.1");
        assert_eq!(config.auth.signing_secret, "another-secret");
    }
}
