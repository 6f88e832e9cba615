// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! HTTP server configuration

use serde::{Deserialize, Serialize};

/// Network binding of the API server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Name reported in the `Server` header and in logs
    #[serde(default = "default_name")]
    pub name: String,

    /// Address to bind, `127.0.0.1` by default
    ///
    /// Use `0.0.0.0` to listen on all IPv4 interfaces.
    #[serde(default = "default_address")]
    pub address: String,

    /// TCP port, 8080 by default
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_name() -> String {
    format!("RustTodoList/{}", env!("CARGO_PKG_VERSION"))
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            address: default_address(),
            port: default_port(),
        }
    }
}
