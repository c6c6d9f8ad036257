//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration for the filtering proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, inbound limits).
    pub listener: ListenerConfig,

    /// Backend RPC server to forward permitted requests to.
    pub backend: BackendConfig,

    /// Allow-list source.
    pub allowlist: AllowListConfig,

    /// Log output settings.
    pub log: LogConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Total time budget for an inbound request in seconds.
    pub request_timeout_secs: u64,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Backend server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend endpoint the proxy forwards to.
    pub url: Url,

    /// Timeout for a single backend call in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: 10,
        }
    }
}

impl BackendConfig {
    /// Build the backend URL from a localhost port, the conventional
    /// deployment shape where the backend is co-located with the proxy.
    pub fn for_local_port(port: u16) -> Self {
        Self {
            // The format always yields a valid http URL.
            url: Url::parse(&format!("http://127.0.0.1:{port}/"))
                .expect("localhost URL is always valid"),
            ..Self::default()
        }
    }
}

fn default_backend_url() -> Url {
    Url::parse("http://127.0.0.1:8545/").expect("default backend URL is valid")
}

/// Allow-list source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AllowListConfig {
    /// Path to the allow-list file, one method name per line.
    pub path: PathBuf,
}

impl Default for AllowListConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("whitelist.txt"),
        }
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Optional log file appended to in addition to stderr.
    pub file: Option<PathBuf>,
}
