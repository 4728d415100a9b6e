//! # Server Configuration File
//!
//! Optional TOML configuration for the `server` command. Every field is
//! optional; resolution order is environment variable, then config
//! file, then built-in default (see [`api::ApiOptions::resolve`]).
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 8080
//! rate_limit = 50
//! cors_origins = "https://admin.example.com"
//! ```
//!
//! [`api::ApiOptions::resolve`]: crate::api::ApiOptions::resolve

use regdesk_core::RegdeskError;
use serde::Deserialize;
use std::path::Path;

/// Parsed server configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: Option<String>,
    /// Port to bind to.
    pub port: Option<u16>,
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: Option<u32>,
    /// Comma-separated allowed CORS origins, or "*".
    pub cors_origins: Option<String>,
}

impl ServerConfig {
    /// Load and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, RegdeskError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RegdeskError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        toml::from_str(&raw).map_err(|e| {
            RegdeskError::Serialization(format!("Invalid config '{}': {}", path.display(), e))
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
