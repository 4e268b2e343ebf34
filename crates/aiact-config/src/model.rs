// crates/aiact-config/src/model.rs
// ============================================================================
// Module: Config Model
// Description: Configuration records, defaults, loading guards, validation.
// Purpose: Define the server, scan, and plugin settings with strict parsing.
// Dependencies: aiact-scan, serde, toml, std::fs
// ============================================================================

//! ## Overview
//! The model mirrors the TOML layout: a `[server]` table for transport and
//! limits, a `[scan]` table for the scoring proxy, and a `[plugins]` table
//! for loader controls. All tables and fields are optional in the file;
//! omitted values take the documented defaults, then the whole record is
//! validated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use aiact_scan::ScanConfig;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum accepted configuration path length, in bytes.
const MAX_CONFIG_PATH_BYTES: usize = 4096;

/// Maximum accepted length of one path component, in bytes.
const MAX_PATH_COMPONENT_BYTES: usize = 255;

/// Maximum accepted configuration file size, in bytes.
const MAX_CONFIG_FILE_BYTES: u64 = 1024 * 1024;

/// Upper bound accepted for request and response byte limits.
const MAX_BYTE_LIMIT: usize = 16 * 1024 * 1024;

/// Upper bound accepted for frame header limits.
const MAX_FRAME_HEADER_LIMIT: usize = 64 * 1024;

/// Upper bound accepted for the scan timeout, in milliseconds.
const MAX_SCAN_TIMEOUT_MS: u64 = 120_000;

// ============================================================================
// SECTION: Server Settings
// ============================================================================

/// Transport the MCP server listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerTransport {
    /// Content-Length framed JSON-RPC over stdin/stdout.
    Stdio,
    /// JSON-RPC over HTTP.
    Http,
}

/// MCP server settings.
///
/// # Invariants
/// - `bind` parses as a socket address.
/// - Byte limits are nonzero and bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Transport to serve on.
    pub transport: ServerTransport,
    /// Bind address for the HTTP transport.
    pub bind: String,
    /// Maximum accepted request payload, in bytes.
    pub max_request_bytes: usize,
    /// Maximum accepted frame header section, in bytes.
    pub max_frame_header_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: ServerTransport::Stdio,
            bind: "127.0.0.1:8642".to_string(),
            max_request_bytes: 1024 * 1024,
            max_frame_header_bytes: 4096,
        }
    }
}

// ============================================================================
// SECTION: Plugin Settings
// ============================================================================

/// Plugin loader settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginsConfig {
    /// Plugin names the loader skips.
    pub disabled: Vec<String>,
}

// ============================================================================
// SECTION: Root Record
// ============================================================================

/// Root configuration record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AiactConfig {
    /// MCP server settings.
    pub server: ServerConfig,
    /// Scoring proxy settings.
    pub scan: ScanConfig,
    /// Plugin loader settings.
    pub plugins: PluginsConfig,
}

impl AiactConfig {
    /// Loads configuration from an optional path.
    ///
    /// `None` yields the validated defaults. `Some` applies the path, size,
    /// and encoding guards, parses strict TOML, and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any guard, the parser, or validation
    /// rejects the input.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        };
        check_path(path)?;
        let metadata = fs::metadata(path).map_err(|err| ConfigError::Read(err.to_string()))?;
        if metadata.len() > MAX_CONFIG_FILE_BYTES {
            return Err(ConfigError::FileTooLarge);
        }
        let bytes = fs::read(path).map_err(|err| ConfigError::Read(err.to_string()))?;
        let byte_count =
            u64::try_from(bytes.len()).map_err(|_| ConfigError::FileTooLarge)?;
        if byte_count > MAX_CONFIG_FILE_BYTES {
            return Err(ConfigError::FileTooLarge);
        }
        let text = String::from_utf8(bytes).map_err(|_| ConfigError::NotUtf8)?;
        let config: Self =
            toml::from_str(&text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration structure.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first failing constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid(
                "server.bind must be a socket address".to_string(),
            ));
        }
        if self.server.max_request_bytes == 0 || self.server.max_request_bytes > MAX_BYTE_LIMIT {
            return Err(ConfigError::Invalid(
                "server.max_request_bytes out of range".to_string(),
            ));
        }
        if self.server.max_frame_header_bytes == 0
            || self.server.max_frame_header_bytes > MAX_FRAME_HEADER_LIMIT
        {
            return Err(ConfigError::Invalid(
                "server.max_frame_header_bytes out of range".to_string(),
            ));
        }
        if self.scan.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("scan.base_url must be non-empty".to_string()));
        }
        if self.scan.timeout_ms == 0 || self.scan.timeout_ms > MAX_SCAN_TIMEOUT_MS {
            return Err(ConfigError::Invalid("scan.timeout_ms out of range".to_string()));
        }
        if self.scan.max_response_bytes == 0 || self.scan.max_response_bytes > MAX_BYTE_LIMIT {
            return Err(ConfigError::Invalid(
                "scan.max_response_bytes out of range".to_string(),
            ));
        }
        if self.plugins.disabled.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "plugins.disabled entries must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Path Guards
// ============================================================================

/// Applies the path length guards.
fn check_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_CONFIG_PATH_BYTES {
        return Err(ConfigError::PathTooLong);
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_BYTES {
            return Err(ConfigError::PathComponentTooLong);
        }
    }
    Ok(())
}
