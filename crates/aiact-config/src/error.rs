// crates/aiact-config/src/error.rs
// ============================================================================
// Module: Config Errors
// Description: Error variants raised during configuration load and validation.
// Purpose: Keep error messages stable for callers and tests that match them.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every guard in the loading pipeline maps to its own variant so callers can
//! tell path problems, size problems, encoding problems, parse problems, and
//! semantic validation problems apart.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration path exceeds the maximum allowed length.
    #[error("config path exceeds max length")]
    PathTooLong,
    /// One path component exceeds the maximum allowed length.
    #[error("config path component too long")]
    PathComponentTooLong,
    /// The configuration file exceeds the size limit.
    #[error("config file exceeds size limit")]
    FileTooLarge,
    /// The configuration file is not valid UTF-8.
    #[error("config file must be utf-8")]
    NotUtf8,
    /// The configuration file could not be read.
    #[error("config file read failed: {0}")]
    Read(String),
    /// The configuration file is not valid strict TOML.
    #[error("config parse failed: {0}")]
    Parse(String),
    /// The configuration is structurally invalid.
    #[error("config invalid: {0}")]
    Invalid(String),
}
