// crates/aiact-config/src/lib.rs
// ============================================================================
// Module: Aiact Config Library
// Description: Configuration model, strict TOML loading, and validation.
// Purpose: Expose the fail-closed configuration surface for server and CLI.
// Dependencies: aiact-scan, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration loading is strict and fail-closed: unknown fields are
//! rejected, files are size- and encoding-checked before parsing, and every
//! loaded configuration passes structural validation before use.
//!
//! Invariants:
//! - `load(None)` yields the validated default configuration.
//! - Unknown TOML fields are rejected at every nesting level.
//! - Validation failures carry stable, matchable messages.

pub mod error;
pub mod model;

pub use error::ConfigError;
pub use model::AiactConfig;
pub use model::PluginsConfig;
pub use model::ServerConfig;
pub use model::ServerTransport;
