// crates/aiact-plugins/src/lib.rs
// ============================================================================
// Module: Aiact Plugins Library
// Description: Compliance plugin trait, registry, loader, and builtins.
// Purpose: Expose the plugin surface that the MCP layer serves tools from.
// Dependencies: aiact-core, aiact-scan, serde, serde_json, sha2, thiserror, time
// ============================================================================

//! ## Overview
//! Plugins bundle related compliance tools and static resources under a
//! unique name. The registry enforces global uniqueness of plugin names,
//! tool names, and resource URIs, and registration is atomic: a rejected
//! plugin leaves every table untouched.
//!
//! Invariants:
//! - One registered owner per plugin name, tool name, and resource URI.
//! - Registration is all-or-nothing; `initialize` runs before any commit.
//! - Unregistration removes exactly the entries the plugin registered.

pub mod builtins;
pub mod error;
pub mod loader;
pub mod plugin;
pub mod registry;
pub mod templates;

pub use error::RegistryError;
pub use error::TemplateError;
pub use error::ToolError;
pub use loader::LoadFailure;
pub use loader::LoadReport;
pub use loader::builtin_manifest;
pub use loader::load_builtin_plugins;
pub use plugin::CompliancePlugin;
pub use plugin::PluginContext;
pub use plugin::ResourceDescriptor;
pub use plugin::ResourceRegistration;
pub use plugin::ToolDefinition;
pub use plugin::ToolHandler;
pub use plugin::ToolRegistration;
pub use registry::PluginInfo;
pub use registry::PluginRegistry;
