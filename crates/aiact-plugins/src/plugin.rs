// crates/aiact-plugins/src/plugin.rs
// ============================================================================
// Module: Plugin Interface
// Description: Compliance plugin trait, tool and resource registrations.
// Purpose: Define the contract every plugin fulfills toward the registry.
// Dependencies: aiact-scan, serde, serde_json
// ============================================================================

//! ## Overview
//! A plugin describes itself once: a unique name, a description, the tools it
//! handles, and the static resources it serves. Tool handlers are plain
//! closures over JSON values so the dispatch layer stays protocol-agnostic.
//!
//! Invariants:
//! - `tools` and `resources` return the same registrations on every call.
//! - Handlers are `Send + Sync` and may block (scan proxy I/O).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use aiact_scan::ScanClient;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error::ToolError;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Shared services handed to plugins at construction time.
///
/// Dependencies are passed explicitly; plugins read no ambient state.
#[derive(Clone)]
pub struct PluginContext {
    /// Scoring proxy client shared across plugins.
    pub scan: Arc<ScanClient>,
}

// ============================================================================
// SECTION: Tool Registration
// ============================================================================

/// Handler invoked with the tool's JSON arguments.
pub type ToolHandler = Box<dyn Fn(&Value) -> Result<Value, ToolError> + Send + Sync>;

/// Externally visible description of one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Globally unique tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON schema describing the accepted arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// One tool offered by a plugin.
pub struct ToolRegistration {
    /// Tool description served by `tools/list`.
    pub definition: ToolDefinition,
    /// Handler invoked by `tools/call`.
    pub handler: ToolHandler,
}

// ============================================================================
// SECTION: Resource Registration
// ============================================================================

/// Externally visible description of one static resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Globally unique resource URI.
    pub uri: String,
    /// Short resource name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// MIME type of the resource content.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// One static resource offered by a plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRegistration {
    /// Resource description served by `resources/list`.
    pub descriptor: ResourceDescriptor,
    /// Resource content served by `resources/read`.
    pub content: String,
}

// ============================================================================
// SECTION: Plugin Trait
// ============================================================================

/// A bundle of compliance tools and resources under one name.
///
/// # Invariants
/// - `name` is stable for the lifetime of the plugin.
/// - `initialize` runs before the registry commits any registration.
/// - `shutdown` runs exactly once, on unregistration.
pub trait CompliancePlugin: Send + Sync {
    /// Unique plugin name.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Whether the plugin is operational. Registered plugins report `true`.
    fn enabled(&self) -> bool {
        true
    }

    /// Tools this plugin handles.
    fn tools(&self) -> Vec<ToolRegistration>;

    /// Static resources this plugin serves.
    fn resources(&self) -> Vec<ResourceRegistration> {
        Vec::new()
    }

    /// One-time setup hook, run before registration commits.
    ///
    /// # Errors
    ///
    /// Returns a reason string when the plugin cannot become operational;
    /// the registry aborts the registration without mutating state.
    fn initialize(&self) -> Result<(), String> {
        Ok(())
    }

    /// Teardown hook, run on unregistration.
    fn shutdown(&self) {}
}
