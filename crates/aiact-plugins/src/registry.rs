// crates/aiact-plugins/src/registry.rs
// ============================================================================
// Module: Plugin Registry
// Description: Registry enforcing plugin, tool, and resource uniqueness.
// Purpose: Route tool calls and resource reads by globally unique names.
// Dependencies: crate::plugin, crate::error
// ============================================================================

//! ## Overview
//! The registry owns three tables keyed by plugin name, tool name, and
//! resource URI. Registration validates every uniqueness constraint and runs
//! the plugin's `initialize` hook before committing anything, so a rejected
//! plugin leaves all tables exactly as they were.
//!
//! Invariants:
//! - Tool names and resource URIs are unique across all registered plugins.
//! - Registration is atomic; partial registrations never occur.
//! - Unregistration removes only the entries owned by the named plugin.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::error::RegistryError;
use crate::plugin::CompliancePlugin;
use crate::plugin::ResourceDescriptor;
use crate::plugin::ResourceRegistration;
use crate::plugin::ToolDefinition;
use crate::plugin::ToolHandler;

// ============================================================================
// SECTION: Table Entries
// ============================================================================

/// Tool table entry, tagged with the owning plugin.
pub struct ToolEntry {
    /// Name of the plugin that registered the tool.
    pub plugin: String,
    /// Tool description.
    pub definition: ToolDefinition,
    /// Tool handler.
    pub handler: ToolHandler,
}

/// Resource table entry, tagged with the owning plugin.
pub struct ResourceEntry {
    /// Name of the plugin that registered the resource.
    pub plugin: String,
    /// Resource description.
    pub descriptor: ResourceDescriptor,
    /// Resource content.
    pub content: String,
}

/// Registry snapshot entry for one plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Plugin name.
    pub name: String,
    /// Plugin description.
    pub description: String,
    /// Whether the plugin reports itself operational.
    pub enabled: bool,
    /// Names of the tools the plugin registered, sorted.
    pub tools: Vec<String>,
    /// URIs of the resources the plugin registered, sorted.
    pub resources: Vec<String>,
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Registry of compliance plugins with uniqueness enforcement.
///
/// Mutation is confined to startup; serving happens through the read-only
/// accessors behind an `Arc`.
#[derive(Default)]
pub struct PluginRegistry {
    /// Registered plugins keyed by name.
    plugins: BTreeMap<String, Arc<dyn CompliancePlugin>>,
    /// Tool table keyed by tool name.
    tools: BTreeMap<String, ToolEntry>,
    /// Resource table keyed by resource URI.
    resources: BTreeMap<String, ResourceEntry>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin atomically.
    ///
    /// All uniqueness checks and the plugin's `initialize` hook run before
    /// any table is touched.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the plugin name, a tool name, or a
    /// resource URI is already taken, or when `initialize` fails. The
    /// registry is unchanged on error.
    pub fn register(&mut self, plugin: Arc<dyn CompliancePlugin>) -> Result<(), RegistryError> {
        let name = plugin.name().to_string();
        if self.plugins.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        let tools = plugin.tools();
        let mut pending_tools = BTreeMap::new();
        for registration in tools {
            let tool_name = registration.definition.name.clone();
            if let Some(entry) = self.tools.get(&tool_name) {
                return Err(RegistryError::DuplicateTool {
                    tool: tool_name,
                    owner: entry.plugin.clone(),
                });
            }
            if pending_tools.contains_key(&tool_name) {
                return Err(RegistryError::DuplicateTool {
                    tool: tool_name,
                    owner: name.clone(),
                });
            }
            pending_tools.insert(tool_name, registration);
        }

        let resources = plugin.resources();
        let mut pending_resources: BTreeMap<String, ResourceRegistration> = BTreeMap::new();
        for registration in resources {
            let uri = registration.descriptor.uri.clone();
            if let Some(entry) = self.resources.get(&uri) {
                return Err(RegistryError::DuplicateResource {
                    uri,
                    owner: entry.plugin.clone(),
                });
            }
            if pending_resources.contains_key(&uri) {
                return Err(RegistryError::DuplicateResource {
                    uri,
                    owner: name.clone(),
                });
            }
            pending_resources.insert(uri, registration);
        }

        plugin.initialize().map_err(|reason| RegistryError::InitializeFailed {
            plugin: name.clone(),
            reason,
        })?;

        for (tool_name, registration) in pending_tools {
            self.tools.insert(tool_name, ToolEntry {
                plugin: name.clone(),
                definition: registration.definition,
                handler: registration.handler,
            });
        }
        for (uri, registration) in pending_resources {
            self.resources.insert(uri, ResourceEntry {
                plugin: name.clone(),
                descriptor: registration.descriptor,
                content: registration.content,
            });
        }
        self.plugins.insert(name, plugin);
        Ok(())
    }

    /// Unregisters a plugin and removes exactly its entries.
    ///
    /// The plugin's `shutdown` hook runs after its entries are removed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no plugin has the name.
    pub fn unregister(&mut self, name: &str) -> Result<(), RegistryError> {
        let Some(plugin) = self.plugins.remove(name) else {
            return Err(RegistryError::NotFound(name.to_string()));
        };
        self.tools.retain(|_, entry| entry.plugin != name);
        self.resources.retain(|_, entry| entry.plugin != name);
        plugin.shutdown();
        Ok(())
    }

    /// Looks up a tool by name.
    #[must_use]
    pub fn tool(&self, name: &str) -> Option<&ToolEntry> {
        self.tools.get(name)
    }

    /// Looks up a resource by URI.
    #[must_use]
    pub fn resource(&self, uri: &str) -> Option<&ResourceEntry> {
        self.resources.get(uri)
    }

    /// Returns every tool definition, ordered by tool name.
    #[must_use]
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|entry| entry.definition.clone()).collect()
    }

    /// Returns every registered tool name, ordered.
    #[must_use]
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Returns every resource descriptor, ordered by URI.
    #[must_use]
    pub fn resource_descriptors(&self) -> Vec<ResourceDescriptor> {
        self.resources.values().map(|entry| entry.descriptor.clone()).collect()
    }

    /// Returns a snapshot of registered plugins, ordered by name.
    #[must_use]
    pub fn plugins(&self) -> Vec<PluginInfo> {
        self.plugins
            .iter()
            .map(|(name, plugin)| PluginInfo {
                name: name.clone(),
                description: plugin.description().to_string(),
                enabled: plugin.enabled(),
                tools: self
                    .tools
                    .iter()
                    .filter(|(_, entry)| &entry.plugin == name)
                    .map(|(tool, _)| tool.clone())
                    .collect(),
                resources: self
                    .resources
                    .iter()
                    .filter(|(_, entry)| &entry.plugin == name)
                    .map(|(uri, _)| uri.clone())
                    .collect(),
            })
            .collect()
    }
}
