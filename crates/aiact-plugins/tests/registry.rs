// crates/aiact-plugins/tests/registry.rs
// ============================================================================
// Module: Plugin Registry Tests
// Description: Validate uniqueness enforcement, atomicity, and unregistration.
// Purpose: Ensure failed registrations leave every table untouched.
// ============================================================================

//! ## Overview
//! Invariant tests for the plugin registry: duplicate names, tools, and
//! resources abort atomically, initialize failures leave no trace, and
//! unregistration removes exactly the owning plugin's entries.

#![allow(clippy::use_debug, reason = "Debug formatting in test failure messages is permitted.")]

use std::sync::Arc;

use aiact_plugins::CompliancePlugin;
use aiact_plugins::PluginRegistry;
use aiact_plugins::RegistryError;
use aiact_plugins::ResourceDescriptor;
use aiact_plugins::ResourceRegistration;
use aiact_plugins::ToolDefinition;
use aiact_plugins::ToolRegistration;
use serde_json::json;

type TestResult = Result<(), String>;

struct TestPlugin {
    name: String,
    tool_names: Vec<String>,
    resource_uris: Vec<String>,
    fail_initialize: bool,
}

impl TestPlugin {
    fn new(name: &str, tool_names: &[&str], resource_uris: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            tool_names: tool_names.iter().map(ToString::to_string).collect(),
            resource_uris: resource_uris.iter().map(ToString::to_string).collect(),
            fail_initialize: false,
        })
    }

    fn failing(name: &str, tool_names: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            tool_names: tool_names.iter().map(ToString::to_string).collect(),
            resource_uris: Vec::new(),
            fail_initialize: true,
        })
    }
}

impl CompliancePlugin for TestPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "test plugin"
    }

    fn tools(&self) -> Vec<ToolRegistration> {
        self.tool_names
            .iter()
            .map(|tool_name| ToolRegistration {
                definition: ToolDefinition {
                    name: tool_name.clone(),
                    description: "test tool".to_string(),
                    input_schema: json!({"type": "object"}),
                },
                handler: Box::new(|_| Ok(json!({"ok": true}))),
            })
            .collect()
    }

    fn resources(&self) -> Vec<ResourceRegistration> {
        self.resource_uris
            .iter()
            .map(|uri| ResourceRegistration {
                descriptor: ResourceDescriptor {
                    uri: uri.clone(),
                    name: "test resource".to_string(),
                    description: "test resource".to_string(),
                    mime_type: "application/json".to_string(),
                },
                content: "{}".to_string(),
            })
            .collect()
    }

    fn initialize(&self) -> Result<(), String> {
        if self.fail_initialize {
            Err("refusing to start".to_string())
        } else {
            Ok(())
        }
    }
}

#[test]
fn duplicate_plugin_name_is_rejected() -> TestResult {
    let mut registry = PluginRegistry::new();
    registry
        .register(TestPlugin::new("alpha", &["tool_a"], &[]))
        .map_err(|err| err.to_string())?;
    match registry.register(TestPlugin::new("alpha", &["tool_b"], &[])) {
        Err(RegistryError::DuplicateName(name)) if name == "alpha" => {}
        other => return Err(format!("expected duplicate name error, got {other:?}")),
    }
    if registry.tool("tool_b").is_some() {
        return Err("rejected plugin must not leave tool entries".to_string());
    }
    Ok(())
}

#[test]
fn duplicate_tool_aborts_without_mutation() -> TestResult {
    let mut registry = PluginRegistry::new();
    registry
        .register(TestPlugin::new("alpha", &["shared_tool"], &[]))
        .map_err(|err| err.to_string())?;

    match registry.register(TestPlugin::new("beta", &["fresh_tool", "shared_tool"], &[
        "aiact://test/beta",
    ])) {
        Err(RegistryError::DuplicateTool { tool, owner }) => {
            if tool != "shared_tool" || owner != "alpha" {
                return Err(format!("unexpected conflict detail {tool}/{owner}"));
            }
        }
        other => return Err(format!("expected duplicate tool error, got {other:?}")),
    }

    if registry.tool("fresh_tool").is_some() {
        return Err("failed registration must not commit any tool".to_string());
    }
    if registry.resource("aiact://test/beta").is_some() {
        return Err("failed registration must not commit any resource".to_string());
    }
    if registry.plugins().len() != 1 {
        return Err("failed registration must not add the plugin".to_string());
    }
    Ok(())
}

#[test]
fn duplicate_resource_aborts_without_mutation() -> TestResult {
    let mut registry = PluginRegistry::new();
    registry
        .register(TestPlugin::new("alpha", &[], &["aiact://test/shared"]))
        .map_err(|err| err.to_string())?;
    match registry.register(TestPlugin::new("beta", &["tool_b"], &["aiact://test/shared"])) {
        Err(RegistryError::DuplicateResource { uri, owner }) => {
            if uri != "aiact://test/shared" || owner != "alpha" {
                return Err(format!("unexpected conflict detail {uri}/{owner}"));
            }
        }
        other => return Err(format!("expected duplicate resource error, got {other:?}")),
    }
    if registry.tool("tool_b").is_some() {
        return Err("failed registration must not commit any tool".to_string());
    }
    Ok(())
}

#[test]
fn initialize_failure_leaves_registry_unchanged() -> TestResult {
    let mut registry = PluginRegistry::new();
    match registry.register(TestPlugin::failing("gamma", &["gamma_tool"])) {
        Err(RegistryError::InitializeFailed { plugin, reason }) => {
            if plugin != "gamma" || !reason.contains("refusing") {
                return Err(format!("unexpected failure detail {plugin}/{reason}"));
            }
        }
        other => return Err(format!("expected initialize failure, got {other:?}")),
    }
    if !registry.plugins().is_empty() || registry.tool("gamma_tool").is_some() {
        return Err("initialize failure must not mutate the registry".to_string());
    }
    Ok(())
}

#[test]
fn unregister_removes_only_that_plugins_entries() -> TestResult {
    let mut registry = PluginRegistry::new();
    registry
        .register(TestPlugin::new("alpha", &["tool_a"], &["aiact://test/a"]))
        .map_err(|err| err.to_string())?;
    registry
        .register(TestPlugin::new("beta", &["tool_b"], &["aiact://test/b"]))
        .map_err(|err| err.to_string())?;

    registry.unregister("alpha").map_err(|err| err.to_string())?;

    if registry.tool("tool_a").is_some() || registry.resource("aiact://test/a").is_some() {
        return Err("unregistered plugin entries must be gone".to_string());
    }
    if registry.tool("tool_b").is_none() || registry.resource("aiact://test/b").is_none() {
        return Err("other plugins must keep their entries".to_string());
    }
    match registry.unregister("alpha") {
        Err(RegistryError::NotFound(name)) if name == "alpha" => Ok(()),
        other => Err(format!("expected not-found error, got {other:?}")),
    }
}

#[test]
fn plugin_snapshot_lists_names_and_uris() -> TestResult {
    let mut registry = PluginRegistry::new();
    registry
        .register(TestPlugin::new("alpha", &["tool_a", "tool_b"], &["aiact://test/a"]))
        .map_err(|err| err.to_string())?;

    let plugins = registry.plugins();
    let info = plugins.first().ok_or("snapshot must contain the plugin")?;
    if info.name != "alpha" || !info.enabled {
        return Err(format!("unexpected snapshot header {}/{}", info.name, info.enabled));
    }
    if info.tools != ["tool_a", "tool_b"] {
        return Err(format!("unexpected tool names {:?}", info.tools));
    }
    if info.resources != ["aiact://test/a"] {
        return Err(format!("unexpected resource uris {:?}", info.resources));
    }
    Ok(())
}

#[test]
fn freed_names_are_reusable_after_unregister() -> TestResult {
    let mut registry = PluginRegistry::new();
    registry
        .register(TestPlugin::new("alpha", &["tool_a"], &[]))
        .map_err(|err| err.to_string())?;
    registry.unregister("alpha").map_err(|err| err.to_string())?;
    registry
        .register(TestPlugin::new("alpha", &["tool_a"], &[]))
        .map_err(|err| err.to_string())?;
    if registry.tool("tool_a").is_none() {
        return Err("re-registered tool must resolve".to_string());
    }
    Ok(())
}
