// crates/aiact-plugins/src/loader.rs
// ============================================================================
// Module: Plugin Loader
// Description: Builtin manifest assembly and fault-isolated registration.
// Purpose: Load the builtin plugins, skipping disabled ones, isolating faults.
// Dependencies: crate::builtins, crate::registry
// ============================================================================

//! ## Overview
//! The manifest is a static list; there is no runtime discovery. Loading
//! registers each manifest entry in order, records failures without stopping,
//! and returns a report so the caller can surface partial loads.
//!
//! Invariants:
//! - One plugin's failure never prevents the others from loading.
//! - Disabled plugins are skipped before construction side effects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::builtins::DeepfakePlugin;
use crate::builtins::RiskPlugin;
use crate::builtins::RolesPlugin;
use crate::builtins::SecurityPlugin;
use crate::builtins::TransparencyPlugin;
use crate::builtins::WatermarkPlugin;
use crate::plugin::CompliancePlugin;
use crate::plugin::PluginContext;
use crate::registry::PluginRegistry;

// ============================================================================
// SECTION: Report Types
// ============================================================================

/// One plugin that failed to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFailure {
    /// Plugin name.
    pub plugin: String,
    /// Registration failure message.
    pub reason: String,
}

/// Outcome of loading the builtin manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Plugins registered successfully, in manifest order.
    pub loaded: Vec<String>,
    /// Plugins skipped because they are disabled.
    pub skipped: Vec<String>,
    /// Plugins that failed to register.
    pub failures: Vec<LoadFailure>,
}

// ============================================================================
// SECTION: Loader
// ============================================================================

/// Assembles the builtin plugin manifest in load order.
#[must_use]
pub fn builtin_manifest(context: &PluginContext) -> Vec<Arc<dyn CompliancePlugin>> {
    vec![
        Arc::new(RiskPlugin),
        Arc::new(RolesPlugin),
        Arc::new(TransparencyPlugin),
        Arc::new(WatermarkPlugin),
        Arc::new(DeepfakePlugin),
        Arc::new(SecurityPlugin::new(context)),
    ]
}

/// Loads the builtin manifest into the registry.
///
/// Disabled names are skipped; registration failures are recorded and the
/// loader continues with the next plugin.
pub fn load_builtin_plugins(
    registry: &mut PluginRegistry,
    context: &PluginContext,
    disabled: &[String],
) -> LoadReport {
    let mut report = LoadReport::default();
    for plugin in builtin_manifest(context) {
        let name = plugin.name().to_string();
        if disabled.iter().any(|entry| entry == &name) {
            report.skipped.push(name);
            continue;
        }
        match registry.register(plugin) {
            Ok(()) => report.loaded.push(name),
            Err(error) => report.failures.push(LoadFailure {
                plugin: name,
                reason: error.to_string(),
            }),
        }
    }
    report
}
