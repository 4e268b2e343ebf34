// crates/aiact-plugins/src/builtins/security.rs
// ============================================================================
// Module: Security Plugin
// Description: Prompt-injection scanning tools backed by the scoring proxy.
// Purpose: Expose text and file-access scans over the tool interface.
// Dependencies: aiact-scan, serde_json
// ============================================================================

//! ## Overview
//! Two tools backed by the shared [`aiact_scan::ScanClient`]: `scan_prompt`
//! analyzes text for injection content and `check_file_access` scans a
//! file-access attempt for sensitive-path probing. Both inherit the client's
//! fail-soft behavior: failures surface as an `unverified` verdict in the
//! report, never as a tool error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use aiact_scan::ScanClient;
use aiact_scan::ScanRequest;
use serde_json::Value;
use serde_json::json;

use crate::error::ToolError;
use crate::plugin::CompliancePlugin;
use crate::plugin::PluginContext;
use crate::plugin::ToolDefinition;
use crate::plugin::ToolRegistration;

// ============================================================================
// SECTION: Plugin
// ============================================================================

/// Prompt-injection scanning plugin.
pub struct SecurityPlugin {
    /// Shared scoring proxy client.
    scan: Arc<ScanClient>,
}

impl SecurityPlugin {
    /// Creates the plugin over the shared scan client.
    #[must_use]
    pub fn new(context: &PluginContext) -> Self {
        Self {
            scan: Arc::clone(&context.scan),
        }
    }
}

impl CompliancePlugin for SecurityPlugin {
    fn name(&self) -> &str {
        "security"
    }

    fn description(&self) -> &str {
        "Scans prompts and file-access attempts for injection content via the scoring proxy"
    }

    fn tools(&self) -> Vec<ToolRegistration> {
        let scan_client = Arc::clone(&self.scan);
        let file_client = Arc::clone(&self.scan);
        vec![
            ToolRegistration {
                definition: ToolDefinition {
                    name: "scan_prompt".to_string(),
                    description: "Analyze text for prompt-injection content; reports safe, \
                                  flagged, or unverified with scores and risk band"
                        .to_string(),
                    input_schema: scan_schema(),
                },
                handler: Box::new(move |arguments| {
                    let request: ScanRequest = serde_json::from_value(arguments.clone())
                        .map_err(|err| ToolError::InvalidInput(err.to_string()))?;
                    serde_json::to_value(scan_client.analyze(&request))
                        .map_err(|err| ToolError::Execution(err.to_string()))
                }),
            },
            ToolRegistration {
                definition: ToolDefinition {
                    name: "check_file_access".to_string(),
                    description: "Scan a file-access attempt for sensitive-path probing"
                        .to_string(),
                    input_schema: file_access_schema(),
                },
                handler: Box::new(move |arguments| {
                    let path = require_str(arguments, "path")?;
                    let action = require_str(arguments, "action")?;
                    let threshold = arguments.get("threshold").and_then(Value::as_f64);
                    serde_json::to_value(file_client.check_file_access(path, action, threshold))
                        .map_err(|err| ToolError::Execution(err.to_string()))
                }),
            },
        ]
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Extracts a required string argument.
fn require_str<'a>(arguments: &'a Value, name: &str) -> Result<&'a str, ToolError> {
    arguments
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidInput(format!("{name} must be a string")))
}

// ============================================================================
// SECTION: Schemas
// ============================================================================

/// Input schema for `scan_prompt`.
fn scan_schema() -> Value {
    json!({
        "type": "object",
        "required": ["text"],
        "properties": {
            "text": { "type": "string", "description": "Text to analyze" },
            "threshold": { "type": "number", "description": "Flagging threshold, defaults to 0.65" },
            "tag": { "type": "string", "description": "Correlation tag echoed in the report" }
        }
    })
}

/// Input schema for `check_file_access`.
fn file_access_schema() -> Value {
    json!({
        "type": "object",
        "required": ["path", "action"],
        "properties": {
            "path": { "type": "string", "description": "File path the agent is accessing" },
            "action": { "type": "string", "description": "Action attempted, e.g. read or write" },
            "threshold": { "type": "number", "description": "Flagging threshold, defaults to 0.65" }
        }
    })
}
