// crates/aiact-plugins/src/builtins/deepfake.rs
// ============================================================================
// Module: Deepfake Plugin
// Description: Article 50(4) deepfake labeling tool and label resource.
// Purpose: Serve required label texts and placement guidance per content type.
// Dependencies: crate::templates, serde_json
// ============================================================================

//! ## Overview
//! `get_deepfake_label` returns the required disclosure label and placement
//! guidance for one content type (image, video, audio, text). Unknown types
//! come back as an error object listing the supported types.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use crate::error::TemplateError;
use crate::error::ToolError;
use crate::plugin::CompliancePlugin;
use crate::plugin::ResourceDescriptor;
use crate::plugin::ResourceRegistration;
use crate::plugin::ToolDefinition;
use crate::plugin::ToolRegistration;
use crate::templates;

// ============================================================================
// SECTION: Plugin
// ============================================================================

/// Deepfake labeling plugin.
pub struct DeepfakePlugin;

impl CompliancePlugin for DeepfakePlugin {
    fn name(&self) -> &str {
        "deepfake"
    }

    fn description(&self) -> &str {
        "Serves Article 50(4) deepfake disclosure labels and placement guidance"
    }

    fn tools(&self) -> Vec<ToolRegistration> {
        vec![ToolRegistration {
            definition: ToolDefinition {
                name: "get_deepfake_label".to_string(),
                description: "Fetch the required deepfake disclosure label and placement \
                              guidance for a content type (image, video, audio, text)"
                    .to_string(),
                input_schema: label_schema(),
            },
            handler: Box::new(|arguments| label(arguments)),
        }]
    }

    fn resources(&self) -> Vec<ResourceRegistration> {
        vec![ResourceRegistration {
            descriptor: ResourceDescriptor {
                uri: "aiact://labels/deepfake".to_string(),
                name: "Deepfake labels".to_string(),
                description: "Label texts and placement guidance keyed by content type"
                    .to_string(),
                mime_type: "application/json".to_string(),
            },
            content: templates::DEEPFAKE_LABELS.to_string(),
        }]
    }
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Looks up the label record, surfacing misses as a recoverable payload.
fn label(arguments: &Value) -> Result<Value, ToolError> {
    let content_type = arguments
        .get("content_type")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidInput("content_type must be a string".to_string()))?;
    match templates::deepfake_label(content_type) {
        Ok(record) => Ok(json!({
            "content_type": content_type,
            "legal_basis": "Article 50(4)",
            "label": record.get("label").cloned().unwrap_or(Value::Null),
            "placement": record.get("placement").cloned().unwrap_or(Value::Null),
        })),
        Err(TemplateError::UnknownKind { requested, available }) => Ok(json!({
            "error": format!("unknown content type {requested}"),
            "valid_options": available,
        })),
        Err(error) => Err(ToolError::Execution(error.to_string())),
    }
}

// ============================================================================
// SECTION: Schemas
// ============================================================================

/// Input schema for `get_deepfake_label`.
fn label_schema() -> Value {
    json!({
        "type": "object",
        "required": ["content_type"],
        "properties": {
            "content_type": { "type": "string", "description": "image, video, audio, or text" }
        }
    })
}
