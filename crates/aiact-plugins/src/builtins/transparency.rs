// crates/aiact-plugins/src/builtins/transparency.rs
// ============================================================================
// Module: Transparency Plugin
// Description: Article 50 applicability tool and disclosure template lookup.
// Purpose: Serve transparency obligations and ready-made disclosure texts.
// Dependencies: crate::templates, serde_json
// ============================================================================

//! ## Overview
//! Two tools: `get_transparency_obligations` reports which Article 50
//! paragraphs apply to a described system, and `get_disclosure_template`
//! fetches a ready-made disclosure text by kind, language, and style.
//! Template misses come back as an error object in the result payload so the
//! caller can retry with one of the listed options.
//!
//! The plugin also serves the raw rule and template documents as resources.

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

/// Transparency obligations plugin.
pub struct TransparencyPlugin;

impl CompliancePlugin for TransparencyPlugin {
    fn name(&self) -> &str {
        "transparency"
    }

    fn description(&self) -> &str {
        "Maps systems to Article 50 transparency obligations and serves disclosure templates"
    }

    fn tools(&self) -> Vec<ToolRegistration> {
        vec![
            ToolRegistration {
                definition: ToolDefinition {
                    name: "get_transparency_obligations".to_string(),
                    description: "Report which Article 50 transparency obligations apply to the \
                                  described AI system"
                        .to_string(),
                    input_schema: obligations_schema(),
                },
                handler: Box::new(|arguments| Ok(obligations(arguments))),
            },
            ToolRegistration {
                definition: ToolDefinition {
                    name: "get_disclosure_template".to_string(),
                    description: "Fetch a ready-made disclosure text by kind (chatbot, \
                                  synthetic_content, emotion_recognition, deepfake), language, \
                                  and style (banner, detailed)"
                        .to_string(),
                    input_schema: template_schema(),
                },
                handler: Box::new(|arguments| disclosure(arguments)),
            },
        ]
    }

    fn resources(&self) -> Vec<ResourceRegistration> {
        vec![
            ResourceRegistration {
                descriptor: ResourceDescriptor {
                    uri: "aiact://rules/article50".to_string(),
                    name: "Article 50 transparency rules".to_string(),
                    description: "Applicability rules for Article 50 paragraphs (1)-(4)"
                        .to_string(),
                    mime_type: "application/json".to_string(),
                },
                content: templates::ARTICLE50_RULES.to_string(),
            },
            ResourceRegistration {
                descriptor: ResourceDescriptor {
                    uri: "aiact://templates/disclosures".to_string(),
                    name: "Disclosure templates".to_string(),
                    description: "Disclosure texts keyed by kind, language, and style".to_string(),
                    mime_type: "application/json".to_string(),
                },
                content: templates::DISCLOSURE_TEMPLATES.to_string(),
            },
        ]
    }
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Evaluates which Article 50 paragraphs apply to the described system.
fn obligations(arguments: &Value) -> Value {
    let flag = |name: &str| arguments.get(name).and_then(Value::as_bool).unwrap_or(false);
    let mut applicable = Vec::new();
    if flag("interacts_with_users") {
        applicable.push(json!({
            "paragraph": "50(1)",
            "obligation": "Inform natural persons that they are interacting with an AI system",
        }));
    }
    if flag("generates_content") {
        applicable.push(json!({
            "paragraph": "50(2)",
            "obligation": "Mark outputs as artificially generated in a machine-readable format",
        }));
    }
    if flag("emotion_recognition") || flag("biometric_categorization") {
        applicable.push(json!({
            "paragraph": "50(3)",
            "obligation": "Inform exposed natural persons of the operation of the system",
        }));
    }
    if flag("generates_deepfake") {
        applicable.push(json!({
            "paragraph": "50(4)",
            "obligation": "Disclose that the content has been artificially generated or manipulated",
        }));
    }
    json!({
        "applies": !applicable.is_empty(),
        "obligations": applicable,
        "deadline": "2026-08-02",
        "penalty": "Up to €15 million or 3% of global annual turnover",
    })
}

/// Fetches a disclosure template, surfacing misses as a recoverable payload.
fn disclosure(arguments: &Value) -> Result<Value, ToolError> {
    let field = |name: &str| {
        arguments
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidInput(format!("{name} must be a string")))
    };
    let kind = field("kind")?;
    let language = arguments.get("language").and_then(Value::as_str).unwrap_or("en");
    let style = arguments.get("style").and_then(Value::as_str).unwrap_or("banner");
    match templates::disclosure_template(kind, language, style) {
        Ok(text) => Ok(json!({
            "kind": kind,
            "language": language,
            "style": style,
            "text": text,
        })),
        Err(error) => Ok(template_miss(&error)),
    }
}

/// Converts a template miss into an error payload listing the valid options.
fn template_miss(error: &TemplateError) -> Value {
    let options = match error {
        TemplateError::UnknownKind { available, .. }
        | TemplateError::UnknownLanguage { available, .. }
        | TemplateError::UnknownStyle { available, .. } => available.clone(),
        TemplateError::Store(_) => Vec::new(),
    };
    json!({
        "error": error.to_string(),
        "valid_options": options,
    })
}

// ============================================================================
// SECTION: Schemas
// ============================================================================

/// Input schema for `get_transparency_obligations`.
fn obligations_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "interacts_with_users": { "type": "boolean" },
            "generates_content": { "type": "boolean" },
            "emotion_recognition": { "type": "boolean" },
            "biometric_categorization": { "type": "boolean" },
            "generates_deepfake": { "type": "boolean" }
        }
    })
}

/// Input schema for `get_disclosure_template`.
fn template_schema() -> Value {
    json!({
        "type": "object",
        "required": ["kind"],
        "properties": {
            "kind": { "type": "string", "description": "chatbot, synthetic_content, emotion_recognition, or deepfake" },
            "language": { "type": "string", "description": "en, fr, or de; defaults to en" },
            "style": { "type": "string", "description": "banner or detailed; defaults to banner" }
        }
    })
}
