// crates/aiact-plugins/src/builtins/risk.rs
// ============================================================================
// Module: Risk Plugin
// Description: Tools for risk classification and the prohibited-practice check.
// Purpose: Expose the aiact-core decision rules over the tool interface.
// Dependencies: aiact-core, serde_json
// ============================================================================

//! ## Overview
//! Wraps [`aiact_core::classify`] and [`aiact_core::check_prohibited_practices`]
//! as tools. Arguments deserialize into the core input records; omitted flags
//! default to `false`, so partial submissions are accepted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aiact_core::ProhibitedPracticeFlags;
use aiact_core::SystemProfile;
use aiact_core::check_prohibited_practices;
use aiact_core::classify;
use serde_json::Value;
use serde_json::json;

use crate::error::ToolError;
use crate::plugin::CompliancePlugin;
use crate::plugin::ToolDefinition;
use crate::plugin::ToolRegistration;

// ============================================================================
// SECTION: Plugin
// ============================================================================

/// Risk classification plugin.
pub struct RiskPlugin;

impl CompliancePlugin for RiskPlugin {
    fn name(&self) -> &str {
        "risk"
    }

    fn description(&self) -> &str {
        "Classifies AI systems into AI Act risk categories and checks Article 5 prohibitions"
    }

    fn tools(&self) -> Vec<ToolRegistration> {
        vec![
            ToolRegistration {
                definition: ToolDefinition {
                    name: "classify_ai_risk".to_string(),
                    description: "Classify an AI system into an EU AI Act risk category \
                                  (prohibited, high-risk, limited-risk, or minimal-risk)"
                        .to_string(),
                    input_schema: classify_schema(),
                },
                handler: Box::new(|arguments| {
                    let profile: SystemProfile = serde_json::from_value(arguments.clone())
                        .map_err(|err| ToolError::InvalidInput(err.to_string()))?;
                    serde_json::to_value(classify(&profile))
                        .map_err(|err| ToolError::Execution(err.to_string()))
                }),
            },
            ToolRegistration {
                definition: ToolDefinition {
                    name: "check_prohibited_practices".to_string(),
                    description: "Check an AI system against all eight Article 5 prohibited \
                                  practices and report every violation"
                        .to_string(),
                    input_schema: prohibited_schema(),
                },
                handler: Box::new(|arguments| {
                    let flags: ProhibitedPracticeFlags = serde_json::from_value(arguments.clone())
                        .map_err(|err| ToolError::InvalidInput(err.to_string()))?;
                    serde_json::to_value(check_prohibited_practices(&flags))
                        .map_err(|err| ToolError::Execution(err.to_string()))
                }),
            },
        ]
    }
}

// ============================================================================
// SECTION: Schemas
// ============================================================================

/// Input schema for `classify_ai_risk`.
fn classify_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "system_description": { "type": "string", "description": "Free-text description of the AI system" },
            "use_case": { "type": "string", "description": "Primary use case, e.g. employment, healthcare, chatbot" },
            "biometric_data": { "type": "boolean" },
            "critical_infrastructure": { "type": "boolean" },
            "education": { "type": "boolean" },
            "law_enforcement": { "type": "boolean" },
            "predicts_criminal_behavior": { "type": "boolean" },
            "social_scoring": { "type": "boolean" },
            "emotion_detection_workplace": { "type": "boolean" },
            "generates_content": { "type": "boolean" },
            "interacts_with_users": { "type": "boolean" }
        }
    })
}

/// Input schema for `check_prohibited_practices`.
fn prohibited_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "uses_subliminal_techniques": { "type": "boolean" },
            "exploits_vulnerabilities": { "type": "boolean" },
            "social_scoring": { "type": "boolean" },
            "predicts_crime_from_profiling": { "type": "boolean" },
            "scrapes_facial_images": { "type": "boolean" },
            "detects_emotions_in_workplace": { "type": "boolean" },
            "biometric_categorization_sensitive_attributes": { "type": "boolean" },
            "real_time_biometric_identification_public": { "type": "boolean" }
        }
    })
}
