// crates/aiact-plugins/src/builtins/roles.rs
// ============================================================================
// Module: Roles Plugin
// Description: Tool for determining AI Act roles of an organization.
// Purpose: Expose the aiact-core role resolver over the tool interface.
// Dependencies: aiact-core, serde_json
// ============================================================================

//! ## Overview
//! Wraps [`aiact_core::determine_roles`] as a tool. The result carries every
//! matched role with its own detail record; the first is the primary role.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aiact_core::OrganizationProfile;
use aiact_core::determine_roles;
use serde_json::Value;
use serde_json::json;

use crate::error::ToolError;
use crate::plugin::CompliancePlugin;
use crate::plugin::ToolDefinition;
use crate::plugin::ToolRegistration;

// ============================================================================
// SECTION: Plugin
// ============================================================================

/// Role determination plugin.
pub struct RolesPlugin;

impl CompliancePlugin for RolesPlugin {
    fn name(&self) -> &str {
        "roles"
    }

    fn description(&self) -> &str {
        "Determines which Article 3 roles (provider, deployer, importer, distributor, \
         authorized representative, product manufacturer) apply to an organization"
    }

    fn tools(&self) -> Vec<ToolRegistration> {
        vec![ToolRegistration {
            definition: ToolDefinition {
                name: "determine_aiact_role".to_string(),
                description: "Determine every EU AI Act role that applies to an organization, \
                              with per-role obligations, deadlines, and penalties"
                    .to_string(),
                input_schema: roles_schema(),
            },
            handler: Box::new(|arguments| {
                let profile: OrganizationProfile = serde_json::from_value(arguments.clone())
                    .map_err(|err| ToolError::InvalidInput(err.to_string()))?;
                serde_json::to_value(determine_roles(&profile))
                    .map_err(|err| ToolError::Execution(err.to_string()))
            }),
        }]
    }
}

// ============================================================================
// SECTION: Schemas
// ============================================================================

/// Input schema for `determine_aiact_role`.
fn roles_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "company_description": { "type": "string", "description": "Free-text description of the organization" },
            "company_location": { "type": "string", "description": "Country or region where the organization is based" },
            "develops_ai_system": { "type": "boolean" },
            "uses_ai_system": { "type": "boolean" },
            "sells_ai_system": { "type": "boolean" },
            "imports_to_eu": { "type": "boolean" },
            "distributes_in_eu": { "type": "boolean" },
            "integrates_ai_into_product": { "type": "boolean" },
            "represents_non_eu_provider": { "type": "boolean" },
            "under_own_name_or_trademark": { "type": "boolean" },
            "substantial_modification": { "type": "boolean" },
            "change_intended_purpose": { "type": "boolean" }
        }
    })
}
