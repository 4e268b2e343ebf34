// crates/aiact-core/src/roles.rs
// ============================================================================
// Module: Role Resolver
// Description: Determines which Article 3 roles apply to an organization.
// Purpose: Implement the fixed-order, non-exclusive role predicates.
// Dependencies: crate::penalties, serde
// ============================================================================

//! ## Overview
//! Role determination is not mutually exclusive: an organization can be both a
//! provider and a deployer at once. Predicates run in a fixed order and each
//! matched role carries its own legal-reference, obligation, deadline, and
//! penalty detail, assembled independently with no cross-role deduplication.
//! The first matched role in check order is the primary role.
//!
//! Invariants:
//! - Check order is Provider, Deployer, Importer, Distributor, Authorized
//!   Representative, Product Manufacturer.
//! - EU residency is a case-insensitive membership test against a fixed label
//!   and country list, not a geo lookup.
//! - Zero matches yield the distinguished [`RoleDetermination::NoDirectRole`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::penalties::HIGH_RISK_DEADLINE;
use crate::penalties::PENALTY_TIER_TWO;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Labels naming the EU as a whole.
const EU_REGION_LABELS: &[&str] = &["eu", "european union"];

/// Member-state names recognized by the residency approximation.
const EU_COUNTRY_NAMES: &[&str] = &[
    "germany",
    "france",
    "spain",
    "italy",
    "netherlands",
    "belgium",
    "austria",
    "ireland",
    "portugal",
    "greece",
];

// ============================================================================
// SECTION: Input Record
// ============================================================================

/// Structured description of an organization's relationship to AI systems.
///
/// # Invariants
/// - Immutable per call; every flag defaults to `false` when omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationProfile {
    /// Free-text description of the organization.
    pub company_description: String,
    /// Country or region where the organization is based.
    pub company_location: String,
    /// Develops AI systems or commissions their development.
    pub develops_ai_system: bool,
    /// Uses AI systems in its operations.
    pub uses_ai_system: bool,
    /// Sells or offers AI systems.
    pub sells_ai_system: bool,
    /// Brings AI systems from outside the EU into the EU market.
    pub imports_to_eu: bool,
    /// Distributes or resells AI systems in the EU.
    pub distributes_in_eu: bool,
    /// Integrates AI into physical products.
    pub integrates_ai_into_product: bool,
    /// Represents a non-EU AI provider in the EU.
    pub represents_non_eu_provider: bool,
    /// AI systems bear the organization's name or trademark.
    pub under_own_name_or_trademark: bool,
    /// Substantially modifies existing AI systems.
    pub substantial_modification: bool,
    /// Changes the intended purpose of AI systems.
    pub change_intended_purpose: bool,
}

// ============================================================================
// SECTION: Role Types
// ============================================================================

/// Article 3 roles an organization can hold.
///
/// # Invariants
/// - Variant order matches predicate check order.
/// - Serialized labels are stable for contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Develops or places an AI system on the market under own name.
    #[serde(rename = "PROVIDER")]
    Provider,
    /// Uses an AI system under its authority.
    #[serde(rename = "DEPLOYER")]
    Deployer,
    /// Places a non-EU system on the EU market.
    #[serde(rename = "IMPORTER")]
    Importer,
    /// Makes a system available without being provider or importer.
    #[serde(rename = "DISTRIBUTOR")]
    Distributor,
    /// EU-based mandate holder for a non-EU provider.
    #[serde(rename = "AUTHORIZED REPRESENTATIVE")]
    AuthorizedRepresentative,
    /// Integrates AI into a product sold under own name.
    #[serde(rename = "PRODUCT MANUFACTURER")]
    ProductManufacturer,
}

impl Role {
    /// Returns the stable display label for the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provider => "PROVIDER",
            Self::Deployer => "DEPLOYER",
            Self::Importer => "IMPORTER",
            Self::Distributor => "DISTRIBUTOR",
            Self::AuthorizedRepresentative => "AUTHORIZED REPRESENTATIVE",
            Self::ProductManufacturer => "PRODUCT MANUFACTURER",
        }
    }
}

/// Detail record attached to each matched role.
///
/// # Invariants
/// - Assembled independently per role; obligations are not deduplicated
///   across roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDetail {
    /// Legal basis reference.
    pub article: String,
    /// Statutory definition of the role.
    pub definition: String,
    /// Why the predicate matched this organization.
    pub reason: String,
    /// Key obligations attached to the role.
    pub key_obligations: Vec<String>,
    /// Compliance deadline.
    pub deadline: String,
    /// Penalty text for non-compliance.
    pub penalties: String,
}

/// A matched role together with its detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// The matched role.
    pub role: Role,
    /// Detail record for the role.
    pub detail: RoleDetail,
}

/// Outcome of role determination.
///
/// # Invariants
/// - `Identified.assignments` is non-empty and ordered by check order; the
///   first entry is the primary role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RoleDetermination {
    /// No predicate matched; generic guidance applies.
    NoDirectRole {
        /// Assessment summary for the caller.
        assessment: String,
        /// Suggested follow-up.
        recommendation: String,
    },
    /// One or more roles matched.
    Identified {
        /// Whether the organization is EU-based per the residency test.
        is_eu_based: bool,
        /// Matched roles in check order; first is primary.
        assignments: Vec<RoleAssignment>,
    },
}

impl RoleDetermination {
    /// Returns the primary role when any role matched.
    #[must_use]
    pub fn primary(&self) -> Option<Role> {
        match self {
            Self::NoDirectRole { .. } => None,
            Self::Identified { assignments, .. } => {
                assignments.first().map(|assignment| assignment.role)
            }
        }
    }

    /// Returns the matched roles in check order.
    #[must_use]
    pub fn roles(&self) -> Vec<Role> {
        match self {
            Self::NoDirectRole { .. } => Vec::new(),
            Self::Identified { assignments, .. } => {
                assignments.iter().map(|assignment| assignment.role).collect()
            }
        }
    }
}

// ============================================================================
// SECTION: Residency Test
// ============================================================================

/// Returns true when the location string names the EU or a listed member state.
///
/// This is a deliberate approximation over a fixed name list, not a geo
/// lookup; unlisted member states are treated as non-EU.
#[must_use]
pub fn is_eu_location(location: &str) -> bool {
    let normalized = location.trim().to_ascii_lowercase();
    EU_REGION_LABELS.contains(&normalized.as_str())
        || EU_COUNTRY_NAMES.iter().any(|country| normalized.contains(country))
}

// ============================================================================
// SECTION: Role Determination
// ============================================================================

/// Determines every Article 3 role that applies to the organization.
///
/// Deterministic and total. Predicates run independently in fixed order, so
/// the result can carry multiple roles; the first is primary.
#[must_use]
pub fn determine_roles(profile: &OrganizationProfile) -> RoleDetermination {
    let is_eu_based = is_eu_location(&profile.company_location);
    let mut assignments = Vec::new();

    let is_provider = profile.develops_ai_system
        || (profile.sells_ai_system && profile.under_own_name_or_trademark)
        || profile.substantial_modification
        || profile.change_intended_purpose;
    if is_provider {
        assignments.push(RoleAssignment {
            role: Role::Provider,
            detail: provider_detail(profile),
        });
    }

    if profile.uses_ai_system {
        assignments.push(RoleAssignment {
            role: Role::Deployer,
            detail: deployer_detail(),
        });
    }

    let is_importer = !is_eu_based
        && profile.imports_to_eu
        && (profile.sells_ai_system || profile.distributes_in_eu)
        && profile.under_own_name_or_trademark;
    if is_importer {
        assignments.push(RoleAssignment {
            role: Role::Importer,
            detail: importer_detail(&profile.company_location),
        });
    }

    if profile.distributes_in_eu && !is_provider && !is_importer && profile.sells_ai_system {
        assignments.push(RoleAssignment {
            role: Role::Distributor,
            detail: distributor_detail(),
        });
    }

    if is_eu_based && profile.represents_non_eu_provider {
        assignments.push(RoleAssignment {
            role: Role::AuthorizedRepresentative,
            detail: authorized_representative_detail(&profile.company_location),
        });
    }

    if profile.integrates_ai_into_product && profile.under_own_name_or_trademark {
        assignments.push(RoleAssignment {
            role: Role::ProductManufacturer,
            detail: product_manufacturer_detail(),
        });
    }

    if assignments.is_empty() {
        return RoleDetermination::NoDirectRole {
            assessment: "Based on the provided information, the organization may not have direct \
                         AI Act obligations"
                .to_string(),
            recommendation: "If the organization interacts with AI systems in any way, review \
                             the inputs again; organizations that use AI systems are deployers"
                .to_string(),
        };
    }

    RoleDetermination::Identified {
        is_eu_based,
        assignments,
    }
}

// ============================================================================
// SECTION: Detail Builders
// ============================================================================

/// Builds the provider detail, including the matched-predicate reason parts.
fn provider_detail(profile: &OrganizationProfile) -> RoleDetail {
    let mut reason_parts = Vec::new();
    if profile.develops_ai_system {
        reason_parts.push("develops AI systems");
    }
    if profile.sells_ai_system && profile.under_own_name_or_trademark {
        reason_parts.push("places AI on the market under own name or trademark");
    }
    if profile.substantial_modification {
        reason_parts.push("substantially modifies AI systems");
    }
    if profile.change_intended_purpose {
        reason_parts.push("changes the intended purpose of AI systems");
    }
    RoleDetail {
        article: "Article 3(3)".to_string(),
        definition: "Develops the AI system or has it developed, and places it on the market or \
                     puts it into service under own name or trademark"
            .to_string(),
        reason: format!("The organization {}", reason_parts.join(" and ")),
        key_obligations: vec![
            "Establish risk management system (Article 9)".to_string(),
            "Data governance and quality (Article 10)".to_string(),
            "Technical documentation (Article 11)".to_string(),
            "Automatic logging (Article 12)".to_string(),
            "Design for human oversight (Article 14)".to_string(),
            "Accuracy, robustness, cybersecurity (Article 15)".to_string(),
            "Quality management system (Article 17)".to_string(),
            "Conformity assessment (Article 43)".to_string(),
            "CE marking (Article 48)".to_string(),
            "EU database registration (Article 49)".to_string(),
        ],
        deadline: format!("{HIGH_RISK_DEADLINE} (for high-risk systems)"),
        penalties: PENALTY_TIER_TWO.to_string(),
    }
}

/// Builds the deployer detail record.
fn deployer_detail() -> RoleDetail {
    RoleDetail {
        article: "Article 3(4)".to_string(),
        definition: "Uses an AI system under their authority, except for personal \
                     non-professional activity"
            .to_string(),
        reason: "The organization uses AI systems in its operations".to_string(),
        key_obligations: vec![
            "Use AI according to instructions (Article 26(1))".to_string(),
            "Ensure human oversight (Article 26(2))".to_string(),
            "Monitor AI system operation (Article 26(3))".to_string(),
            "Report serious incidents (Article 26(4))".to_string(),
            "Keep logs generated by the AI system (Article 26(5))".to_string(),
            "Ensure input data quality (Article 26(6))".to_string(),
            "Inform workers about AI monitoring systems (Article 26(7))".to_string(),
            "Conduct fundamental rights impact assessment (Article 27)".to_string(),
        ],
        deadline: format!("{HIGH_RISK_DEADLINE} (for high-risk systems)"),
        penalties: PENALTY_TIER_TWO.to_string(),
    }
}

/// Builds the importer detail record.
fn importer_detail(location: &str) -> RoleDetail {
    RoleDetail {
        article: "Article 3(5)".to_string(),
        definition: "Places on the market an AI system that bears the name or trademark of a \
                     person established outside the EU"
            .to_string(),
        reason: format!("The organization is based in {location} and imports AI systems to the \
                         EU market"),
        key_obligations: vec![
            "Verify provider's conformity assessment (Article 23(1))".to_string(),
            "Verify CE marking and documentation (Article 23(2))".to_string(),
            "Ensure registration in EU database (Article 23(3))".to_string(),
            "Keep copy of technical documentation (Article 23(4))".to_string(),
            "Provide authorities with documentation (Article 23(5))".to_string(),
            "Ensure storage/transport does not affect compliance (Article 23(6))".to_string(),
            "Appoint authorized representative in the EU (Article 22)".to_string(),
        ],
        deadline: HIGH_RISK_DEADLINE.to_string(),
        penalties: PENALTY_TIER_TWO.to_string(),
    }
}

/// Builds the distributor detail record.
fn distributor_detail() -> RoleDetail {
    RoleDetail {
        article: "Article 3(6)".to_string(),
        definition: "Makes an AI system available on the market without being the provider or \
                     importer"
            .to_string(),
        reason: "The organization distributes AI systems in the EU market".to_string(),
        key_obligations: vec![
            "Verify CE marking present (Article 24(1))".to_string(),
            "Verify required documentation provided (Article 24(2))".to_string(),
            "Verify provider/importer obligations met (Article 24(3))".to_string(),
            "Inform provider/importer of non-compliance (Article 24(4))".to_string(),
            "Cooperate with authorities (Article 24(5))".to_string(),
        ],
        deadline: HIGH_RISK_DEADLINE.to_string(),
        penalties: PENALTY_TIER_TWO.to_string(),
    }
}

/// Builds the authorized representative detail record.
fn authorized_representative_detail(location: &str) -> RoleDetail {
    RoleDetail {
        article: "Article 3(7)".to_string(),
        definition: "Natural or legal person located in the EU who has received a written \
                     mandate from a provider outside the EU"
            .to_string(),
        reason: format!("The organization is based in {location} (EU) and represents a non-EU AI \
                         provider"),
        key_obligations: vec![
            "Perform tasks specified in the mandate (Article 22(1))".to_string(),
            "Provide technical documentation to authorities (Article 22(2))".to_string(),
            "Cooperate with authorities (Article 22(3))".to_string(),
            "Terminate the mandate if the provider is non-compliant (Article 22(4))".to_string(),
        ],
        deadline: HIGH_RISK_DEADLINE.to_string(),
        penalties: "Provider's penalties may apply".to_string(),
    }
}

/// Builds the product manufacturer detail record.
fn product_manufacturer_detail() -> RoleDetail {
    RoleDetail {
        article: "Article 3(8) + Article 25".to_string(),
        definition: "Manufactures a product and integrates an AI system into it, where the AI is \
                     a safety component or the product itself"
            .to_string(),
        reason: "The organization integrates AI systems into physical products under its own \
                 name or trademark"
            .to_string(),
        key_obligations: vec![
            "Assume provider obligations for the AI component (Article 25(1))".to_string(),
            "Ensure the AI system complies with requirements (Article 25(2))".to_string(),
            "Affix own name or trademark to the product (Article 25(3))".to_string(),
            "Follow relevant product safety legislation".to_string(),
            "Conduct conformity assessment for the AI component".to_string(),
        ],
        deadline: HIGH_RISK_DEADLINE.to_string(),
        penalties: PENALTY_TIER_TWO.to_string(),
    }
}
