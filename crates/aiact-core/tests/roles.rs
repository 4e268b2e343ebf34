//! Role resolver and residency tests for aiact-core.
// crates/aiact-core/tests/roles.rs
// =============================================================================
// Module: Role Resolver Tests
// Description: Validate predicate logic, role ordering, and residency matching.
// Purpose: Ensure multi-role outcomes stay in check order with correct detail.
// =============================================================================

#![allow(clippy::use_debug, reason = "Debug formatting in test failure messages is permitted.")]

use aiact_core::OrganizationProfile;
use aiact_core::Role;
use aiact_core::RoleDetermination;
use aiact_core::determine_roles;
use aiact_core::is_eu_location;

type TestResult = Result<(), String>;

fn org(location: &str) -> OrganizationProfile {
    OrganizationProfile {
        company_description: "test organization".to_string(),
        company_location: location.to_string(),
        ..OrganizationProfile::default()
    }
}

#[test]
fn provider_and_deployer_can_coexist_with_provider_primary() -> TestResult {
    let input = OrganizationProfile {
        develops_ai_system: true,
        uses_ai_system: true,
        ..org("Germany")
    };
    let outcome = determine_roles(&input);
    if outcome.roles() != vec![Role::Provider, Role::Deployer] {
        return Err(format!("unexpected role set {:?}", outcome.roles()));
    }
    if outcome.primary() != Some(Role::Provider) {
        return Err(format!("expected Provider primary, got {:?}", outcome.primary()));
    }
    Ok(())
}

#[test]
fn no_flags_yield_no_direct_role() -> TestResult {
    match determine_roles(&org("USA")) {
        RoleDetermination::NoDirectRole { assessment, recommendation } => {
            if assessment.is_empty() || recommendation.is_empty() {
                return Err("assessment and recommendation must be populated".to_string());
            }
            Ok(())
        }
        other => Err(format!("expected no direct role, got {other:?}")),
    }
}

#[test]
fn importer_requires_non_eu_base() -> TestResult {
    let mut input = OrganizationProfile {
        imports_to_eu: true,
        sells_ai_system: true,
        ..org("USA")
    };
    input.under_own_name_or_trademark = true;

    // Selling under own name also makes the organization a provider.
    let outcome = determine_roles(&input);
    if !outcome.roles().contains(&Role::Importer) {
        return Err(format!("non-EU importer expected, got {:?}", outcome.roles()));
    }

    input.company_location = "France".to_string();
    let outcome = determine_roles(&input);
    if outcome.roles().contains(&Role::Importer) {
        return Err("EU-based organization must not be an importer".to_string());
    }
    Ok(())
}

#[test]
fn distributor_excluded_when_also_provider() -> TestResult {
    let input = OrganizationProfile {
        develops_ai_system: true,
        sells_ai_system: true,
        distributes_in_eu: true,
        ..org("Spain")
    };
    let outcome = determine_roles(&input);
    if outcome.roles().contains(&Role::Distributor) {
        return Err("provider must not also be reported as distributor".to_string());
    }

    let input = OrganizationProfile {
        sells_ai_system: true,
        distributes_in_eu: true,
        ..org("Spain")
    };
    match determine_roles(&input).primary() {
        Some(Role::Distributor) => Ok(()),
        other => Err(format!("expected Distributor, got {other:?}")),
    }
}

#[test]
fn authorized_representative_requires_eu_base() -> TestResult {
    let mut input = OrganizationProfile {
        represents_non_eu_provider: true,
        ..org("Ireland")
    };
    match determine_roles(&input).primary() {
        Some(Role::AuthorizedRepresentative) => {}
        other => return Err(format!("expected authorized representative, got {other:?}")),
    }

    input.company_location = "Japan".to_string();
    match determine_roles(&input) {
        RoleDetermination::NoDirectRole { .. } => Ok(()),
        other => Err(format!("non-EU representative must not match, got {other:?}")),
    }
}

#[test]
fn product_manufacturer_requires_own_name() -> TestResult {
    let mut input = OrganizationProfile {
        integrates_ai_into_product: true,
        ..org("Italy")
    };
    match determine_roles(&input) {
        RoleDetermination::NoDirectRole { .. } => {}
        other => return Err(format!("integration without own name must not match, got {other:?}")),
    }

    input.under_own_name_or_trademark = true;
    match determine_roles(&input).primary() {
        Some(Role::ProductManufacturer) => Ok(()),
        other => Err(format!("expected product manufacturer, got {other:?}")),
    }
}

#[test]
fn provider_reason_joins_all_matched_predicates() -> TestResult {
    let input = OrganizationProfile {
        develops_ai_system: true,
        substantial_modification: true,
        ..org("Austria")
    };
    match determine_roles(&input) {
        RoleDetermination::Identified { assignments, is_eu_based } => {
            if !is_eu_based {
                return Err("Austria must count as EU-based".to_string());
            }
            let detail = &assignments
                .first()
                .ok_or_else(|| "missing provider assignment".to_string())?
                .detail;
            if detail.article != "Article 3(3)" {
                return Err(format!("unexpected article {}", detail.article));
            }
            if !detail.reason.contains(" and ") {
                return Err(format!("expected joined reason parts, got {}", detail.reason));
            }
            Ok(())
        }
        other => Err(format!("expected identified roles, got {other:?}")),
    }
}

#[test]
fn eu_location_matching_is_case_insensitive() -> TestResult {
    for location in ["Germany", "EU", "european union", " FRANCE ", "Dublin, Ireland"] {
        if !is_eu_location(location) {
            return Err(format!("expected {location} to match as EU"));
        }
    }
    for location in ["USA", "Japan", "United Kingdom", ""] {
        if is_eu_location(location) {
            return Err(format!("expected {location} to be non-EU"));
        }
    }
    Ok(())
}

#[test]
fn role_labels_are_stable() -> TestResult {
    let value = serde_json::to_value(Role::AuthorizedRepresentative)
        .map_err(|err| err.to_string())?;
    match value.as_str() {
        Some("AUTHORIZED REPRESENTATIVE") => Ok(()),
        other => Err(format!("unexpected label {other:?}")),
    }
}
