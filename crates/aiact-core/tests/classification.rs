//! Risk classifier precedence and totality tests for aiact-core.
// crates/aiact-core/tests/classification.rs
// =============================================================================
// Module: Risk Classifier Tests
// Description: Validate classification precedence, collection, and defaults.
// Purpose: Ensure the first-match-wins ordering and fixed references hold.
// =============================================================================

#![allow(clippy::use_debug, reason = "Debug formatting in test failure messages is permitted.")]

use aiact_core::RiskClassification;
use aiact_core::SystemProfile;
use aiact_core::classify;

type TestResult = Result<(), String>;

fn profile(use_case: &str) -> SystemProfile {
    SystemProfile {
        system_description: "test system".to_string(),
        use_case: use_case.to_string(),
        ..SystemProfile::default()
    }
}

#[test]
fn social_scoring_dominates_all_other_flags() -> TestResult {
    let input = SystemProfile {
        social_scoring: true,
        biometric_data: true,
        education: true,
        law_enforcement: true,
        critical_infrastructure: true,
        generates_content: true,
        interacts_with_users: true,
        ..profile("employment")
    };
    match classify(&input) {
        RiskClassification::Prohibited { article, .. } => {
            if article == "Article 5(1)(c)" {
                Ok(())
            } else {
                Err(format!("expected Article 5(1)(c), got {article}"))
            }
        }
        other => Err(format!("expected prohibited, got {other:?}")),
    }
}

#[test]
fn prohibited_checks_follow_fixed_order() -> TestResult {
    let input = SystemProfile {
        emotion_detection_workplace: true,
        predicts_criminal_behavior: true,
        ..profile("chatbot")
    };
    match classify(&input) {
        RiskClassification::Prohibited { article, exception, .. } => {
            if article != "Article 5(1)(f)" {
                return Err(format!("expected Article 5(1)(f) first, got {article}"));
            }
            if exception.is_none() {
                return Err("emotion recognition must carry the medical/safety exception"
                    .to_string());
            }
            Ok(())
        }
        other => Err(format!("expected prohibited, got {other:?}")),
    }
}

#[test]
fn employment_use_case_is_high_risk_end_to_end() -> TestResult {
    match classify(&profile("employment")) {
        RiskClassification::HighRisk { article, annex_reference, deadline, obligations, .. } => {
            if article != "Article 6(2)" {
                return Err(format!("unexpected article {article}"));
            }
            if annex_reference != "Annex III point 4(a)" {
                return Err(format!("unexpected annex reference {annex_reference}"));
            }
            if deadline != "2027-08-02" {
                return Err(format!("unexpected deadline {deadline}"));
            }
            if obligations.is_empty() {
                return Err("high-risk obligations must not be empty".to_string());
            }
            Ok(())
        }
        other => Err(format!("expected high-risk, got {other:?}")),
    }
}

#[test]
fn use_case_matching_is_case_insensitive() -> TestResult {
    for use_case in ["HIRING", "Hr", "Recruitment", " employment "] {
        match classify(&profile(use_case)) {
            RiskClassification::HighRisk { .. } => {}
            other => return Err(format!("expected high-risk for {use_case}, got {other:?}")),
        }
    }
    match classify(&profile("employments")) {
        RiskClassification::MinimalRisk { .. } => Ok(()),
        other => Err(format!("no fuzzy matching expected, got {other:?}")),
    }
}

#[test]
fn high_risk_collects_all_factors_but_first_is_primary() -> TestResult {
    let input = SystemProfile {
        biometric_data: true,
        law_enforcement: true,
        ..profile("employment")
    };
    match classify(&input) {
        RiskClassification::HighRisk { reason, all_factors, .. } => {
            if all_factors.len() != 3 {
                return Err(format!("expected 3 factors, got {}", all_factors.len()));
            }
            if reason != "Biometric identification or categorization" {
                return Err(format!("biometric factor must be primary, got {reason}"));
            }
            if all_factors.first() != Some(&reason) {
                return Err("primary reason must be the first collected factor".to_string());
            }
            Ok(())
        }
        other => Err(format!("expected high-risk, got {other:?}")),
    }
}

#[test]
fn limited_risk_collects_one_obligation_per_flag() -> TestResult {
    let input = SystemProfile {
        interacts_with_users: true,
        generates_content: true,
        ..profile("chatbot")
    };
    match classify(&input) {
        RiskClassification::LimitedRisk { reasons, obligations, deadline, .. } => {
            if reasons.len() != 2 || obligations.len() != 2 {
                return Err(format!(
                    "expected 2 reasons and 2 obligations, got {} and {}",
                    reasons.len(),
                    obligations.len()
                ));
            }
            if deadline != "2026-08-02" {
                return Err(format!("unexpected deadline {deadline}"));
            }
            Ok(())
        }
        other => Err(format!("expected limited-risk, got {other:?}")),
    }
}

#[test]
fn all_flags_clear_yields_minimal_risk() -> TestResult {
    match classify(&profile("weather forecasting")) {
        RiskClassification::MinimalRisk { obligations } => {
            if obligations.is_empty() {
                return Err("minimal-risk should suggest voluntary measures".to_string());
            }
            Ok(())
        }
        other => Err(format!("expected minimal-risk, got {other:?}")),
    }
}

#[test]
fn classification_is_pure() -> TestResult {
    let input = SystemProfile {
        biometric_data: true,
        ..profile("screening")
    };
    if classify(&input) == classify(&input) {
        Ok(())
    } else {
        Err("classify must return identical output for identical input".to_string())
    }
}

#[test]
fn risk_level_tags_are_stable() -> TestResult {
    let value = serde_json::to_value(classify(&profile("employment")))
        .map_err(|err| err.to_string())?;
    match value.get("risk_level").and_then(serde_json::Value::as_str) {
        Some("HIGH-RISK") => Ok(()),
        other => Err(format!("expected HIGH-RISK tag, got {other:?}")),
    }
}
