// crates/aiact-core/src/classify.rs
// ============================================================================
// Module: Risk Classifier
// Description: Maps an AI system profile to an AI Act risk category.
// Purpose: Implement the Article 5 / 6 / 50 classification decision rules.
// Dependencies: crate::penalties, serde
// ============================================================================

//! ## Overview
//! The classifier is a deterministic, total function from a [`SystemProfile`]
//! to exactly one [`RiskClassification`] variant. Checks run in fixed
//! precedence order and the first match is terminal: Article 5 prohibitions,
//! then Article 6 / Annex III high-risk conditions, then Article 50
//! limited-risk conditions, then the minimal-risk default.
//!
//! Invariants:
//! - Prohibited checks dominate: any prohibited flag yields
//!   [`RiskClassification::Prohibited`] regardless of other fields.
//! - High-risk classification records every matching factor but reports the
//!   first match as the primary legal reference.
//! - Use-case matching is a case-insensitive membership test against a fixed
//!   employment term set; no fuzzy matching.
//!
//! The classifier intentionally checks only three of the eight Article 5
//! flags; the full set lives in [`crate::prohibited`]. The two surfaces are
//! kept separate on purpose (see `DESIGN.md`).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::penalties::HIGH_RISK_DEADLINE;
use crate::penalties::PENALTY_TIER_ONE;
use crate::penalties::PENALTY_TIER_TWO;
use crate::penalties::TRANSPARENCY_DEADLINE;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Use-case terms that classify as employment-related high-risk (Annex III 4(a)).
const EMPLOYMENT_USE_CASES: &[&str] = &["employment", "hiring", "hr", "recruitment"];

/// Fixed obligation list attached to every high-risk classification.
const HIGH_RISK_OBLIGATIONS: &[&str] = &[
    "Risk management system (Article 9)",
    "Data governance and management (Article 10)",
    "Technical documentation (Article 11)",
    "Record-keeping/logging (Article 12)",
    "Transparency and information to users (Article 13)",
    "Human oversight (Article 14)",
    "Accuracy, robustness, cybersecurity (Article 15)",
    "Quality management system (Article 17)",
    "Conformity assessment (Article 43)",
    "Registration in EU database (Article 49)",
    "Post-market monitoring (Article 72)",
];

/// Voluntary obligations reported for minimal-risk systems.
const MINIMAL_RISK_OBLIGATIONS: &[&str] =
    &["Voluntary codes of conduct (Article 95)", "General transparency best practices"];

// ============================================================================
// SECTION: Input Record
// ============================================================================

/// Structured description of an AI system submitted for classification.
///
/// # Invariants
/// - Immutable per call; carries no identity beyond the call itself.
/// - Every flag defaults to `false` when omitted from serialized input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemProfile {
    /// Free-text description of the AI system.
    pub system_description: String,
    /// Primary use case (for example "employment", "healthcare", "chatbot").
    pub use_case: String,
    /// Uses biometric identification or categorization.
    pub biometric_data: bool,
    /// Used in critical infrastructure.
    pub critical_infrastructure: bool,
    /// Used in education or vocational training.
    pub education: bool,
    /// Used for law enforcement.
    pub law_enforcement: bool,
    /// Predicts criminal behavior from profiling.
    pub predicts_criminal_behavior: bool,
    /// Performs social scoring.
    pub social_scoring: bool,
    /// Detects emotions in workplace or education settings.
    pub emotion_detection_workplace: bool,
    /// Generates synthetic content.
    pub generates_content: bool,
    /// Interacts with natural persons.
    pub interacts_with_users: bool,
}

// ============================================================================
// SECTION: Classification Result
// ============================================================================

/// Risk classification outcome; exactly one variant per call, chosen once.
///
/// # Invariants
/// - Variant tags are stable for serialization and contract matching.
/// - The variant is terminal; no further refinement occurs after selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "risk_level")]
pub enum RiskClassification {
    /// Article 5 prohibited practice; deployment must stop.
    #[serde(rename = "PROHIBITED")]
    Prohibited {
        /// Specific Article 5 point triggered.
        article: String,
        /// Reason the practice is prohibited.
        reason: String,
        /// Fixed maximum penalty text.
        penalty: String,
        /// Narrow statutory exception, when one exists.
        #[serde(skip_serializing_if = "Option::is_none")]
        exception: Option<String>,
    },
    /// Article 6 / Annex III high-risk system.
    #[serde(rename = "HIGH-RISK")]
    HighRisk {
        /// Primary legal reference (first matching factor).
        article: String,
        /// Annex III point for the primary factor.
        annex_reference: String,
        /// Reason text for the primary factor.
        reason: String,
        /// Every matching high-risk factor, in check order.
        all_factors: Vec<String>,
        /// Fixed high-risk obligation list.
        obligations: Vec<String>,
        /// Compliance deadline.
        deadline: String,
        /// Penalty text for non-compliance.
        penalty: String,
    },
    /// Article 50 limited-risk system with transparency obligations.
    #[serde(rename = "LIMITED-RISK")]
    LimitedRisk {
        /// Reasons the system falls under Article 50, in check order.
        reasons: Vec<String>,
        /// Obligations matching the triggered reasons, in check order.
        obligations: Vec<String>,
        /// Compliance deadline.
        deadline: String,
        /// Penalty text for non-compliance.
        penalty: String,
    },
    /// No mandatory obligations apply.
    #[serde(rename = "MINIMAL-RISK")]
    MinimalRisk {
        /// Voluntary measures worth considering.
        obligations: Vec<String>,
    },
}

/// A matched high-risk condition with its legal references.
struct HighRiskFactor {
    /// Human-readable reason text.
    reason: &'static str,
    /// Annex III point reference.
    annex_point: &'static str,
    /// Article reference for the classification route.
    article_ref: &'static str,
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Classifies an AI system into exactly one AI Act risk category.
///
/// Deterministic and total: the same profile always yields an identical
/// result and no input triggers an error.
#[must_use]
pub fn classify(profile: &SystemProfile) -> RiskClassification {
    if profile.social_scoring {
        return RiskClassification::Prohibited {
            article: "Article 5(1)(c)".to_string(),
            reason: "Social scoring by public authorities or on their behalf".to_string(),
            penalty: PENALTY_TIER_ONE.to_string(),
            exception: None,
        };
    }
    if profile.emotion_detection_workplace {
        return RiskClassification::Prohibited {
            article: "Article 5(1)(f)".to_string(),
            reason: "Emotion recognition in workplace or education (except medical/safety)"
                .to_string(),
            penalty: PENALTY_TIER_ONE.to_string(),
            exception: Some("Allowed only for medical or safety reasons".to_string()),
        };
    }
    if profile.predicts_criminal_behavior {
        return RiskClassification::Prohibited {
            article: "Article 5(1)(d)".to_string(),
            reason: "Risk assessment predicting criminal offenses based on profiling".to_string(),
            penalty: PENALTY_TIER_ONE.to_string(),
            exception: None,
        };
    }

    let factors = high_risk_factors(profile);
    if let Some(first) = factors.first() {
        return RiskClassification::HighRisk {
            article: first.article_ref.to_string(),
            annex_reference: first.annex_point.to_string(),
            reason: first.reason.to_string(),
            all_factors: factors.iter().map(|factor| factor.reason.to_string()).collect(),
            obligations: HIGH_RISK_OBLIGATIONS.iter().map(ToString::to_string).collect(),
            deadline: HIGH_RISK_DEADLINE.to_string(),
            penalty: PENALTY_TIER_TWO.to_string(),
        };
    }

    let mut reasons = Vec::new();
    let mut obligations = Vec::new();
    if profile.interacts_with_users {
        reasons.push("AI system interacts with natural persons".to_string());
        obligations.push("Must disclose AI interaction to users (Article 50(1))".to_string());
    }
    if profile.generates_content {
        reasons.push("Generates synthetic audio, image, video, or text content".to_string());
        obligations.push("Must watermark AI-generated content (Article 50(2))".to_string());
    }
    if !reasons.is_empty() {
        return RiskClassification::LimitedRisk {
            reasons,
            obligations,
            deadline: TRANSPARENCY_DEADLINE.to_string(),
            penalty: PENALTY_TIER_TWO.to_string(),
        };
    }

    RiskClassification::MinimalRisk {
        obligations: MINIMAL_RISK_OBLIGATIONS.iter().map(ToString::to_string).collect(),
    }
}

/// Collects every matching Annex III factor, in fixed check order.
fn high_risk_factors(profile: &SystemProfile) -> Vec<HighRiskFactor> {
    let mut factors = Vec::new();
    if profile.biometric_data {
        factors.push(HighRiskFactor {
            reason: "Biometric identification or categorization",
            annex_point: "Annex III point 1",
            article_ref: "Article 6(2)",
        });
    }
    if is_employment_use_case(&profile.use_case) {
        factors.push(HighRiskFactor {
            reason: "AI system for employment, recruitment, or HR decisions",
            annex_point: "Annex III point 4(a)",
            article_ref: "Article 6(2)",
        });
    }
    if profile.education {
        factors.push(HighRiskFactor {
            reason: "AI system for education or vocational training",
            annex_point: "Annex III point 3",
            article_ref: "Article 6(2)",
        });
    }
    if profile.law_enforcement {
        factors.push(HighRiskFactor {
            reason: "AI system for law enforcement",
            annex_point: "Annex III point 6",
            article_ref: "Article 6(2)",
        });
    }
    if profile.critical_infrastructure {
        factors.push(HighRiskFactor {
            reason: "AI system for critical infrastructure",
            annex_point: "Annex III point 2",
            article_ref: "Article 6(2)",
        });
    }
    factors
}

/// Returns true when the use case matches the fixed employment term set.
fn is_employment_use_case(use_case: &str) -> bool {
    let normalized = use_case.trim().to_ascii_lowercase();
    EMPLOYMENT_USE_CASES.contains(&normalized.as_str())
}
