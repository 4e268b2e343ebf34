// crates/aiact-core/src/prohibited.rs
// ============================================================================
// Module: Prohibited-Practice Checker
// Description: Accumulating Article 5 violation check over eight flags.
// Purpose: Report every triggered prohibition with its legal reference.
// Dependencies: crate::penalties, serde
// ============================================================================

//! ## Overview
//! Unlike the risk classifier, this checker never short-circuits: all eight
//! Article 5 flags are evaluated in fixed order and every triggered flag
//! appends a violation record. Multiple violations co-occur and are all
//! reported. The checker covers the full Article 5(1)(a)-(h) range, a wider
//! net than the three flags the classifier tests.
//!
//! Invariants:
//! - Violations appear in fixed flag-check order: 5(1)(a) through 5(1)(h).
//! - `is_prohibited` is true exactly when the violation list is non-empty.
//! - Severity is `CRITICAL` when any violation exists, `None` otherwise.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::penalties::PENALTY_TIER_ONE;

// ============================================================================
// SECTION: Input Record
// ============================================================================

/// Independently defined Article 5 practice flags.
///
/// # Invariants
/// - Every flag defaults to `false` when omitted from serialized input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProhibitedPracticeFlags {
    /// Manipulates behavior via subliminal techniques.
    pub uses_subliminal_techniques: bool,
    /// Exploits vulnerabilities of specific groups.
    pub exploits_vulnerabilities: bool,
    /// Social scoring by or for public authorities.
    pub social_scoring: bool,
    /// Predicts criminal behavior from profiling alone.
    pub predicts_crime_from_profiling: bool,
    /// Scrapes facial images from the internet or CCTV.
    pub scrapes_facial_images: bool,
    /// Emotion recognition in workplace or education.
    pub detects_emotions_in_workplace: bool,
    /// Infers sensitive attributes from biometrics.
    pub biometric_categorization_sensitive_attributes: bool,
    /// Real-time remote biometric identification in public spaces.
    pub real_time_biometric_identification_public: bool,
}

// ============================================================================
// SECTION: Result Types
// ============================================================================

/// One triggered prohibition with its legal reference and penalty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Article 5 point reference.
    pub article: String,
    /// Short violation name.
    pub violation: String,
    /// Statutory description of the prohibited practice.
    pub description: String,
    /// Fixed maximum penalty text.
    pub penalty: String,
    /// Statutory exception note.
    pub exception: String,
}

/// Severity band for the aggregate result.
///
/// # Invariants
/// - Labels are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// At least one prohibition is triggered.
    #[serde(rename = "CRITICAL")]
    Critical,
    /// No prohibition is triggered.
    #[serde(rename = "None")]
    None,
}

impl Severity {
    /// Returns the stable display label for the severity band.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::None => "None",
        }
    }
}

/// Aggregate result of the prohibited-practice check.
///
/// # Invariants
/// - `is_prohibited` equals `!violations.is_empty()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProhibitedPracticesReport {
    /// Whether any prohibition is triggered.
    pub is_prohibited: bool,
    /// Severity band for the aggregate result.
    pub severity: Severity,
    /// Every triggered violation, in flag-check order.
    pub violations: Vec<Violation>,
}

// ============================================================================
// SECTION: Check
// ============================================================================

/// Checks all eight Article 5 flags and reports every triggered violation.
///
/// Deterministic and total; all checks always run.
#[must_use]
pub fn check_prohibited_practices(flags: &ProhibitedPracticeFlags) -> ProhibitedPracticesReport {
    let mut violations = Vec::new();

    if flags.uses_subliminal_techniques {
        violations.push(violation(
            "Article 5(1)(a)",
            "Subliminal techniques to manipulate behavior",
            "AI systems that deploy subliminal techniques beyond a person's consciousness to \
             materially distort behavior",
            "None",
        ));
    }
    if flags.exploits_vulnerabilities {
        violations.push(violation(
            "Article 5(1)(b)",
            "Exploitation of vulnerabilities",
            "AI systems that exploit vulnerabilities of specific groups (age, disability, \
             social/economic situation)",
            "None",
        ));
    }
    if flags.social_scoring {
        violations.push(violation(
            "Article 5(1)(c)",
            "Social scoring",
            "AI systems for social scoring by public authorities or on their behalf",
            "None",
        ));
    }
    if flags.predicts_crime_from_profiling {
        violations.push(violation(
            "Article 5(1)(d)",
            "Predictive policing based on profiling",
            "AI systems that make risk assessments of natural persons to predict criminal \
             offenses based solely on profiling",
            "None",
        ));
    }
    if flags.scrapes_facial_images {
        violations.push(violation(
            "Article 5(1)(e)",
            "Untargeted scraping of facial images",
            "Creating or expanding facial recognition databases through untargeted scraping from \
             the internet or CCTV",
            "None",
        ));
    }
    if flags.detects_emotions_in_workplace {
        violations.push(violation(
            "Article 5(1)(f)",
            "Emotion recognition in workplace or education",
            "AI systems that infer emotions in workplace or educational institutions",
            "Medical or safety reasons only",
        ));
    }
    if flags.biometric_categorization_sensitive_attributes {
        violations.push(violation(
            "Article 5(1)(g)",
            "Biometric categorization of sensitive attributes",
            "Biometric categorization systems that infer race, political opinions, trade union \
             membership, religious/philosophical beliefs, sex life, or sexual orientation",
            "Limited exceptions for law enforcement with safeguards",
        ));
    }
    if flags.real_time_biometric_identification_public {
        violations.push(violation(
            "Article 5(1)(h)",
            "Real-time remote biometric identification in public",
            "Real-time remote biometric identification systems in publicly accessible spaces for \
             law enforcement",
            "Very limited exceptions for serious crimes with judicial authorization",
        ));
    }

    let is_prohibited = !violations.is_empty();
    ProhibitedPracticesReport {
        is_prohibited,
        severity: if is_prohibited {
            Severity::Critical
        } else {
            Severity::None
        },
        violations,
    }
}

/// Builds a violation record with the fixed tier-one penalty.
fn violation(article: &str, name: &str, description: &str, exception: &str) -> Violation {
    Violation {
        article: article.to_string(),
        violation: name.to_string(),
        description: description.to_string(),
        penalty: PENALTY_TIER_ONE.to_string(),
        exception: exception.to_string(),
    }
}
