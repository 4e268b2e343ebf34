// crates/aiact-scan/src/report.rs
// ============================================================================
// Module: Scan Report Normalization
// Description: Verdict, risk band, and score types for scan results.
// Purpose: Normalize raw scoring API payloads into a stable report shape.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The scoring API returns an `analysis` array of named score entries. This
//! module extracts the detection scores, derives the aggregate risk band and
//! attack type, and applies the caller-supplied threshold to decide the
//! verdict.
//!
//! Invariants:
//! - Risk bands are fixed: above 0.9 critical, above 0.7 high, above 0.5
//!   medium, otherwise low.
//! - A report is `Flagged` exactly when the maximum score exceeds the
//!   threshold.
//! - Malformed payloads yield `Unverified`, never a panic or an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default flagging threshold applied when the caller supplies none.
pub const DEFAULT_THRESHOLD: f64 = 0.65;

// ============================================================================
// SECTION: Report Types
// ============================================================================

/// Scan outcome; absence of a verdict is distinct from "safe".
///
/// # Invariants
/// - `Unverified` carries the failure reason; it never means "safe".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ScanVerdict {
    /// No detection score exceeded the threshold.
    Safe,
    /// At least one detection score exceeded the threshold.
    Flagged,
    /// The scan could not be completed; treat as unknown, not safe.
    Unverified {
        /// Why the scan could not be completed.
        reason: String,
    },
}

/// Risk band derived from the maximum detection score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    /// Maximum score above 0.9.
    Critical,
    /// Maximum score above 0.7.
    High,
    /// Maximum score above 0.5.
    Medium,
    /// Maximum score at or below 0.5.
    Low,
}

/// Detected attack shape when a scan is flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackType {
    /// Short-form injection dominated by the prompt-injection detector.
    InstructionOverride,
    /// Long-form injection dominated by the long-prompt detector.
    LongFormInjection,
}

/// Raw detection scores extracted from the API payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanScores {
    /// Prompt-injection detector score.
    pub prompt_injection: f64,
    /// Long-prompt-injection detector score.
    pub long_prompt_injection: f64,
}

/// Normalized scan result returned to callers.
///
/// # Invariants
/// - `scores`, `max_score`, `risk`, and `attack_type` are present only when
///   the scan completed; they are `None` for `Unverified` reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Aggregate verdict for the scanned text.
    #[serde(flatten)]
    pub verdict: ScanVerdict,
    /// Extracted detection scores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScanScores>,
    /// Maximum detection score across detectors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    /// Risk band derived from the maximum score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskBand>,
    /// Attack shape, present only for flagged reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_type: Option<AttackType>,
    /// Threshold applied when deciding the verdict.
    pub threshold: f64,
    /// Caller-supplied correlation tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl ScanReport {
    /// Builds an `Unverified` report carrying the failure reason.
    #[must_use]
    pub fn unverified(reason: impl Into<String>, threshold: f64, tag: Option<String>) -> Self {
        Self {
            verdict: ScanVerdict::Unverified {
                reason: reason.into(),
            },
            scores: None,
            max_score: None,
            risk: None,
            attack_type: None,
            threshold,
            tag,
        }
    }
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Maps a maximum score to its fixed risk band.
#[must_use]
pub fn risk_band(max_score: f64) -> RiskBand {
    if max_score > 0.9 {
        RiskBand::Critical
    } else if max_score > 0.7 {
        RiskBand::High
    } else if max_score > 0.5 {
        RiskBand::Medium
    } else {
        RiskBand::Low
    }
}

/// Normalizes a raw API payload into a [`ScanReport`].
///
/// Malformed payloads produce an `Unverified` report rather than an error.
#[must_use]
pub fn normalize_payload(body: &str, threshold: f64, tag: Option<String>) -> ScanReport {
    let Ok(payload) = serde_json::from_str::<Value>(body) else {
        return ScanReport::unverified("scan response was not valid json", threshold, tag);
    };
    let Some(analysis) = payload.get("analysis").and_then(Value::as_array) else {
        return ScanReport::unverified("scan response missing analysis array", threshold, tag);
    };

    let prompt_injection = extract_score(analysis, "prompt_injection");
    let long_prompt_injection = extract_score(analysis, "long_prompt_injection");
    let (Some(prompt_injection), long_prompt_injection) =
        (prompt_injection, long_prompt_injection.unwrap_or(0.0))
    else {
        return ScanReport::unverified("scan response missing detection scores", threshold, tag);
    };

    let scores = ScanScores {
        prompt_injection,
        long_prompt_injection,
    };
    let max_score = prompt_injection.max(long_prompt_injection);
    let flagged = max_score > threshold;
    let attack_type = flagged.then(|| {
        if prompt_injection >= long_prompt_injection {
            AttackType::InstructionOverride
        } else {
            AttackType::LongFormInjection
        }
    });

    ScanReport {
        verdict: if flagged {
            ScanVerdict::Flagged
        } else {
            ScanVerdict::Safe
        },
        scores: Some(scores),
        max_score: Some(max_score),
        risk: Some(risk_band(max_score)),
        attack_type,
        threshold,
        tag,
    }
}

/// Extracts a named score entry from the analysis array.
fn extract_score(analysis: &[Value], name: &str) -> Option<f64> {
    analysis.iter().find_map(|entry| {
        let entry_name = entry.get("name").and_then(Value::as_str)?;
        if entry_name != name {
            return None;
        }
        entry.get("result").and_then(Value::as_f64)
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        reason = "Test-only assertions and helpers are permitted."
    )]

    use super::*;

    fn payload(prompt: f64, long: f64) -> String {
        format!(
            r#"{{"analysis":[
                {{"type":"score","name":"prompt_injection","result":{prompt}}},
                {{"type":"score","name":"long_prompt_injection","result":{long}}}
            ]}}"#
        )
    }

    #[test]
    fn flags_when_score_exceeds_threshold() {
        let report = normalize_payload(&payload(0.92, 0.1), DEFAULT_THRESHOLD, None);
        assert_eq!(report.verdict, ScanVerdict::Flagged);
        assert_eq!(report.risk, Some(RiskBand::Critical));
        assert_eq!(report.attack_type, Some(AttackType::InstructionOverride));
        assert_eq!(report.max_score, Some(0.92));
    }

    #[test]
    fn long_detector_dominance_marks_long_form_injection() {
        let report = normalize_payload(&payload(0.2, 0.8), DEFAULT_THRESHOLD, None);
        assert_eq!(report.verdict, ScanVerdict::Flagged);
        assert_eq!(report.risk, Some(RiskBand::High));
        assert_eq!(report.attack_type, Some(AttackType::LongFormInjection));
    }

    #[test]
    fn safe_reports_omit_attack_type() {
        let report = normalize_payload(&payload(0.3, 0.1), DEFAULT_THRESHOLD, None);
        assert_eq!(report.verdict, ScanVerdict::Safe);
        assert_eq!(report.attack_type, None);
        assert_eq!(report.risk, Some(RiskBand::Low));
    }

    #[test]
    fn missing_long_detector_defaults_to_zero() {
        let body = r#"{"analysis":[{"type":"score","name":"prompt_injection","result":0.6}]}"#;
        let report = normalize_payload(body, DEFAULT_THRESHOLD, None);
        assert_eq!(report.verdict, ScanVerdict::Safe);
        assert_eq!(report.risk, Some(RiskBand::Medium));
    }

    #[test]
    fn malformed_payloads_are_unverified() {
        for body in ["not json", "{}", r#"{"analysis":"nope"}"#, r#"{"analysis":[]}"#] {
            let report = normalize_payload(body, DEFAULT_THRESHOLD, Some("probe".to_string()));
            assert!(
                matches!(report.verdict, ScanVerdict::Unverified { .. }),
                "expected unverified for {body}"
            );
            assert_eq!(report.scores, None);
            assert_eq!(report.tag, Some("probe".to_string()));
        }
    }

    #[test]
    fn risk_bands_use_exclusive_bounds() {
        assert_eq!(risk_band(0.91), RiskBand::Critical);
        assert_eq!(risk_band(0.9), RiskBand::High);
        assert_eq!(risk_band(0.7), RiskBand::Medium);
        assert_eq!(risk_band(0.5), RiskBand::Low);
        assert_eq!(risk_band(0.0), RiskBand::Low);
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        let report = normalize_payload(&payload(0.65, 0.0), 0.65, None);
        assert_eq!(report.verdict, ScanVerdict::Safe);
        let report = normalize_payload(&payload(0.66, 0.0), 0.65, None);
        assert_eq!(report.verdict, ScanVerdict::Flagged);
    }
}
