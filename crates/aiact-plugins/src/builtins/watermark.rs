// crates/aiact-plugins/src/builtins/watermark.rs
// ============================================================================
// Module: Watermark Plugin
// Description: Text watermark application and verification tools.
// Purpose: Support Article 50(2) machine-readable content marking.
// Dependencies: crate::templates, serde_json, sha2, time
// ============================================================================

//! ## Overview
//! `apply_watermark` appends a visible trailer `[AIACT-WM:<hash prefix>]` to
//! the text and returns a manifest with the full SHA-256 content hash and an
//! RFC 3339 timestamp. `verify_watermark` strips the trailer, recomputes the
//! hash, and reports whether the content still matches its mark.
//!
//! Invariants:
//! - The hash always covers the original text, never the trailer.
//! - Verification is pure string work; it never consults a clock.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;
use sha2::Digest;
use sha2::Sha256;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::ToolError;
use crate::plugin::CompliancePlugin;
use crate::plugin::ResourceDescriptor;
use crate::plugin::ResourceRegistration;
use crate::plugin::ToolDefinition;
use crate::plugin::ToolRegistration;
use crate::templates;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Marker string used in trailers and manifests.
const MARKER: &str = "AIACT-WM";

/// Number of hash hex characters embedded in the visible trailer.
const HASH_PREFIX_LEN: usize = 16;

// ============================================================================
// SECTION: Plugin
// ============================================================================

/// Content watermarking plugin.
pub struct WatermarkPlugin;

impl CompliancePlugin for WatermarkPlugin {
    fn name(&self) -> &str {
        "watermark"
    }

    fn description(&self) -> &str {
        "Applies and verifies text watermarks for Article 50(2) content marking"
    }

    fn tools(&self) -> Vec<ToolRegistration> {
        vec![
            ToolRegistration {
                definition: ToolDefinition {
                    name: "apply_watermark".to_string(),
                    description: "Append a visible watermark trailer to text and return a \
                                  manifest with the content hash and timestamp"
                        .to_string(),
                    input_schema: apply_schema(),
                },
                handler: Box::new(|arguments| apply(arguments)),
            },
            ToolRegistration {
                definition: ToolDefinition {
                    name: "verify_watermark".to_string(),
                    description: "Check whether watermarked text still matches its embedded \
                                  content hash"
                        .to_string(),
                    input_schema: verify_schema(),
                },
                handler: Box::new(|arguments| verify(arguments)),
            },
        ]
    }

    fn resources(&self) -> Vec<ResourceRegistration> {
        vec![ResourceRegistration {
            descriptor: ResourceDescriptor {
                uri: "aiact://config/watermark".to_string(),
                name: "Watermark configuration".to_string(),
                description: "Marker, hash, and manifest layout used by the watermark tools"
                    .to_string(),
                mime_type: "application/json".to_string(),
            },
            content: templates::WATERMARK_CONFIG.to_string(),
        }]
    }
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Applies a watermark trailer and builds the manifest.
fn apply(arguments: &Value) -> Result<Value, ToolError> {
    let text = arguments
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidInput("text must be a string".to_string()))?;
    let provider = arguments.get("provider").and_then(Value::as_str).unwrap_or("unspecified");

    let content_hash = sha256_hex(text);
    let prefix: String = content_hash.chars().take(HASH_PREFIX_LEN).collect();
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| ToolError::Execution(format!("timestamp formatting failed: {err}")))?;

    Ok(json!({
        "watermarked_text": format!("{text}\n\n[{MARKER}:{prefix}]"),
        "manifest": {
            "marker": MARKER,
            "content_hash": content_hash,
            "timestamp": timestamp,
            "provider": provider,
        },
    }))
}

/// Verifies a watermark trailer against the content hash.
fn verify(arguments: &Value) -> Result<Value, ToolError> {
    let text = arguments
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidInput("text must be a string".to_string()))?;

    let Some((content, prefix)) = split_trailer(text) else {
        return Ok(json!({
            "watermarked": false,
            "valid": false,
            "reason": "no watermark trailer found",
        }));
    };
    let recomputed: String = sha256_hex(content).chars().take(HASH_PREFIX_LEN).collect();
    let valid = recomputed == prefix;
    Ok(json!({
        "watermarked": true,
        "valid": valid,
        "reason": if valid { "content matches its mark" } else { "content hash mismatch" },
    }))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Splits watermarked text into content and trailer hash prefix.
fn split_trailer(text: &str) -> Option<(&str, &str)> {
    let open = format!("\n\n[{MARKER}:");
    let start = text.rfind(&open)?;
    let rest = &text[start + open.len() ..];
    let prefix = rest.strip_suffix(']')?;
    if prefix.len() != HASH_PREFIX_LEN || !prefix.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    Some((&text[.. start], prefix))
}

/// Computes the lowercase hex SHA-256 digest of a string.
fn sha256_hex(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

// ============================================================================
// SECTION: Schemas
// ============================================================================

/// Input schema for `apply_watermark`.
fn apply_schema() -> Value {
    json!({
        "type": "object",
        "required": ["text"],
        "properties": {
            "text": { "type": "string", "description": "Text to watermark" },
            "provider": { "type": "string", "description": "Name recorded in the manifest" }
        }
    })
}

/// Input schema for `verify_watermark`.
fn verify_schema() -> Value {
    json!({
        "type": "object",
        "required": ["text"],
        "properties": {
            "text": { "type": "string", "description": "Watermarked text to verify" }
        }
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
        reason = "Test-only assertions and helpers are permitted."
    )]

    use super::*;

    #[test]
    fn apply_then_verify_round_trips() {
        let applied = apply(&json!({"text": "generated article", "provider": "acme"})).unwrap();
        let watermarked = applied["watermarked_text"].as_str().unwrap();
        let verified = verify(&json!({ "text": watermarked })).unwrap();
        assert_eq!(verified["watermarked"], json!(true));
        assert_eq!(verified["valid"], json!(true));
    }

    #[test]
    fn tampered_content_fails_verification() {
        let applied = apply(&json!({"text": "original text"})).unwrap();
        let watermarked = applied["watermarked_text"].as_str().unwrap();
        let tampered = watermarked.replace("original", "altered");
        let verified = verify(&json!({ "text": tampered })).unwrap();
        assert_eq!(verified["watermarked"], json!(true));
        assert_eq!(verified["valid"], json!(false));
    }

    #[test]
    fn unmarked_text_reports_no_trailer() {
        let verified = verify(&json!({"text": "plain text"})).unwrap();
        assert_eq!(verified["watermarked"], json!(false));
    }

    #[test]
    fn manifest_hash_covers_original_text_only() {
        let applied = apply(&json!({"text": "abc"})).unwrap();
        let full_hash = applied["manifest"]["content_hash"].as_str().unwrap();
        assert_eq!(full_hash, sha256_hex("abc"));
        assert_eq!(full_hash.len(), 64);
    }
}
