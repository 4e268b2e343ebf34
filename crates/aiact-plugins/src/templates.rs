// crates/aiact-plugins/src/templates.rs
// ============================================================================
// Module: Template Store
// Description: Embedded disclosure templates, labels, and rule documents.
// Purpose: Serve categorical lookups with errors that enumerate valid options.
// Dependencies: serde_json, crate::error
// ============================================================================

//! ## Overview
//! All template content is embedded at compile time from `resources/`. A
//! lookup walks kind, then language, then style; the first missing dimension
//! fails with the valid options for exactly that dimension so callers can
//! self-correct without consulting documentation.
//!
//! Invariants:
//! - Lookup misses are categorical errors, never panics.
//! - The embedded documents are the same bytes served as MCP resources.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::error::TemplateError;

// ============================================================================
// SECTION: Embedded Documents
// ============================================================================

/// Disclosure templates keyed by kind, language, and style.
pub const DISCLOSURE_TEMPLATES: &str = include_str!("../resources/disclosure_templates.json");

/// Article 50 applicability rules.
pub const ARTICLE50_RULES: &str = include_str!("../resources/article50_rules.json");

/// Watermark marker and manifest configuration.
pub const WATERMARK_CONFIG: &str = include_str!("../resources/watermark_config.json");

/// Deepfake label texts keyed by content type.
pub const DEEPFAKE_LABELS: &str = include_str!("../resources/deepfake_labels.json");

// ============================================================================
// SECTION: Lookups
// ============================================================================

/// Fetches one disclosure template.
///
/// # Errors
///
/// Returns [`TemplateError`] naming the failing dimension and its valid
/// options when the kind, language, or style does not exist.
pub fn disclosure_template(
    kind: &str,
    language: &str,
    style: &str,
) -> Result<String, TemplateError> {
    let store = parse_store(DISCLOSURE_TEMPLATES)?;
    let kinds = store.as_object().ok_or_else(|| TemplateError::Store(
        "disclosure templates root must be an object".to_string(),
    ))?;
    let Some(languages) = kinds.get(kind).and_then(Value::as_object) else {
        return Err(TemplateError::UnknownKind {
            requested: kind.to_string(),
            available: kinds.keys().cloned().collect(),
        });
    };
    let Some(styles) = languages.get(language).and_then(Value::as_object) else {
        return Err(TemplateError::UnknownLanguage {
            requested: language.to_string(),
            available: languages.keys().cloned().collect(),
        });
    };
    let Some(text) = styles.get(style).and_then(Value::as_str) else {
        return Err(TemplateError::UnknownStyle {
            requested: style.to_string(),
            available: styles.keys().cloned().collect(),
        });
    };
    Ok(text.to_string())
}

/// Fetches the label record for one deepfake content type.
///
/// # Errors
///
/// Returns [`TemplateError::UnknownKind`] listing the supported content
/// types when the requested type does not exist.
pub fn deepfake_label(content_type: &str) -> Result<Value, TemplateError> {
    let store = parse_store(DEEPFAKE_LABELS)?;
    let types = store.as_object().ok_or_else(|| TemplateError::Store(
        "deepfake labels root must be an object".to_string(),
    ))?;
    types.get(content_type).cloned().ok_or_else(|| TemplateError::UnknownKind {
        requested: content_type.to_string(),
        available: types.keys().cloned().collect(),
    })
}

/// Parses an embedded store document.
fn parse_store(raw: &str) -> Result<Value, TemplateError> {
    serde_json::from_str(raw).map_err(|err| TemplateError::Store(err.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
