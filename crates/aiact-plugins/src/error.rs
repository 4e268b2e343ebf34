// crates/aiact-plugins/src/error.rs
// ============================================================================
// Module: Plugin Errors
// Description: Error variants for registry, tool, and template failures.
// Purpose: Keep failure categories distinct so callers can react per kind.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Registry errors abort a registration without mutating state. Tool errors
//! separate caller mistakes from execution failures so the dispatch layer can
//! map them to the right protocol codes. Template errors enumerate the valid
//! options so a caller can self-correct.

use thiserror::Error;

/// Errors raised by registry mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A plugin with the same name is already registered.
    #[error("plugin already registered: {0}")]
    DuplicateName(String),
    /// A tool name is already owned by another plugin.
    #[error("tool {tool} already registered by plugin {owner}")]
    DuplicateTool {
        /// Conflicting tool name.
        tool: String,
        /// Plugin that owns the tool.
        owner: String,
    },
    /// A resource URI is already owned by another plugin.
    #[error("resource {uri} already registered by plugin {owner}")]
    DuplicateResource {
        /// Conflicting resource URI.
        uri: String,
        /// Plugin that owns the resource.
        owner: String,
    },
    /// The plugin's `initialize` hook failed.
    #[error("plugin {plugin} failed to initialize: {reason}")]
    InitializeFailed {
        /// Plugin that failed.
        plugin: String,
        /// Failure reason reported by the plugin.
        reason: String,
    },
    /// No plugin is registered under the given name.
    #[error("plugin not registered: {0}")]
    NotFound(String),
}

/// Errors raised by tool handlers.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool arguments were missing or malformed.
    #[error("invalid tool input: {0}")]
    InvalidInput(String),
    /// The tool failed while executing.
    #[error("tool execution failed: {0}")]
    Execution(String),
}

/// Errors raised by template store lookups.
///
/// # Invariants
/// - Each variant lists the valid options for the failing dimension.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The requested template kind does not exist.
    #[error("unknown template kind {requested}; valid kinds: {}", available.join(", "))]
    UnknownKind {
        /// Requested kind.
        requested: String,
        /// Kinds the store offers.
        available: Vec<String>,
    },
    /// The requested language is not available for the kind.
    #[error("unknown template language {requested}; valid languages: {}", available.join(", "))]
    UnknownLanguage {
        /// Requested language.
        requested: String,
        /// Languages the store offers for the kind.
        available: Vec<String>,
    },
    /// The requested style is not available for the language.
    #[error("unknown template style {requested}; valid styles: {}", available.join(", "))]
    UnknownStyle {
        /// Requested style.
        requested: String,
        /// Styles the store offers for the language.
        available: Vec<String>,
    },
    /// An embedded store document failed to parse.
    #[error("template store corrupted: {0}")]
    Store(String),
}
