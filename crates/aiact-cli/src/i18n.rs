// crates/aiact-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for future localization support.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The aiact CLI stores user-facing strings in a small translation catalog to
//! enforce consistent messaging and to prepare for future locales. All
//! runtime output should be routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - Variants are stable for CLI parsing and catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// French.
    Fr,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
///
/// # Invariants
/// - Ordering is stable for deterministic presentation.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Fr];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
/// - `value` is preformatted and should be safe for display.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries loaded into the localized message bundle.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "aiact {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.json_failed", "Failed to render JSON output: {error}"),
    ("input.read_failed", "Failed to read input at {path}: {error}"),
    ("input.stdin_failed", "Failed to read input from stdin: {error}"),
    ("input.too_large", "Refusing to read input of {size} bytes (limit {limit})."),
    ("input.parse_failed", "Failed to parse {kind} JSON: {error}"),
    ("input.kind.system_profile", "system profile"),
    ("input.kind.organization_profile", "organization profile"),
    ("input.kind.practice_flags", "practice flags"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("scan.client_failed", "Failed to build scan client: {error}"),
    ("serve.plugin.skipped", "Info: plugin {plugin} is disabled and was skipped."),
    ("serve.plugin.failed", "Warning: plugin {plugin} failed to load: {reason}"),
    ("serve.no_plugins", "Refusing to serve with no plugins loaded."),
    ("serve.listening", "Serving MCP over HTTP on {bind}"),
    ("serve.stdio", "Serving MCP over stdio"),
    ("serve.failed", "MCP server failed: {error}"),
    ("plugins.list.header", "Registered plugins:"),
    ("plugins.list.entry", "- {name}: {description} ({tools} tools, {resources} resources)"),
    ("plugins.list.none", "No plugins registered."),
    ("tools.list.header", "Registered tools:"),
    ("tools.list.entry", "- {name}: {description}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'fr'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static French catalog entries loaded into the localized message bundle.
const CATALOG_FR: &[(&str, &str)] = &[
    ("main.version", "aiact {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortie"),
    ("output.write_failed", "Échec d'écriture vers {stream} : {error}"),
    ("output.json_failed", "Échec du rendu de la sortie JSON : {error}"),
    ("input.read_failed", "Échec de lecture de l'entrée à {path} : {error}"),
    ("input.stdin_failed", "Échec de lecture de l'entrée standard : {error}"),
    ("input.too_large", "Refus de lire une entrée de {size} octets (limite {limit})."),
    ("input.parse_failed", "Échec de l'analyse JSON du {kind} : {error}"),
    ("input.kind.system_profile", "profil du système"),
    ("input.kind.organization_profile", "profil de l'organisation"),
    ("input.kind.practice_flags", "indicateurs de pratiques"),
    ("config.load_failed", "Échec du chargement de la configuration : {error}"),
    ("config.validate.ok", "Configuration valide."),
    ("scan.client_failed", "Échec de la construction du client d'analyse : {error}"),
    ("serve.plugin.skipped", "Info : le plugin {plugin} est désactivé et a été ignoré."),
    ("serve.plugin.failed", "Avertissement : le plugin {plugin} n'a pas pu se charger : {reason}"),
    ("serve.no_plugins", "Refus de servir sans aucun plugin chargé."),
    ("serve.listening", "Service MCP via HTTP sur {bind}"),
    ("serve.stdio", "Service MCP via stdio"),
    ("serve.failed", "Échec du serveur MCP : {error}"),
    ("plugins.list.header", "Plugins enregistrés :"),
    ("plugins.list.entry", "- {name} : {description} ({tools} outils, {resources} ressources)"),
    ("plugins.list.none", "Aucun plugin enregistré."),
    ("tools.list.header", "Outils enregistrés :"),
    ("tools.list.entry", "- {name} : {description}"),
    ("i18n.lang.invalid_env", "Valeur non valide pour {env} : {value}. Attendu 'en' ou 'fr'."),
    (
        "i18n.disclaimer.machine_translated",
        "Remarque : la sortie non anglaise est traduite automatiquement et peut être inexacte.",
    ),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_FR_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Fr => CATALOG_FR_MAP.get_or_init(|| CATALOG_FR.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
