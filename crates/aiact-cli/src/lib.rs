// crates/aiact-cli/src/lib.rs
// ============================================================================
// Module: Aiact CLI Library
// Description: Localization support shared by the CLI binary and its tests.
// Purpose: Route all user-facing strings through one message catalog.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! Library half of the `aiact` binary. It carries the i18n catalog and the
//! [`t!`](crate::t) macro so integration tests can exercise translation
//! behavior without spawning the binary.

pub mod i18n;
