// crates/aiact-scan/src/lib.rs
// ============================================================================
// Module: Aiact Scan Library
// Description: Prompt-injection scoring proxy client.
// Purpose: Expose the scan client, report normalization, and verdict types.
// Dependencies: reqwest, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Client for an external prompt-injection scoring API. The client is built
//! once from [`ScanConfig`] and is fail-soft: any network, credential, or
//! payload failure produces [`ScanVerdict::Unverified`] rather than an error,
//! so callers can always distinguish "not flagged" from "could not verify".
//!
//! Invariants:
//! - [`ScanClient::analyze`] never returns an error; failures map to
//!   [`ScanVerdict::Unverified`] with a reason.
//! - Redirects are never followed and response bodies are size-limited.
//! - Cleartext HTTP is rejected unless explicitly enabled.

pub mod client;
pub mod report;

pub use client::ScanClient;
pub use client::ScanConfig;
pub use client::ScanError;
pub use client::ScanRequest;
pub use report::AttackType;
pub use report::DEFAULT_THRESHOLD;
pub use report::RiskBand;
pub use report::ScanReport;
pub use report::ScanScores;
pub use report::ScanVerdict;
