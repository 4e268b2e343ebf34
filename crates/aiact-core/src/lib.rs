// crates/aiact-core/src/lib.rs
// ============================================================================
// Module: Aiact Core
// Description: Pure rule logic for EU AI Act risk, role, and prohibition checks.
// Purpose: Provide deterministic, total classification functions for the Aiact stack.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This crate holds the decision rules shared by every Aiact surface: the risk
//! classifier (Articles 5, 6, 50 and Annex III), the role resolver (Article 3),
//! and the prohibited-practice checker (Article 5). All entry points are pure
//! functions over caller-supplied records; they never read the clock, the
//! environment, or the network, and they never fail on well-typed input.
//!
//! Invariants:
//! - Classification precedence is fixed: prohibited, then high-risk, then
//!   limited-risk, then minimal-risk; the first match is terminal.
//! - Role predicates are evaluated in a fixed order and are independent;
//!   multiple roles can hold simultaneously.
//! - The prohibited-practice checker never short-circuits; every triggered
//!   flag is reported.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod classify;
pub mod penalties;
pub mod prohibited;
pub mod roles;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use classify::RiskClassification;
pub use classify::SystemProfile;
pub use classify::classify;
pub use prohibited::ProhibitedPracticeFlags;
pub use prohibited::ProhibitedPracticesReport;
pub use prohibited::Severity;
pub use prohibited::Violation;
pub use prohibited::check_prohibited_practices;
pub use roles::OrganizationProfile;
pub use roles::Role;
pub use roles::RoleAssignment;
pub use roles::RoleDetail;
pub use roles::RoleDetermination;
pub use roles::determine_roles;
pub use roles::is_eu_location;
