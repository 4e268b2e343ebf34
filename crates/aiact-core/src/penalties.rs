// crates/aiact-core/src/penalties.rs
// ============================================================================
// Module: Penalty and Deadline Constants
// Description: Fixed penalty texts and compliance deadlines from the AI Act.
// Purpose: Share the canonical penalty tiers across classifier, roles, and checks.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The AI Act defines two penalty tiers relevant to this crate: Article 5
//! violations (tier one) and high-risk or transparency non-compliance (tier
//! two). Deadlines are the fixed application dates for high-risk (Article 6)
//! and transparency (Article 50) obligations.

// ============================================================================
// SECTION: Penalty Tiers
// ============================================================================

/// Penalty text for Article 5 prohibited practices (Article 99(3)).
pub const PENALTY_TIER_ONE: &str =
    "Up to €35 million or 7% of global annual turnover (whichever is higher)";

/// Penalty text for high-risk and transparency non-compliance (Article 99(4)).
pub const PENALTY_TIER_TWO: &str = "Up to €15 million or 3% of global annual turnover";

// ============================================================================
// SECTION: Deadlines
// ============================================================================

/// Application date for high-risk system obligations.
pub const HIGH_RISK_DEADLINE: &str = "2027-08-02";

/// Application date for Article 50 transparency obligations.
pub const TRANSPARENCY_DEADLINE: &str = "2026-08-02";

/// Deadline text for Article 5 prohibitions, which already apply.
pub const PROHIBITED_DEADLINE: &str = "Immediate - Already in effect";
