// crates/aiact-plugins/src/builtins/mod.rs
// ============================================================================
// Module: Builtin Plugins
// Description: Compliance plugins shipped with the server.
// Purpose: Group the builtin plugin implementations under one module.
// Dependencies: child modules
// ============================================================================

//! ## Overview
//! Six plugins ship builtin: risk classification, role determination,
//! transparency, watermarking, deepfake labeling, and security scanning.
//! The loader assembles them through [`crate::loader::builtin_manifest`].

pub mod deepfake;
pub mod risk;
pub mod roles;
pub mod security;
pub mod transparency;
pub mod watermark;

pub use deepfake::DeepfakePlugin;
pub use risk::RiskPlugin;
pub use roles::RolesPlugin;
pub use security::SecurityPlugin;
pub use transparency::TransparencyPlugin;
pub use watermark::WatermarkPlugin;
