// crates/lottery-harness-config/src/lib.rs
// ============================================================================
// Module: Lottery Harness Config Library
// Description: Configuration model, loading, and environment overrides.
// Purpose: Single source of truth for lottery-harness.toml semantics.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! `lottery-harness-config` loads the harness configuration from TOML,
//! layers `LOTTERY_HARNESS_*` environment overrides on top, and validates the
//! result fail-closed. Environment values are read with strict UTF-8 checks.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod env;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use env::EnvOverrides;
pub use env::HarnessEnv;
