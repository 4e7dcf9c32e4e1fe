// crates/lottery-harness-http/src/lib.rs
// ============================================================================
// Module: Lottery Harness HTTP Library
// Description: Live transport backed by a blocking reqwest client.
// Purpose: Move prepared requests onto the wire with strict limits.
// Dependencies: lottery-harness-core, reqwest, url
// ============================================================================

//! ## Overview
//! `lottery-harness-http` implements the core [`Transport`] seam for live
//! runs. It never follows redirects, bounds every request with a timeout,
//! and refuses response bodies above the configured size.
//!
//! [`Transport`]: lottery_harness_core::Transport

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use transport::HttpTransportConfig;
pub use transport::ReqwestTransport;
