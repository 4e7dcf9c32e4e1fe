// system-tests/src/lib.rs
// ============================================================================
// Module: Lottery Harness System Tests Library
// Description: Shared configuration for end-to-end harness runs.
// Purpose: Provide common settings for the system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the lottery system tests in
//! `system-tests/tests`. The tests run the full suite against a local stub
//! service, or against a real deployment when one is configured.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
