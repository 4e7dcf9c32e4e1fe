// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared stub service and runner wiring for system tests.
// Purpose: Keep suites focused on assertions.
// Dependencies: lottery-harness-*, tiny_http
// ============================================================================

//! Shared helpers for the lottery system tests.

pub mod harness;
pub mod lottery_stub;
