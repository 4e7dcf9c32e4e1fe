// crates/lottery-harness-core/src/lib.rs
// ============================================================================
// Module: Lottery Harness Core Library
// Description: Public API surface for the dual-mode contract test harness.
// Purpose: Expose contract types, transport interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Lottery harness core runs data-driven contract scenarios against an HTTP
//! API either live (through a [`Transport`]) or from canned fixtures. Both
//! paths validate the same declarative contract schemas and produce the same
//! structured [`AssertionReport`] values.
//! Invariants:
//! - Transport failures never escape the [`RequestInvoker`].
//! - Validation mismatches are accumulated, never raised.
//! - Fixture, schema, and mode state is read-only once a runner is built.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::PreparedRequest;
pub use interfaces::Transport;
pub use interfaces::TransportError;
pub use interfaces::TransportResponse;
pub use runtime::ContractRegistry;
pub use runtime::FileRunAuditSink;
pub use runtime::FixtureError;
pub use runtime::FixtureStore;
pub use runtime::ModeSelector;
pub use runtime::NoopRunAuditSink;
pub use runtime::RegistryError;
pub use runtime::RequestInvoker;
pub use runtime::RunAuditSink;
pub use runtime::ScenarioAuditEvent;
pub use runtime::ScenarioRunner;
pub use runtime::StderrRunAuditSink;
pub use runtime::SuiteAuditEvent;
pub use runtime::SuiteError;
pub use runtime::TransportFailureAuditEvent;
