// crates/lottery-harness-core/src/runtime/mod.rs
// ============================================================================
// Module: Lottery Harness Runtime
// Description: Fixture store, schema registry, invoker, and scenario runner.
// Purpose: Execute contract scenarios in live or fixture mode.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules resolve scenarios into invocation results and check them
//! against contract schemas. Live and fixture mode share every step after
//! resolution, so both modes assert exactly the same contracts.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod fixtures;
pub mod invoker;
pub mod mode;
pub mod registry;
pub mod runner;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileRunAuditSink;
pub use audit::NoopRunAuditSink;
pub use audit::RunAuditSink;
pub use audit::ScenarioAuditEvent;
pub use audit::StderrRunAuditSink;
pub use audit::SuiteAuditEvent;
pub use audit::TransportFailureAuditEvent;
pub use fixtures::FixtureError;
pub use fixtures::FixtureStore;
pub use fixtures::MAX_FIXTURE_BYTES;
pub use invoker::RequestInvoker;
pub use invoker::encode_query_value;
pub use invoker::resolve_request;
pub use mode::ModeSelector;
pub use registry::ContractRegistry;
pub use registry::RegistryError;
pub use runner::ScenarioRunner;
pub use runner::SuiteError;
