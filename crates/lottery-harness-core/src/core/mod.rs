// crates/lottery-harness-core/src/core/mod.rs
// ============================================================================
// Module: Lottery Harness Core Types
// Description: Canonical descriptors, scenarios, schemas, and reports.
// Purpose: Provide stable, serializable types shared by every harness mode.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types describe what a contract scenario sends and what it expects
//! back. They carry no I/O; the runtime module resolves and validates them.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod endpoint;
pub mod identifiers;
pub mod invocation;
pub mod overrides;
pub mod report;
pub mod scenario;
pub mod schema;
pub mod violation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use endpoint::EndpointDescriptor;
pub use endpoint::FieldMap;
pub use endpoint::HttpMethod;
pub use identifiers::ContractName;
pub use identifiers::EndpointId;
pub use identifiers::ScenarioId;
pub use invocation::EXPECTED_TRANSPORT_STATUS;
pub use invocation::FIXTURE_STATUS;
pub use invocation::InvocationResult;
pub use invocation::InvocationSource;
pub use invocation::ResolvedRequest;
pub use invocation::TRANSPORT_FAILURE_STATUS;
pub use overrides::FieldPatch;
pub use overrides::RequestOverrides;
pub use overrides::SectionBase;
pub use overrides::SectionOverrides;
pub use report::AssertionReport;
pub use report::HarnessMode;
pub use report::ModeDivergence;
pub use report::SuiteReport;
pub use report::divergences;
pub use scenario::EchoExpectation;
pub use scenario::RequestField;
pub use scenario::Scenario;
pub use scenario::StatusCategory;
pub use scenario::Suite;
pub use schema::ContractSchema;
pub use schema::FieldRule;
pub use schema::FieldType;
pub use schema::NumericBound;
pub use violation::Violation;
pub use violation::ViolationKind;
