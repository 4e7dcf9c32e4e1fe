// crates/lottery-harness-core/src/runtime/runner.rs
// ============================================================================
// Module: Scenario Runner
// Description: Resolves, validates, and reports contract scenarios.
// Purpose: Turn invocation results into assertion reports and suite totals.
// Dependencies: crate::{core, runtime}, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The runner checks a suite's configuration before anything runs, then
//! resolves each scenario through its [`ModeSelector`], validates the body
//! against the expected contract, checks echo expectations in either mode, and
//! records an audit event per scenario.
//!
//! Configuration problems (unknown contracts, missing fixtures, category
//! mismatches) surface as [`SuiteError`]. Contract mismatches never do; they
//! are accumulated as violations on the report.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::core::AssertionReport;
use crate::core::EXPECTED_TRANSPORT_STATUS;
use crate::core::EchoExpectation;
use crate::core::HarnessMode;
use crate::core::InvocationResult;
use crate::core::RequestField;
use crate::core::ResolvedRequest;
use crate::core::Scenario;
use crate::core::StatusCategory;
use crate::core::Suite;
use crate::core::SuiteReport;
use crate::core::Violation;
use crate::core::ViolationKind;
use crate::core::schema::values_equal;
use crate::core::violation::ROOT_PATH;
use crate::runtime::audit::NoopRunAuditSink;
use crate::runtime::audit::RunAuditSink;
use crate::runtime::audit::ScenarioAuditEvent;
use crate::runtime::audit::SuiteAuditEvent;
use crate::runtime::audit::TransportFailureAuditEvent;
use crate::runtime::invoker::encode_query_value;
use crate::runtime::mode::ModeSelector;
use crate::runtime::registry::ContractRegistry;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Suite configuration errors, raised before any scenario runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SuiteError {
    /// The expected contract has no registered schema.
    #[error("scenario {scenario}: unknown contract {contract}")]
    UnknownContract {
        /// Scenario identifier.
        scenario: String,
        /// Contract name.
        contract: String,
    },
    /// Fixture mode has no payload for the expected contract.
    #[error("scenario {scenario}: no fixture for contract {contract}")]
    MissingFixture {
        /// Scenario identifier.
        scenario: String,
        /// Contract name.
        contract: String,
    },
    /// The scenario's category differs from the schema's category.
    #[error("scenario {scenario}: expects {expected} but contract {contract} is {actual}")]
    CategoryMismatch {
        /// Scenario identifier.
        scenario: String,
        /// Contract name.
        contract: String,
        /// Category declared by the scenario.
        expected: StatusCategory,
        /// Category declared by the schema.
        actual: StatusCategory,
    },
    /// Two scenarios share an identifier.
    #[error("duplicate scenario id: {0}")]
    DuplicateScenario(String),
    /// The suite has no scenarios.
    #[error("suite {0} has no scenarios")]
    EmptySuite(String),
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Runs scenarios in one harness mode.
pub struct ScenarioRunner {
    /// Response routing.
    selector: ModeSelector,
    /// Contract schemas.
    registry: Arc<ContractRegistry>,
    /// Run event sink.
    audit: Arc<dyn RunAuditSink>,
}

impl ScenarioRunner {
    /// Creates a runner with a no-op audit sink.
    #[must_use]
    pub fn new(selector: ModeSelector, registry: Arc<ContractRegistry>) -> Self {
        Self {
            selector,
            registry,
            audit: Arc::new(NoopRunAuditSink),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn RunAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the runner's mode.
    #[must_use]
    pub const fn mode(&self) -> HarnessMode {
        self.selector.mode()
    }

    /// Checks one scenario's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError`] when the contract is unknown, the categories
    /// disagree, or fixture mode has no payload for the contract.
    pub fn check_scenario(&self, scenario: &Scenario) -> Result<(), SuiteError> {
        let contract = scenario.expected_contract();
        let schema = self.registry.get(contract).map_err(|_| SuiteError::UnknownContract {
            scenario: scenario.id().to_string(),
            contract: contract.to_string(),
        })?;
        if schema.category != scenario.expected_category() {
            return Err(SuiteError::CategoryMismatch {
                scenario: scenario.id().to_string(),
                contract: contract.to_string(),
                expected: scenario.expected_category(),
                actual: schema.category,
            });
        }
        if let Some(fixtures) = self.selector.fixtures()
            && !fixtures.contains(contract)
        {
            return Err(SuiteError::MissingFixture {
                scenario: scenario.id().to_string(),
                contract: contract.to_string(),
            });
        }
        Ok(())
    }

    /// Checks every scenario in a suite.
    ///
    /// # Errors
    ///
    /// Returns the first [`SuiteError`] found, in suite order.
    pub fn check_suite(&self, suite: &Suite) -> Result<(), SuiteError> {
        if suite.is_empty() {
            return Err(SuiteError::EmptySuite(suite.name().to_string()));
        }
        let mut seen = BTreeSet::new();
        for scenario in suite.iter() {
            if !seen.insert(scenario.id()) {
                return Err(SuiteError::DuplicateScenario(scenario.id().to_string()));
            }
            self.check_scenario(scenario)?;
        }
        Ok(())
    }

    /// Runs one scenario and returns its report.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError`] when the scenario's configuration is invalid.
    /// Contract mismatches are reported as violations, never as errors.
    pub fn run(&self, scenario: &Scenario) -> Result<AssertionReport, SuiteError> {
        self.check_scenario(scenario)?;
        let invocation = self.selector.resolve(scenario);
        let mut violations = Vec::new();

        if let Some(message) = &invocation.failure {
            self.audit.record_transport_failure(&TransportFailureAuditEvent::new(
                scenario.id().clone(),
                message.clone(),
                invocation.request.clone(),
            ));
            violations.push(Violation::new(
                ROOT_PATH,
                ViolationKind::TransportFailure {
                    message: message.clone(),
                },
            ));
        } else if invocation.status != EXPECTED_TRANSPORT_STATUS {
            violations.push(Violation::new(
                ROOT_PATH,
                ViolationKind::TransportStatus {
                    expected: EXPECTED_TRANSPORT_STATUS,
                    found: invocation.status,
                },
            ));
        }

        match &invocation.body {
            Some(body) => {
                let found = self
                    .registry
                    .validate(scenario.expected_contract(), body)
                    .map_err(|_| SuiteError::UnknownContract {
                        scenario: scenario.id().to_string(),
                        contract: scenario.expected_contract().to_string(),
                    })?;
                violations.extend(found);
                if let Some(request) = &invocation.request {
                    violations.extend(check_echoes(scenario.echoes(), request, body));
                }
            }
            None if !invocation.is_failure() => {
                violations.push(Violation::new(ROOT_PATH, ViolationKind::MissingBody));
            }
            None => {}
        }

        let report = build_report(scenario, self.mode(), invocation, violations);
        self.audit.record_scenario(&ScenarioAuditEvent::from_report(&report));
        Ok(report)
    }

    /// Checks a suite, then runs every scenario in order.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError`] when the suite configuration is invalid. No
    /// scenario runs in that case.
    pub fn run_suite(&self, suite: &Suite) -> Result<SuiteReport, SuiteError> {
        self.check_suite(suite)?;
        let reports =
            suite.iter().map(|scenario| self.run(scenario)).collect::<Result<Vec<_>, _>>()?;
        let report = SuiteReport::new(suite.name(), self.mode(), reports);
        self.audit.record_suite(&SuiteAuditEvent::from_report(&report));
        Ok(report)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Assembles the final report.
fn build_report(
    scenario: &Scenario,
    mode: HarnessMode,
    invocation: InvocationResult,
    violations: Vec<Violation>,
) -> AssertionReport {
    AssertionReport {
        scenario_id: scenario.id().clone(),
        description: scenario.description().to_string(),
        endpoint: scenario.endpoint().label(),
        contract: scenario.expected_contract().clone(),
        mode,
        status: invocation.status,
        body: invocation.body,
        passed: violations.is_empty(),
        violations,
    }
}

/// Checks echo expectations against the resolved request.
///
/// Expectations whose request field was not sent are skipped.
fn check_echoes(
    echoes: &[EchoExpectation],
    request: &ResolvedRequest,
    body: &Value,
) -> Vec<Violation> {
    echoes
        .iter()
        .filter_map(|echo| {
            let expected = request_value(request, &echo.source)?;
            let found = body.pointer(&echo.pointer);
            if found.is_some_and(|found| echo_matches(expected, found)) {
                return None;
            }
            Some(Violation::new(
                pointer_path(&echo.pointer),
                ViolationKind::EchoMismatch {
                    expected: expected.clone(),
                    found: found.cloned(),
                },
            ))
        })
        .collect()
}

/// Looks up a merged request field.
fn request_value<'a>(request: &'a ResolvedRequest, field: &RequestField) -> Option<&'a Value> {
    match field {
        RequestField::Query(name) => request.query.as_ref()?.get(name),
        RequestField::Body(name) => request.body.as_ref()?.get(name),
        RequestField::PathParam(name) => request.path_params.get(name),
    }
}

/// Compares an echoed value, matching strings against their wire form.
fn echo_matches(expected: &Value, found: &Value) -> bool {
    if values_equal(expected, found) {
        return true;
    }
    (expected.is_string() || found.is_string())
        && encode_query_value(expected) == encode_query_value(found)
}

/// Converts a JSON pointer into a dotted violation path.
fn pointer_path(pointer: &str) -> String {
    let trimmed = pointer.trim_start_matches('/');
    if trimmed.is_empty() { ROOT_PATH.to_string() } else { trimmed.replace('/', ".") }
}
