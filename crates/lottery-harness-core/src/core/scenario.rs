// crates/lottery-harness-core/src/core/scenario.rs
// ============================================================================
// Module: Scenarios
// Description: Immutable test cases and ordered suites.
// Purpose: Bind an endpoint, its overrides, and the expected contract.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`Scenario`] names one request shape and the contract its response must
//! satisfy. Scenarios share their [`EndpointDescriptor`] through an [`Arc`]
//! and are never mutated once built. A [`Suite`] is an ordered list of
//! scenarios that the runner executes one at a time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::core::endpoint::EndpointDescriptor;
use crate::core::identifiers::ContractName;
use crate::core::identifiers::ScenarioId;
use crate::core::overrides::RequestOverrides;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Expected status category of a scenario's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// Domain success envelope.
    Success,
    /// Domain error envelope.
    Failure,
}

impl StatusCategory {
    /// Returns the lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request field a response value must echo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", content = "name", rename_all = "snake_case")]
pub enum RequestField {
    /// Merged query parameter.
    Query(String),
    /// Merged body field.
    Body(String),
    /// Merged path parameter.
    PathParam(String),
}

/// Expectation that a response field echoes a request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoExpectation {
    /// JSON pointer into the response body (for example `/data/discount_id`).
    pub pointer: String,
    /// Request field the pointed value must equal.
    pub source: RequestField,
}

/// One immutable contract test case.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Unique scenario identifier.
    id: ScenarioId,
    /// Human-readable description.
    description: String,
    /// Shared endpoint defaults.
    endpoint: Arc<EndpointDescriptor>,
    /// Per-scenario request deltas.
    overrides: RequestOverrides,
    /// Expected status category.
    expected_category: StatusCategory,
    /// Expected contract name.
    expected_contract: ContractName,
    /// Echo expectations checked in live mode.
    echoes: Vec<EchoExpectation>,
}

impl Scenario {
    /// Creates a scenario with default overrides and no echo expectations.
    #[must_use]
    pub fn new(
        id: impl Into<ScenarioId>,
        endpoint: Arc<EndpointDescriptor>,
        expected_category: StatusCategory,
        expected_contract: impl Into<ContractName>,
    ) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            endpoint,
            overrides: RequestOverrides::default(),
            expected_category,
            expected_contract: expected_contract.into(),
            echoes: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the request overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: RequestOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Adds an echo expectation.
    #[must_use]
    pub fn expect_echo(mut self, pointer: impl Into<String>, source: RequestField) -> Self {
        self.echoes.push(EchoExpectation {
            pointer: pointer.into(),
            source,
        });
        self
    }

    /// Returns the scenario identifier.
    #[must_use]
    pub const fn id(&self) -> &ScenarioId {
        &self.id
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the shared endpoint descriptor.
    #[must_use]
    pub fn endpoint(&self) -> &EndpointDescriptor {
        &self.endpoint
    }

    /// Returns the request overrides.
    #[must_use]
    pub const fn overrides(&self) -> &RequestOverrides {
        &self.overrides
    }

    /// Returns the expected status category.
    #[must_use]
    pub const fn expected_category(&self) -> StatusCategory {
        self.expected_category
    }

    /// Returns the expected contract name.
    #[must_use]
    pub const fn expected_contract(&self) -> &ContractName {
        &self.expected_contract
    }

    /// Returns the echo expectations.
    #[must_use]
    pub fn echoes(&self) -> &[EchoExpectation] {
        &self.echoes
    }
}

/// Ordered, named list of scenarios.
#[derive(Debug, Clone)]
pub struct Suite {
    /// Suite name used in reports.
    name: String,
    /// Scenarios in execution order.
    scenarios: Vec<Scenario>,
}

impl Suite {
    /// Creates an empty suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scenarios: Vec::new(),
        }
    }

    /// Appends a scenario.
    pub fn push(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    /// Appends a scenario, builder style.
    #[must_use]
    pub fn with(mut self, scenario: Scenario) -> Self {
        self.push(scenario);
        self
    }

    /// Returns the suite name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterates scenarios in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    /// Returns the number of scenarios.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Returns true when the suite has no scenarios.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Returns a suite holding only scenarios whose id starts with `prefix`.
    #[must_use]
    pub fn filter_prefix(&self, prefix: &str) -> Self {
        Self {
            name: self.name.clone(),
            scenarios: self
                .scenarios
                .iter()
                .filter(|scenario| scenario.id().as_str().starts_with(prefix))
                .cloned()
                .collect(),
        }
    }
}
