// crates/lottery-harness-core/src/core/report.rs
// ============================================================================
// Module: Assertion Reports
// Description: Per-scenario and per-suite outcomes.
// Purpose: Carry enough detail to diagnose a failure without re-running it.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! An [`AssertionReport`] records what one scenario expected, what it got, and
//! every violation found. A [`SuiteReport`] collects reports in execution
//! order. Two suite reports for the same suite in different modes can be
//! compared with [`divergences`] to cross-validate fixtures against a live
//! service.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::ContractName;
use crate::core::identifiers::ScenarioId;
use crate::core::violation::Violation;

// ============================================================================
// SECTION: Harness Mode
// ============================================================================

/// Where scenario responses come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarnessMode {
    /// Real requests through the transport.
    Live,
    /// Canned payloads from the fixture store.
    Fixture,
}

impl HarnessMode {
    /// Returns the lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fixture => "fixture",
        }
    }
}

impl fmt::Display for HarnessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionReport {
    /// Scenario identifier.
    pub scenario_id: ScenarioId,
    /// Scenario description.
    pub description: String,
    /// `METHOD path` label of the endpoint.
    pub endpoint: String,
    /// Expected contract name.
    pub contract: ContractName,
    /// Mode the scenario ran in.
    pub mode: HarnessMode,
    /// Transport status (0 on transport failure).
    pub status: u16,
    /// Response body received, if any.
    pub body: Option<Value>,
    /// Every violation found.
    pub violations: Vec<Violation>,
    /// True when no violation was found.
    pub passed: bool,
}

impl AssertionReport {
    /// Returns the envelope `code` of the received body, if present.
    #[must_use]
    pub fn envelope_code(&self) -> Option<&Value> {
        self.body.as_ref().and_then(|body| body.get("code"))
    }
}

impl fmt::Display for AssertionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passed { "PASS" } else { "FAIL" };
        write!(
            f,
            "{verdict} {} [{}] {} expected contract {} (status {})",
            self.scenario_id, self.mode, self.endpoint, self.contract, self.status
        )?;
        if self.passed {
            return Ok(());
        }
        match &self.body {
            Some(body) => write!(f, "\n  body: {body}")?,
            None => write!(f, "\n  body: <none>")?,
        }
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

/// Outcome of one suite run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteReport {
    /// Suite name.
    pub suite: String,
    /// Mode the suite ran in.
    pub mode: HarnessMode,
    /// Reports in execution order.
    pub reports: Vec<AssertionReport>,
    /// Number of passing scenarios.
    pub passed: usize,
    /// Number of failing scenarios.
    pub failed: usize,
}

impl SuiteReport {
    /// Builds a suite report and computes totals.
    #[must_use]
    pub fn new(suite: impl Into<String>, mode: HarnessMode, reports: Vec<AssertionReport>) -> Self {
        let passed = reports.iter().filter(|report| report.passed).count();
        let failed = reports.len() - passed;
        Self {
            suite: suite.into(),
            mode,
            reports,
            passed,
            failed,
        }
    }

    /// Returns true when every scenario passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Iterates failing reports.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionReport> {
        self.reports.iter().filter(|report| !report.passed)
    }
}

// ============================================================================
// SECTION: Cross-Validation
// ============================================================================

/// Scenario whose outcome differs between a live and a fixture run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeDivergence {
    /// Scenario identifier.
    pub scenario_id: ScenarioId,
    /// Live outcome.
    pub live_passed: bool,
    /// Fixture outcome.
    pub fixture_passed: bool,
    /// Envelope code received live.
    pub live_code: Option<Value>,
    /// Envelope code stored in the fixture.
    pub fixture_code: Option<Value>,
}

impl fmt::Display for ModeDivergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = |value: &Option<Value>| {
            value.as_ref().map_or_else(|| "<none>".to_string(), Value::to_string)
        };
        write!(
            f,
            "{}: live passed={} code={}, fixture passed={} code={}",
            self.scenario_id,
            self.live_passed,
            code(&self.live_code),
            self.fixture_passed,
            code(&self.fixture_code)
        )
    }
}

/// Compares a live and a fixture run of the same suite.
///
/// Scenarios are matched by id. A divergence is reported when the verdicts
/// or the envelope codes differ. Scenarios missing from either run are
/// skipped.
#[must_use]
pub fn divergences(live: &SuiteReport, fixture: &SuiteReport) -> Vec<ModeDivergence> {
    live.reports
        .iter()
        .filter_map(|live_report| {
            let fixture_report = fixture
                .reports
                .iter()
                .find(|candidate| candidate.scenario_id == live_report.scenario_id)?;
            let live_code = live_report.envelope_code().cloned();
            let fixture_code = fixture_report.envelope_code().cloned();
            if live_report.passed == fixture_report.passed && live_code == fixture_code {
                return None;
            }
            Some(ModeDivergence {
                scenario_id: live_report.scenario_id.clone(),
                live_passed: live_report.passed,
                fixture_passed: fixture_report.passed,
                live_code,
                fixture_code,
            })
        })
        .collect()
}
