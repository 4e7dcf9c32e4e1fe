// crates/lottery-harness-core/src/runtime/audit.rs
// ============================================================================
// Module: Run Audit Logging
// Description: Structured JSON-line events for scenario and suite runs.
// Purpose: Record run outcomes without a hard logging dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The runner emits one [`ScenarioAuditEvent`] per scenario, one
//! [`TransportFailureAuditEvent`] per failed live call, and one
//! [`SuiteAuditEvent`] per suite. Sinks serialize events as JSON lines.
//! Events never carry credential values: requests are recorded in their
//! redacted form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::AssertionReport;
use crate::core::ContractName;
use crate::core::HarnessMode;
use crate::core::ResolvedRequest;
use crate::core::ScenarioId;
use crate::core::SuiteReport;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Outcome of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Scenario identifier.
    pub scenario_id: ScenarioId,
    /// Expected contract name.
    pub contract: ContractName,
    /// Mode the scenario ran in.
    pub mode: HarnessMode,
    /// Transport status.
    pub status: u16,
    /// Whether the scenario passed.
    pub passed: bool,
    /// Number of violations found.
    pub violations: usize,
}

impl ScenarioAuditEvent {
    /// Builds an event from a finished report.
    #[must_use]
    pub fn from_report(report: &AssertionReport) -> Self {
        Self {
            event: "scenario_report",
            timestamp_ms: now_ms(),
            scenario_id: report.scenario_id.clone(),
            contract: report.contract.clone(),
            mode: report.mode,
            status: report.status,
            passed: report.passed,
            violations: report.violations.len(),
        }
    }
}

/// Live call that never produced a response.
#[derive(Debug, Clone, Serialize)]
pub struct TransportFailureAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Scenario identifier.
    pub scenario_id: ScenarioId,
    /// Target URL, if the request was built.
    pub url: Option<String>,
    /// Transport error description.
    pub error: String,
    /// Redacted request, if the request was built.
    pub request: Option<ResolvedRequest>,
}

impl TransportFailureAuditEvent {
    /// Builds a transport failure event.
    #[must_use]
    pub fn new(
        scenario_id: ScenarioId,
        error: impl Into<String>,
        request: Option<ResolvedRequest>,
    ) -> Self {
        Self {
            event: "transport_failure",
            timestamp_ms: now_ms(),
            scenario_id,
            url: request.as_ref().map(|request| request.url.clone()),
            error: error.into(),
            request,
        }
    }
}

/// Totals for one suite run.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Suite name.
    pub suite: String,
    /// Mode the suite ran in.
    pub mode: HarnessMode,
    /// Scenario count.
    pub total: usize,
    /// Passing scenario count.
    pub passed: usize,
    /// Failing scenario count.
    pub failed: usize,
}

impl SuiteAuditEvent {
    /// Builds a summary event from a suite report.
    #[must_use]
    pub fn from_report(report: &SuiteReport) -> Self {
        Self {
            event: "suite_summary",
            timestamp_ms: now_ms(),
            suite: report.suite.clone(),
            mode: report.mode,
            total: report.reports.len(),
            passed: report.passed,
            failed: report.failed,
        }
    }
}

/// Milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Destination for run audit events.
pub trait RunAuditSink: Send + Sync {
    /// Records a scenario outcome.
    fn record_scenario(&self, event: &ScenarioAuditEvent);

    /// Records a transport failure.
    fn record_transport_failure(&self, _event: &TransportFailureAuditEvent) {}

    /// Records a suite summary.
    fn record_suite(&self, _event: &SuiteAuditEvent) {}
}

/// Sink that writes JSON lines to stderr.
pub struct StderrRunAuditSink;

impl StderrRunAuditSink {
    /// Writes one event line; serialization and write errors are dropped.
    fn emit(event: &impl Serialize) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

impl RunAuditSink for StderrRunAuditSink {
    fn record_scenario(&self, event: &ScenarioAuditEvent) {
        Self::emit(event);
    }

    fn record_transport_failure(&self, event: &TransportFailureAuditEvent) {
        Self::emit(event);
    }

    fn record_suite(&self, event: &SuiteAuditEvent) {
        Self::emit(event);
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileRunAuditSink {
    /// Append-mode log file.
    file: Mutex<File>,
}

impl FileRunAuditSink {
    /// Opens the audit log in append mode, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one event line; serialization and write errors are dropped.
    fn emit(&self, event: &impl Serialize) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl RunAuditSink for FileRunAuditSink {
    fn record_scenario(&self, event: &ScenarioAuditEvent) {
        self.emit(event);
    }

    fn record_transport_failure(&self, event: &TransportFailureAuditEvent) {
        self.emit(event);
    }

    fn record_suite(&self, event: &SuiteAuditEvent) {
        self.emit(event);
    }
}

/// Sink that discards every event.
pub struct NoopRunAuditSink;

impl RunAuditSink for NoopRunAuditSink {
    fn record_scenario(&self, _event: &ScenarioAuditEvent) {}
}
