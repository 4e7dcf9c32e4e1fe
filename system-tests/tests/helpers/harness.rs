// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Runner Wiring
// Description: Builds live and fixture runners for a lottery catalog.
// Purpose: Share runner construction between suites.
// Dependencies: lottery-harness-core, lottery-harness-contract, lottery-harness-http
// ============================================================================

//! Runner construction shared by the suites.

use std::sync::Arc;
use std::time::Duration;

use lottery_harness_contract::LotteryCatalog;
use lottery_harness_core::HarnessMode;
use lottery_harness_core::ModeSelector;
use lottery_harness_core::NoopRunAuditSink;
use lottery_harness_core::RequestInvoker;
use lottery_harness_core::ScenarioRunner;
use lottery_harness_core::SuiteReport;
use lottery_harness_http::HttpTransportConfig;
use lottery_harness_http::ReqwestTransport;

/// Credential shared by the stub and the harness.
pub const STUB_TOKEN: &str = "system-test-token";

/// Default request timeout against the local stub.
const STUB_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds a live runner for `base_url`.
pub fn live_runner(
    catalog: &LotteryCatalog,
    base_url: &str,
    access_token: Option<&str>,
    timeout: Option<Duration>,
) -> ScenarioRunner {
    let timeout_ms = u64::try_from(timeout.unwrap_or(STUB_TIMEOUT).as_millis()).unwrap();
    let transport = ReqwestTransport::new(HttpTransportConfig {
        timeout_ms,
        ..HttpTransportConfig::default()
    })
    .expect("transport");
    let invoker =
        RequestInvoker::new(base_url, access_token.map(str::to_string), Arc::new(transport));
    ScenarioRunner::new(
        ModeSelector::live(Arc::new(invoker)),
        Arc::new(catalog.registry().clone()),
    )
    .with_audit_sink(Arc::new(NoopRunAuditSink))
}

/// Builds a fixture runner over the catalog's built-in fixtures.
pub fn fixture_runner(catalog: &LotteryCatalog) -> ScenarioRunner {
    ScenarioRunner::new(
        ModeSelector::fixture(Arc::new(catalog.fixtures().clone())),
        Arc::new(catalog.registry().clone()),
    )
    .with_audit_sink(Arc::new(NoopRunAuditSink))
}

/// Runs the full suite.
pub fn run_all(runner: &ScenarioRunner, catalog: &LotteryCatalog) -> SuiteReport {
    runner.run_suite(&catalog.suite()).expect("suite run")
}

/// Runs scenarios whose id starts with `prefix`.
pub fn run_prefix(runner: &ScenarioRunner, catalog: &LotteryCatalog, prefix: &str) -> SuiteReport {
    let suite = catalog.suite().filter_prefix(prefix);
    assert!(!suite.is_empty(), "no scenario matches {prefix}");
    runner.run_suite(&suite).expect("suite run")
}

/// Renders failing reports for assertion messages.
pub fn describe_failures(report: &SuiteReport) -> String {
    report.failures().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

/// Asserts every scenario passed in the expected mode.
pub fn assert_all_passed(report: &SuiteReport, mode: HarnessMode) {
    assert_eq!(report.mode, mode);
    assert!(report.all_passed(), "failing scenarios:\n{}", describe_failures(report));
}
