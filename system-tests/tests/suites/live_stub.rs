// system-tests/tests/suites/live_stub.rs
// ============================================================================
// Module: Live Stub Tests
// Description: Full live-mode runs against the in-process lottery stub.
// Purpose: Validate wire rendering and contract checks end to end.
// Dependencies: system-tests helpers, lottery-harness-*
// ============================================================================

//! ## Overview
//! Runs the lottery suite over real HTTP against [`LotteryStub`] and checks
//! both the verdicts and what the stub saw on the wire.

use std::net::TcpListener;

use lottery_harness_contract::LotteryCatalog;
use lottery_harness_contract::StatusCatalog;
use lottery_harness_core::HarnessMode;
use lottery_harness_core::TRANSPORT_FAILURE_STATUS;
use lottery_harness_core::ViolationKind;
use serde_json::Value;
use serde_json::json;
use system_tests::config::SystemTestConfig;

use crate::helpers::harness::STUB_TOKEN;
use crate::helpers::harness::assert_all_passed;
use crate::helpers::harness::live_runner;
use crate::helpers::harness::run_all;
use crate::helpers::harness::run_prefix;
use crate::helpers::lottery_stub::LotteryStub;

fn catalog() -> LotteryCatalog {
    LotteryCatalog::new(StatusCatalog::default()).expect("catalog")
}

#[test]
fn conforming_service_passes_every_scenario() {
    let config = SystemTestConfig::load().expect("system test config");
    let stub = LotteryStub::spawn(STUB_TOKEN);
    let catalog = catalog();
    let runner = live_runner(&catalog, stub.base_url(), Some(STUB_TOKEN), config.timeout);

    let report = run_all(&runner, &catalog);

    assert_all_passed(&report, HarnessMode::Live);
    assert_eq!(report.passed, catalog.suite().len());
    assert_eq!(stub.requests().len(), catalog.suite().len());
}

#[test]
fn credential_cases_reach_the_wire_as_intended() {
    let stub = LotteryStub::spawn(STUB_TOKEN);
    let catalog = catalog();
    let runner = live_runner(&catalog, stub.base_url(), Some(STUB_TOKEN), None);

    let report = run_prefix(&runner, &catalog, "event.");

    assert_all_passed(&report, HarnessMode::Live);
    let requests = stub.requests();
    let expected_auth = format!("Bearer {STUB_TOKEN}");
    assert_eq!(requests[0].authorization.as_deref(), Some(expected_auth.as_str()));
    assert_eq!(requests[1].authorization, None);
    let tampered = format!("{expected_auth}wrong");
    assert_eq!(requests[2].authorization.as_deref(), Some(tampered.as_str()));
}

#[test]
fn removed_and_wrong_typed_inputs_stay_distinct_on_the_wire() {
    let stub = LotteryStub::spawn(STUB_TOKEN);
    let catalog = catalog();
    let runner = live_runner(&catalog, stub.base_url(), Some(STUB_TOKEN), None);

    let report = run_prefix(&runner, &catalog, "inventory.");

    assert_all_passed(&report, HarnessMode::Live);
    let requests = stub.requests();
    let with_query = |name: &str| {
        requests.iter().filter(|request| request.query.contains_key(name)).count()
    };
    assert_eq!(requests.len(), report.reports.len());
    assert_eq!(with_query("discount_id"), requests.len() - 2);
    assert!(requests.iter().all(|request| request.method == "PUT"));
    assert!(requests.iter().all(|request| request.path == "/api/v1/lottery/inventory"));
    assert!(
        requests
            .iter()
            .any(|request| request.query.get("discount_id").map(String::as_str) == Some("-200"))
    );
    let bodies: Vec<Value> =
        requests.iter().filter_map(|request| serde_json::from_str(&request.body).ok()).collect();
    assert!(bodies.contains(&json!({})));
    assert!(bodies.contains(&json!({"increase": "wrong"})));
}

#[test]
fn success_payloads_echo_the_requested_ids() {
    let stub = LotteryStub::spawn(STUB_TOKEN);
    let catalog = catalog();
    let runner = live_runner(&catalog, stub.base_url(), Some(STUB_TOKEN), None);

    let report = run_prefix(&runner, &catalog, "receive.success");

    assert_all_passed(&report, HarnessMode::Live);
    assert_eq!(report.reports[0].body.as_ref().unwrap()["data"]["lottery_id"], json!(1));
}

#[test]
fn wrong_credential_fails_authenticated_success_cases() {
    let stub = LotteryStub::spawn("rotated-token");
    let catalog = catalog();
    let runner = live_runner(&catalog, stub.base_url(), Some(STUB_TOKEN), None);

    let report = run_prefix(&runner, &catalog, "member.success");

    assert_eq!(report.failed, 1);
    let failure = &report.reports[0];
    assert_eq!(failure.status, 200);
    assert!(failure.violations.iter().any(|violation| violation.path == "code"));
}

#[test]
fn unreachable_service_reports_transport_failures() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let catalog = catalog();
    let runner = live_runner(&catalog, &format!("http://{addr}/api/v1"), Some(STUB_TOKEN), None);

    let report = run_prefix(&runner, &catalog, "admin.");

    assert_eq!(report.failed, report.reports.len());
    for scenario in &report.reports {
        assert_eq!(scenario.status, TRANSPORT_FAILURE_STATUS);
        assert!(scenario.body.is_none());
        assert_eq!(scenario.violations.len(), 1);
        assert!(matches!(scenario.violations[0].kind, ViolationKind::TransportFailure { .. }));
    }
}
