// system-tests/tests/suites/cross_mode.rs
// ============================================================================
// Module: Cross-Mode Tests
// Description: Compares live runs against the stub with fixture runs.
// Purpose: Keep fixtures honest against a conforming service.
// Dependencies: system-tests helpers, lottery-harness-*
// ============================================================================

//! ## Overview
//! Runs the suite in both modes and compares verdicts and envelope codes.

use lottery_harness_config::StatusCodesConfig;
use lottery_harness_config::StatusEntryConfig;
use lottery_harness_contract::LotteryCatalog;
use lottery_harness_contract::StatusCatalog;
use lottery_harness_core::HarnessMode;
use lottery_harness_core::divergences;
use serde_json::json;

use crate::helpers::harness::STUB_TOKEN;
use crate::helpers::harness::assert_all_passed;
use crate::helpers::harness::fixture_runner;
use crate::helpers::harness::live_runner;
use crate::helpers::harness::run_all;
use crate::helpers::harness::run_prefix;
use crate::helpers::lottery_stub::LotteryStub;

fn renumbered_status() -> StatusCodesConfig {
    StatusCodesConfig {
        access_token_error: Some(StatusEntryConfig {
            code: 4001,
            message: "invalid credential".to_string(),
        }),
        member_no_discount_error: Some(StatusEntryConfig {
            code: 4004,
            message: "no discount".to_string(),
        }),
        ..StatusCodesConfig::default()
    }
}

#[test]
fn live_and_fixture_runs_agree() {
    let stub = LotteryStub::spawn(STUB_TOKEN);
    let catalog = LotteryCatalog::new(StatusCatalog::default()).expect("catalog");

    let live = run_all(&live_runner(&catalog, stub.base_url(), Some(STUB_TOKEN), None), &catalog);
    let fixture = run_all(&fixture_runner(&catalog), &catalog);

    assert_all_passed(&live, HarnessMode::Live);
    assert_all_passed(&fixture, HarnessMode::Fixture);
    assert!(divergences(&live, &fixture).is_empty());
}

#[test]
fn renumbered_status_table_flows_through_both_modes() {
    let status = StatusCatalog::from_config(&renumbered_status()).expect("status");
    let stub = LotteryStub::spawn_with(STUB_TOKEN, status.clone());
    let catalog = LotteryCatalog::new(status).expect("catalog");

    let live = run_all(&live_runner(&catalog, stub.base_url(), Some(STUB_TOKEN), None), &catalog);
    let fixture = run_all(&fixture_runner(&catalog), &catalog);

    assert_all_passed(&live, HarnessMode::Live);
    assert!(divergences(&live, &fixture).is_empty());
    let no_discount = live
        .reports
        .iter()
        .find(|report| report.scenario_id.as_str() == "member.no_discount")
        .expect("no-discount report");
    assert_eq!(no_discount.envelope_code(), Some(&json!(4004)));
}

#[test]
fn drifted_service_is_reported_as_divergence() {
    let stub = LotteryStub::spawn(STUB_TOKEN);
    let status = StatusCatalog::from_config(&renumbered_status()).expect("status");
    let catalog = LotteryCatalog::new(status).expect("catalog");
    let runner = live_runner(&catalog, stub.base_url(), Some(STUB_TOKEN), None);

    let live = run_prefix(&runner, &catalog, "event.");
    let fixture = run_prefix(&fixture_runner(&catalog), &catalog, "event.");

    assert!(fixture.all_passed());
    let found = divergences(&live, &fixture);
    let ids: Vec<&str> = found.iter().map(|divergence| divergence.scenario_id.as_str()).collect();
    assert_eq!(ids, vec!["event.missing_token", "event.wrong_token"]);
    assert_eq!(found[0].live_code, Some(json!(1001)));
    assert_eq!(found[0].fixture_code, Some(json!(4001)));
    assert!(!found[0].live_passed);
    assert!(found[0].fixture_passed);
}
