// crates/lottery-harness-contract/src/suite.rs
// ============================================================================
// Module: Lottery Scenario Suite
// Description: Data-driven scenarios for every lottery endpoint.
// Purpose: Express each contract case as an override over endpoint defaults.
// Dependencies: lottery-harness-core
// ============================================================================

//! ## Overview
//! Scenario ids are `<endpoint>.<case>` so a prefix such as `inventory.`
//! selects one endpoint. Removing a required key always expects the
//! query-required contract; sending a wrong-typed or out-of-range value
//! always expects the invalid-value contract.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use lottery_harness_core::EndpointDescriptor;
use lottery_harness_core::RequestField;
use lottery_harness_core::RequestOverrides;
use lottery_harness_core::Scenario;
use lottery_harness_core::StatusCategory;
use lottery_harness_core::Suite;

use crate::endpoints::LotteryEndpoints;
use crate::schemas;
use crate::status::LotteryStatus;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Name reported for the full lottery suite.
pub const LOTTERY_SUITE: &str = "lottery";

/// Authorization value with a tampered credential.
const TAMPERED_AUTHORIZATION: &str = "Bearer {access_token}wrong";

/// Member id the service treats as holding no discount.
pub const NO_DISCOUNT_MEMBER_ID: i64 = 999_999;

// ============================================================================
// SECTION: Suite
// ============================================================================

/// Builds the full lottery suite in endpoint order.
#[must_use]
pub fn lottery_suite(endpoints: &LotteryEndpoints) -> Suite {
    let mut suite = Suite::new(LOTTERY_SUITE);
    for scenario in event_scenarios(&endpoints.event)
        .into_iter()
        .chain(member_scenarios(&endpoints.member))
        .chain(inventory_scenarios(&endpoints.inventory))
        .chain(receive_scenarios(&endpoints.receive))
        .chain(admin_scenarios(&endpoints.admin))
    {
        suite.push(scenario);
    }
    suite
}

/// `GET /lottery/event` cases.
fn event_scenarios(endpoint: &Arc<EndpointDescriptor>) -> Vec<Scenario> {
    let mut scenarios = vec![
        success("event.success", endpoint, schemas::LOTTERY_EVENT_LIST)
            .describe("lists the discounts of event 1"),
    ];
    scenarios.extend(token_scenarios("event", endpoint));
    scenarios.extend([
        failure("event.missing_query", endpoint, LotteryStatus::QueryRequiredError)
            .describe("no query string at all")
            .with_overrides(RequestOverrides::new().omit_query()),
        failure("event.missing_event_id", endpoint, LotteryStatus::QueryRequiredError)
            .describe("event_id removed")
            .with_overrides(RequestOverrides::new().remove_query("event_id")),
        failure("event.invalid_event_id", endpoint, LotteryStatus::InputValueInvalidError)
            .describe("event_id is not a number")
            .with_overrides(RequestOverrides::new().set_query("event_id", "wrong type !!")),
    ]);
    scenarios
}

/// `GET /lottery/member` cases.
fn member_scenarios(endpoint: &Arc<EndpointDescriptor>) -> Vec<Scenario> {
    let mut scenarios = vec![
        success("member.success", endpoint, schemas::LOTTERY_MEMBER_LIST)
            .describe("lists the discounts of member 1"),
        failure("member.missing_query", endpoint, LotteryStatus::QueryRequiredError)
            .describe("no query string at all")
            .with_overrides(RequestOverrides::new().omit_query()),
    ];
    scenarios.extend(token_scenarios("member", endpoint));
    scenarios.extend([
        failure("member.missing_member_id", endpoint, LotteryStatus::QueryRequiredError)
            .describe("member_id removed")
            .with_overrides(RequestOverrides::new().remove_query("member_id")),
        failure("member.invalid_member_id", endpoint, LotteryStatus::InputValueInvalidError)
            .describe("member_id is not a number")
            .with_overrides(
                RequestOverrides::new().set_query("member_id", "invalid member_id type !"),
            ),
        failure("member.no_discount", endpoint, LotteryStatus::MemberNoDiscountError)
            .describe("member without discounts")
            .with_overrides(RequestOverrides::new().set_query("member_id", NO_DISCOUNT_MEMBER_ID)),
    ]);
    scenarios
}

/// `PUT /lottery/inventory` cases.
fn inventory_scenarios(endpoint: &Arc<EndpointDescriptor>) -> Vec<Scenario> {
    let mut scenarios = vec![
        success("inventory.success", endpoint, schemas::LOTTERY_INVENTORY_UPDATE)
            .describe("increments discount 1 and echoes its id")
            .expect_echo("/data/discount_id", RequestField::Query("discount_id".to_string())),
    ];
    scenarios.extend(token_scenarios("inventory", endpoint));
    scenarios.extend(update_scenarios("inventory", endpoint, "discount_id"));
    scenarios.extend([
        failure("inventory.invalid_increase", endpoint, LotteryStatus::InputValueInvalidError)
            .describe("increase is not a boolean")
            .with_overrides(RequestOverrides::new().set_body("increase", "wrong")),
        failure("inventory.invalid_coupon", endpoint, LotteryStatus::InputValueInvalidError)
            .describe("coupon is not a string")
            .with_overrides(RequestOverrides::new().set_body("coupon", false)),
    ]);
    scenarios
}

/// `PUT /lottery/receive` cases.
fn receive_scenarios(endpoint: &Arc<EndpointDescriptor>) -> Vec<Scenario> {
    let mut scenarios = vec![
        success("receive.success", endpoint, schemas::LOTTERY_RECEIVE_UPDATE)
            .describe("marks lottery 1 as received and echoes its id")
            .expect_echo("/data/lottery_id", RequestField::Query("lottery_id".to_string())),
    ];
    scenarios.extend(token_scenarios("receive", endpoint));
    scenarios.extend(update_scenarios("receive", endpoint, "lottery_id"));
    scenarios.push(
        failure("receive.invalid_is_receive", endpoint, LotteryStatus::InputValueInvalidError)
            .describe("is_receive is not a boolean")
            .with_overrides(RequestOverrides::new().set_body("is_receive", "wrongType")),
    );
    scenarios
}

/// `GET /admin/lottery` cases.
fn admin_scenarios(endpoint: &Arc<EndpointDescriptor>) -> Vec<Scenario> {
    vec![
        success("admin.success", endpoint, schemas::ADMIN_LOTTERY_LIST)
            .describe("lists the first page of lottery events"),
        failure("admin.invalid_paging", endpoint, LotteryStatus::InputValueInvalidError)
            .describe("paging is not a number")
            .with_overrides(RequestOverrides::new().set_query("paging", "wrong type of paging")),
        failure("admin.invalid_amount", endpoint, LotteryStatus::InputValueInvalidError)
            .describe("amount is not a number")
            .with_overrides(RequestOverrides::new().set_query("amount", "wrong type of amount")),
    ]
}

// ============================================================================
// SECTION: Shared Cases
// ============================================================================

/// Missing and tampered credential cases.
fn token_scenarios(prefix: &str, endpoint: &Arc<EndpointDescriptor>) -> [Scenario; 2] {
    [
        failure(format!("{prefix}.missing_token"), endpoint, LotteryStatus::AccessTokenError)
            .describe("Authorization header removed")
            .with_overrides(RequestOverrides::new().remove_header("Authorization")),
        failure(format!("{prefix}.wrong_token"), endpoint, LotteryStatus::AccessTokenError)
            .describe("credential with a tampered suffix")
            .with_overrides(
                RequestOverrides::new().set_header("Authorization", TAMPERED_AUTHORIZATION),
            ),
    ]
}

/// Missing-input and out-of-range cases shared by the update endpoints.
fn update_scenarios(prefix: &str, endpoint: &Arc<EndpointDescriptor>, id: &str) -> [Scenario; 4] {
    [
        failure(format!("{prefix}.empty_query"), endpoint, LotteryStatus::QueryRequiredError)
            .describe("query string emptied")
            .with_overrides(RequestOverrides::new().empty_query()),
        failure(format!("{prefix}.empty_body"), endpoint, LotteryStatus::QueryRequiredError)
            .describe("body sent as {}")
            .with_overrides(RequestOverrides::new().empty_body()),
        failure(format!("{prefix}.missing_{id}"), endpoint, LotteryStatus::QueryRequiredError)
            .describe(format!("{id} removed"))
            .with_overrides(RequestOverrides::new().remove_query(id)),
        failure(format!("{prefix}.negative_{id}"), endpoint, LotteryStatus::InputValueInvalidError)
            .describe(format!("{id} is negative"))
            .with_overrides(RequestOverrides::new().set_query(id, -200)),
    ]
}

/// Scenario expecting a success contract.
fn success(id: &str, endpoint: &Arc<EndpointDescriptor>, contract: &str) -> Scenario {
    Scenario::new(id, Arc::clone(endpoint), StatusCategory::Success, contract)
}

/// Scenario expecting the error contract for `kind`.
fn failure(
    id: impl Into<String>,
    endpoint: &Arc<EndpointDescriptor>,
    kind: LotteryStatus,
) -> Scenario {
    Scenario::new(id.into(), Arc::clone(endpoint), StatusCategory::Failure, kind.contract())
}
