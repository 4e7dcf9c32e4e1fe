// crates/lottery-harness-contract/src/fixtures.rs
// ============================================================================
// Module: Lottery Fixtures
// Description: Canned envelopes for every lottery contract.
// Purpose: Serve fixture-mode runs and seed stub services with valid payloads.
// Dependencies: lottery-harness-core, serde_json
// ============================================================================

//! ## Overview
//! One payload per contract name, built from the [`StatusCatalog`] so that
//! codes and messages always agree with the schemas. Payload builders are
//! public so a stub service can answer live requests with the same shapes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use lottery_harness_core::FixtureError;
use lottery_harness_core::FixtureStore;
use serde_json::Value;
use serde_json::json;

use crate::schemas;
use crate::status::LotteryStatus;
use crate::status::StatusCatalog;

// ============================================================================
// SECTION: Store
// ============================================================================

/// Builds a fixture store holding one payload per lottery contract.
///
/// # Errors
///
/// Returns [`FixtureError::Duplicate`] if two payloads share a contract name.
pub fn lottery_fixtures(catalog: &StatusCatalog) -> Result<FixtureStore, FixtureError> {
    let mut store = FixtureStore::new();
    for kind in LotteryStatus::ALL {
        store.register(kind.contract(), error_payload(catalog, kind))?;
    }
    store.register(schemas::LOTTERY_EVENT_LIST, event_list_payload(catalog))?;
    store.register(schemas::LOTTERY_MEMBER_LIST, member_list_payload(catalog))?;
    store.register(schemas::LOTTERY_INVENTORY_UPDATE, inventory_update_payload(catalog, 1))?;
    store.register(schemas::LOTTERY_RECEIVE_UPDATE, receive_update_payload(catalog, 1))?;
    store.register(schemas::ADMIN_LOTTERY_LIST, admin_list_payload(catalog))?;
    Ok(store)
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Error envelope for `kind`.
#[must_use]
pub fn error_payload(catalog: &StatusCatalog, kind: LotteryStatus) -> Value {
    let entry = catalog.entry(kind);
    json!({"code": entry.code, "message": entry.message})
}

/// Discounts offered by an event.
#[must_use]
pub fn event_list_payload(catalog: &StatusCatalog) -> Value {
    json!({
        "code": catalog.success(),
        "message": catalog.fetch_success_message(),
        "data": [
            {"discount_name": "九折優惠", "discount_value": 0.9, "threshold": 500, "inventory": 120},
            {"discount_name": "滿千折百", "discount_value": 100, "threshold": 1000, "inventory": 35},
            {"discount_name": "免運費", "discount_value": 60, "threshold": 0, "inventory": 0}
        ]
    })
}

/// Discounts held by a member.
#[must_use]
pub fn member_list_payload(catalog: &StatusCatalog) -> Value {
    json!({
        "code": catalog.success(),
        "message": catalog.fetch_success_message(),
        "data": [
            {"discount_name": "九折優惠", "discount_value": 0.9},
            {"discount_name": "免運費", "discount_value": 60}
        ]
    })
}

/// Inventory update result echoing `discount_id`.
#[must_use]
pub fn inventory_update_payload(catalog: &StatusCatalog, discount_id: i64) -> Value {
    json!({
        "code": catalog.success(),
        "message": catalog.update_success_message(),
        "data": {
            "discount_id": discount_id,
            "event_id": 1,
            "discount_name": "九折優惠",
            "inventory": 119
        }
    })
}

/// Receive update result echoing `lottery_id`.
#[must_use]
pub fn receive_update_payload(catalog: &StatusCatalog, lottery_id: i64) -> Value {
    json!({
        "code": catalog.success(),
        "message": catalog.update_success_message(),
        "data": {
            "lottery_id": lottery_id,
            "member_id": 1,
            "event_id": 1,
            "discount_value": 0.9,
            "coupon": "LOTTERY-9F3K2",
            "is_receive": true,
            "create_time": "2023-03-01T08:00:00.000Z",
            "is_used": false
        }
    })
}

/// Paged admin listing.
#[must_use]
pub fn admin_list_payload(catalog: &StatusCatalog) -> Value {
    json!({
        "code": catalog.success(),
        "message": catalog.fetch_success_message(),
        "data": {
            "lottery": [
                {
                    "event_id": 1,
                    "event_name": "春季抽獎",
                    "event_start_time": "2023-03-01T00:00:00.000Z",
                    "event_end_time": "2023-03-31T23:59:59.000Z",
                    "is_visible": true,
                    "status": "ongoing",
                    "total_inventory": 155
                },
                {
                    "event_id": 2,
                    "event_name": "週年慶抽獎",
                    "event_start_time": "2023-10-01T00:00:00.000Z",
                    "event_end_time": "2023-10-15T23:59:59.000Z",
                    "is_visible": false,
                    "status": "pending",
                    "total_inventory": 300
                }
            ]
        }
    })
}
