// crates/lottery-harness-contract/src/schemas.rs
// ============================================================================
// Module: Lottery Contract Schemas
// Description: Shape descriptors for every lottery envelope.
// Purpose: Declare the success and error contracts asserted by the suite.
// Dependencies: lottery-harness-core
// ============================================================================

//! ## Overview
//! Every envelope pins `code` and `message` to the [`StatusCatalog`] entry
//! for its outcome, so a payload can only satisfy one contract. Success
//! envelopes additionally describe `data`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use lottery_harness_core::ContractRegistry;
use lottery_harness_core::ContractSchema;
use lottery_harness_core::FieldRule;
use lottery_harness_core::FieldType;
use lottery_harness_core::RegistryError;
use lottery_harness_core::StatusCategory;

use crate::status::LotteryStatus;
use crate::status::StatusCatalog;

// ============================================================================
// SECTION: Contract Names
// ============================================================================

/// Credential missing or wrong.
pub const ACCESS_TOKEN_ERROR: &str = "access-token-error";
/// Required parameter missing.
pub const QUERY_REQUIRED_ERROR: &str = "query-required-error";
/// Parameter with the wrong type or range.
pub const INPUT_VALUE_INVALID_ERROR: &str = "input-value-invalid-error";
/// Member holds no discount.
pub const MEMBER_NO_DISCOUNT_ERROR: &str = "member-no-discount-error";
/// Discounts of one event.
pub const LOTTERY_EVENT_LIST: &str = "lottery-event-list";
/// Discounts of one member.
pub const LOTTERY_MEMBER_LIST: &str = "lottery-member-list";
/// Inventory update result.
pub const LOTTERY_INVENTORY_UPDATE: &str = "lottery-inventory-update";
/// Receive update result.
pub const LOTTERY_RECEIVE_UPDATE: &str = "lottery-receive-update";
/// Admin lottery listing.
pub const ADMIN_LOTTERY_LIST: &str = "admin-lottery-list";

/// Lifecycle states of a lottery event.
pub const LOTTERY_STATUSES: [&str; 4] = ["pending", "ongoing", "cancelled", "finished"];

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Returns every lottery schema, errors first.
#[must_use]
pub fn lottery_schemas(catalog: &StatusCatalog) -> Vec<ContractSchema> {
    let mut schemas: Vec<ContractSchema> =
        LotteryStatus::ALL.iter().map(|kind| error_schema(catalog, *kind)).collect();
    schemas.extend([
        event_list_schema(catalog),
        member_list_schema(catalog),
        inventory_update_schema(catalog),
        receive_update_schema(catalog),
        admin_list_schema(catalog),
    ]);
    schemas
}

/// Builds a registry holding every lottery schema.
///
/// # Errors
///
/// Returns [`RegistryError::Duplicate`] if two schemas share a name.
pub fn lottery_registry(catalog: &StatusCatalog) -> Result<ContractRegistry, RegistryError> {
    let mut registry = ContractRegistry::new();
    for schema in lottery_schemas(catalog) {
        registry.register(schema)?;
    }
    Ok(registry)
}

/// Error envelope: `{code, message}` pinned to one catalog entry.
fn error_schema(catalog: &StatusCatalog, kind: LotteryStatus) -> ContractSchema {
    let entry = catalog.entry(kind);
    ContractSchema::new(kind.contract(), StatusCategory::Failure)
        .field(FieldRule::required("code", FieldType::Integer).exactly(entry.code))
        .field(FieldRule::required("message", FieldType::String).exactly(entry.message))
}

/// Success envelope header with the given message.
fn success_schema(catalog: &StatusCatalog, name: &str, message: &str) -> ContractSchema {
    ContractSchema::new(name, StatusCategory::Success)
        .field(FieldRule::required("code", FieldType::Integer).exactly(catalog.success()))
        .field(FieldRule::required("message", FieldType::String).exactly(message))
}

/// `GET /lottery/event` success envelope.
fn event_list_schema(catalog: &StatusCatalog) -> ContractSchema {
    success_schema(catalog, LOTTERY_EVENT_LIST, catalog.fetch_success_message()).field(
        FieldRule::required(
            "data",
            FieldType::array_of_objects(vec![
                FieldRule::required("discount_name", FieldType::String),
                FieldRule::required("discount_value", FieldType::Number),
                FieldRule::required("threshold", FieldType::Number),
                FieldRule::required("inventory", FieldType::Integer).non_negative(),
            ]),
        ),
    )
}

/// `GET /lottery/member` success envelope.
fn member_list_schema(catalog: &StatusCatalog) -> ContractSchema {
    success_schema(catalog, LOTTERY_MEMBER_LIST, catalog.fetch_success_message()).field(
        FieldRule::required(
            "data",
            FieldType::array_of_objects(vec![
                FieldRule::required("discount_name", FieldType::String),
                FieldRule::required("discount_value", FieldType::Number),
            ]),
        ),
    )
}

/// `PUT /lottery/inventory` success envelope.
fn inventory_update_schema(catalog: &StatusCatalog) -> ContractSchema {
    success_schema(catalog, LOTTERY_INVENTORY_UPDATE, catalog.update_success_message()).field(
        FieldRule::required(
            "data",
            FieldType::Object(vec![
                FieldRule::required("discount_id", FieldType::Number),
                FieldRule::required("event_id", FieldType::Number),
                FieldRule::required("discount_name", FieldType::String),
                FieldRule::required("inventory", FieldType::Integer).non_negative(),
            ]),
        ),
    )
}

/// `PUT /lottery/receive` success envelope.
fn receive_update_schema(catalog: &StatusCatalog) -> ContractSchema {
    success_schema(catalog, LOTTERY_RECEIVE_UPDATE, catalog.update_success_message()).field(
        FieldRule::required(
            "data",
            FieldType::Object(vec![
                FieldRule::required("lottery_id", FieldType::Number),
                FieldRule::required("member_id", FieldType::Number),
                FieldRule::required("event_id", FieldType::Number),
                FieldRule::required("discount_value", FieldType::Number),
                FieldRule::required("coupon", FieldType::String),
                FieldRule::required("is_receive", FieldType::Boolean),
                FieldRule::required("create_time", FieldType::String),
                FieldRule::required("is_used", FieldType::Boolean),
            ]),
        ),
    )
}

/// `GET /admin/lottery` success envelope; `data` wraps the list.
fn admin_list_schema(catalog: &StatusCatalog) -> ContractSchema {
    let lottery = FieldType::array_of_objects(vec![
        FieldRule::required("event_id", FieldType::Number).positive(),
        FieldRule::required("event_name", FieldType::String),
        FieldRule::required("event_start_time", FieldType::String),
        FieldRule::required("event_end_time", FieldType::String),
        FieldRule::required("is_visible", FieldType::Boolean),
        FieldRule::required("status", FieldType::String).one_of(LOTTERY_STATUSES),
        FieldRule::required("total_inventory", FieldType::Number),
    ]);
    success_schema(catalog, ADMIN_LOTTERY_LIST, catalog.fetch_success_message()).field(
        FieldRule::required(
            "data",
            FieldType::Object(vec![FieldRule::required("lottery", lottery)]),
        ),
    )
}
