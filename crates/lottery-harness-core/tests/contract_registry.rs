// crates/lottery-harness-core/tests/contract_registry.rs
// ============================================================================
// Module: Contract Registry Tests
// Description: Schema validation walk, registry lookups, and JSON Schema parity.
// Purpose: Ensure violations are complete, ordered, and deterministic.
// ============================================================================
//! ## Overview
//! Exercises presence, type, enumeration, and bound checks, then confirms the
//! JSON Schema rendering accepts and rejects the same payloads.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use jsonschema::Draft;
use lottery_harness_core::ContractName;
use lottery_harness_core::ContractSchema;
use lottery_harness_core::FieldRule;
use lottery_harness_core::FieldType;
use lottery_harness_core::RegistryError;
use lottery_harness_core::StatusCategory;
use lottery_harness_core::Violation;
use lottery_harness_core::ViolationKind;
use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;

use crate::common::WIDGET_LIST;
use crate::common::widget_error_schema;
use crate::common::widget_list_payload;
use crate::common::widget_list_schema;
use crate::common::widget_registry;

fn paths(violations: &[Violation]) -> Vec<&str> {
    violations.iter().map(|violation| violation.path.as_str()).collect()
}

// ============================================================================
// SECTION: Validation Walk
// ============================================================================

#[test]
fn valid_payload_has_no_violations() {
    assert!(widget_list_schema().validate(&widget_list_payload()).is_empty());
}

#[test]
fn integral_float_satisfies_integer_rule() {
    let mut payload = widget_list_payload();
    payload["data"][0]["stock"] = json!(3.0);
    assert!(widget_list_schema().validate(&payload).is_empty());
}

#[test]
fn missing_required_field_is_reported() {
    let mut payload = widget_list_payload();
    payload.as_object_mut().unwrap().remove("data");
    let violations = widget_list_schema().validate(&payload);
    assert_eq!(violations, vec![Violation::new("data", ViolationKind::MissingField)]);
}

#[test]
fn negative_inventory_is_reported_with_element_path() {
    let mut payload = widget_list_payload();
    payload["data"][1]["stock"] = json!(-1);
    let violations = widget_list_schema().validate(&payload);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path, "data[1].stock");
    assert_eq!(violations[0].kind, ViolationKind::Negative { found: json!(-1) });
}

#[test]
fn fractional_number_fails_integer_rule() {
    let mut payload = widget_list_payload();
    payload["data"][0]["stock"] = json!(1.5);
    let violations = widget_list_schema().validate(&payload);
    assert_eq!(
        violations,
        vec![Violation::new(
            "data[0].stock",
            ViolationKind::TypeMismatch {
                expected: "integer",
                found: "number"
            }
        )]
    );
}

#[test]
fn value_outside_enumeration_is_reported() {
    let mut payload = widget_list_payload();
    payload["data"][0]["kind"] = json!("medium");
    let violations = widget_list_schema().validate(&payload);
    assert_eq!(paths(&violations), vec!["data[0].kind"]);
    assert!(matches!(violations[0].kind, ViolationKind::NotAllowed { .. }));
}

#[test]
fn present_null_optional_field_is_a_type_mismatch() {
    let mut payload = widget_list_payload();
    payload["data"][1]["kind"] = Value::Null;
    let violations = widget_list_schema().validate(&payload);
    assert_eq!(
        violations,
        vec![Violation::new(
            "data[1].kind",
            ViolationKind::TypeMismatch {
                expected: "string",
                found: "null"
            }
        )]
    );
}

#[test]
fn non_object_root_is_reported_at_root() {
    let violations = widget_list_schema().validate(&json!([1, 2]));
    assert_eq!(paths(&violations), vec!["$"]);
}

#[test]
fn every_violation_is_collected_in_document_order() {
    let payload = json!({
        "code": 500,
        "data": [
            {"name": 5, "stock": 2},
            {"name": "gear", "stock": -2, "kind": "huge"},
            "not-an-object"
        ]
    });
    let violations = widget_list_schema().validate(&payload);
    assert_eq!(
        paths(&violations),
        vec!["code", "message", "data[0].name", "data[1].stock", "data[1].kind", "data[2]"]
    );
}

#[test]
fn positive_bound_rejects_zero() {
    let schema = ContractSchema::new("ids", StatusCategory::Success)
        .field(FieldRule::required("id", FieldType::Integer).positive());
    assert!(schema.validate(&json!({"id": 1})).is_empty());
    let violations = schema.validate(&json!({"id": 0}));
    assert_eq!(violations[0].kind, ViolationKind::NotPositive { found: json!(0) });
}

#[test]
fn enumerated_integers_compare_exactly_beyond_f64_precision() {
    let schema = ContractSchema::new("ids", StatusCategory::Success)
        .field(FieldRule::required("id", FieldType::Integer).exactly(9_007_199_254_740_993_u64));
    assert!(schema.validate(&json!({"id": 9_007_199_254_740_993_u64})).is_empty());
    let violations = schema.validate(&json!({"id": 9_007_199_254_740_992_u64}));
    assert_eq!(paths(&violations), vec!["id"]);
    assert!(matches!(violations[0].kind, ViolationKind::NotAllowed { .. }));
}

#[test]
fn enumerated_integer_matches_integral_float() {
    let schema = ContractSchema::new("codes", StatusCategory::Success)
        .field(FieldRule::required("code", FieldType::Integer).exactly(200));
    assert!(schema.validate(&json!({"code": 200.0})).is_empty());
    assert!(!schema.validate(&json!({"code": -200})).is_empty());
}

#[test]
fn violation_display_names_path_and_reason() {
    let violation = Violation::new("data[0].stock", ViolationKind::Negative { found: json!(-3) });
    assert_eq!(violation.to_string(), "data[0].stock: -3 must be >= 0");
}

// ============================================================================
// SECTION: Registry
// ============================================================================

#[test]
fn registry_validates_by_name() {
    let registry = widget_registry();
    let violations =
        registry.validate(&ContractName::new(WIDGET_LIST), &widget_list_payload()).unwrap();
    assert!(violations.is_empty());
    assert_eq!(registry.len(), 2);
}

#[test]
fn registry_rejects_unknown_names() {
    let registry = widget_registry();
    let err = registry.validate(&ContractName::new("nope"), &json!({})).unwrap_err();
    assert_eq!(err, RegistryError::UnknownSchema("nope".to_string()));
}

#[test]
fn registry_rejects_duplicate_names() {
    let mut registry = widget_registry();
    let err = registry.register(widget_error_schema()).unwrap_err();
    assert!(matches!(err, RegistryError::Duplicate(_)));
}

// ============================================================================
// SECTION: JSON Schema Parity
// ============================================================================

fn compile(schema: &ContractSchema) -> jsonschema::Validator {
    jsonschema::options().with_draft(Draft::Draft202012).build(&schema.to_json_schema()).unwrap()
}

#[test]
fn json_schema_rendering_agrees_with_validator() {
    let schema = widget_list_schema();
    let validator = compile(&schema);
    let mut samples = vec![widget_list_payload(), json!({}), json!("text"), json!({"code": 200})];
    for (pointer, replacement) in [
        ("/data/0/stock", json!(-1)),
        ("/data/0/stock", json!(2.5)),
        ("/data/0/kind", json!("medium")),
        ("/data/0/kind", Value::Null),
        ("/code", json!(201)),
        ("/message", json!(7)),
    ] {
        let mut payload = widget_list_payload();
        *payload.pointer_mut(pointer).unwrap() = replacement;
        samples.push(payload);
    }

    for sample in &samples {
        assert_eq!(
            validator.is_valid(sample),
            schema.validate(sample).is_empty(),
            "disagreement on {sample}"
        );
    }
}

#[test]
fn json_schema_rendering_declares_dialect_and_title() {
    let document = widget_list_schema().to_json_schema();
    assert_eq!(document["$schema"], json!("https://json-schema.org/draft/2020-12/schema"));
    assert_eq!(document["title"], json!(WIDGET_LIST));
    assert_eq!(document["required"], json!(["code", "message", "data"]));
    assert_eq!(document["properties"]["data"]["items"]["properties"]["stock"]["minimum"], json!(0));
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn validation_is_idempotent_and_tracks_stock_sign(
        name in "[a-z]{0,12}",
        stock in any::<i64>(),
        kind in prop::option::of(prop::sample::select(vec!["small", "large", "huge"])),
    ) {
        let mut item = json!({"name": name, "stock": stock});
        if let Some(kind) = kind {
            item["kind"] = json!(kind);
        }
        let payload = json!({"code": 200, "message": "ok", "data": [item]});
        let schema = widget_list_schema();

        let first = schema.validate(&payload);
        let second = schema.validate(&payload);
        prop_assert_eq!(&first, &second);

        let expected_valid = stock >= 0 && kind != Some("huge");
        prop_assert_eq!(first.is_empty(), expected_valid);
    }
}
