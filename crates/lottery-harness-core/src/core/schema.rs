// crates/lottery-harness-core/src/core/schema.rs
// ============================================================================
// Module: Contract Schemas
// Description: Declarative response shapes and their validation walk.
// Purpose: Check presence, type, enumeration, and numeric bounds per field.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ContractSchema`] is an ordered list of [`FieldRule`] entries for the
//! top-level response object. Nested objects and array elements carry their
//! own rules, so one schema can describe the whole `{code, message, data}`
//! envelope.
//!
//! Validation walks every rule in declaration order and appends a
//! [`Violation`] per mismatch. It never short-circuits and never panics, and
//! the same payload always yields the same violations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::core::identifiers::ContractName;
use crate::core::scenario::StatusCategory;
use crate::core::violation::ROOT_PATH;
use crate::core::violation::Violation;
use crate::core::violation::ViolationKind;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// JSON Schema dialect emitted by [`ContractSchema::to_json_schema`].
pub const JSON_SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Declared type of a contract field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "items", rename_all = "snake_case")]
pub enum FieldType {
    /// JSON string.
    String,
    /// Any JSON number.
    Number,
    /// JSON number with no fractional part.
    Integer,
    /// JSON boolean.
    Boolean,
    /// JSON object with nested field rules.
    Object(Vec<FieldRule>),
    /// JSON array whose elements share one type.
    Array(Box<FieldType>),
}

impl FieldType {
    /// Returns the label used in violations and JSON Schema output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
        }
    }

    /// Shorthand for an array of objects with the given rules.
    #[must_use]
    pub fn array_of_objects(fields: Vec<FieldRule>) -> Self {
        Self::Array(Box::new(Self::Object(fields)))
    }
}

/// Numeric lower bound for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericBound {
    /// Value must be `>= 0`.
    NonNegative,
    /// Value must be `> 0`.
    Positive,
}

/// Rule for one named field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRule {
    /// Field name within the enclosing object.
    pub name: String,
    /// Whether the field must be present.
    pub required: bool,
    /// Declared type.
    pub field_type: FieldType,
    /// Optional enumerated value set.
    pub allowed: Option<Vec<Value>>,
    /// Optional numeric bound.
    pub bound: Option<NumericBound>,
}

impl FieldRule {
    /// Creates a required field rule.
    #[must_use]
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            required: true,
            field_type,
            allowed: None,
            bound: None,
        }
    }

    /// Creates an optional field rule.
    #[must_use]
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type)
        }
    }

    /// Restricts the field to an enumerated value set.
    #[must_use]
    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts the field to a single exact value.
    #[must_use]
    pub fn exactly(self, value: impl Into<Value>) -> Self {
        self.one_of([value.into()])
    }

    /// Requires the numeric value to be `>= 0`.
    #[must_use]
    pub const fn non_negative(mut self) -> Self {
        self.bound = Some(NumericBound::NonNegative);
        self
    }

    /// Requires the numeric value to be `> 0`.
    #[must_use]
    pub const fn positive(mut self) -> Self {
        self.bound = Some(NumericBound::Positive);
        self
    }
}

/// Named, schema-validated response shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractSchema {
    /// Contract name (also the fixture key).
    pub name: ContractName,
    /// Status category the contract represents.
    pub category: StatusCategory,
    /// Top-level field rules in declaration order.
    pub fields: Vec<FieldRule>,
}

impl ContractSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new(name: impl Into<ContractName>, category: StatusCategory) -> Self {
        Self {
            name: name.into(),
            category,
            fields: Vec::new(),
        }
    }

    /// Appends a top-level field rule.
    #[must_use]
    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    /// Validates a payload and returns every violation found.
    #[must_use]
    pub fn validate(&self, payload: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();
        match payload {
            Value::Object(map) => check_fields("", &self.fields, map, &mut violations),
            other => violations.push(Violation::new(
                ROOT_PATH,
                ViolationKind::TypeMismatch {
                    expected: "object",
                    found: json_type_name(other),
                },
            )),
        }
        violations
    }

    /// Renders the schema as a JSON Schema (draft 2020-12) document.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut document = object_schema(&self.fields);
        if let Value::Object(map) = &mut document {
            map.insert("$schema".to_string(), Value::String(JSON_SCHEMA_DIALECT.to_string()));
            map.insert("title".to_string(), Value::String(self.name.to_string()));
        }
        document
    }
}

// ============================================================================
// SECTION: Validation Walk
// ============================================================================

/// Checks every rule against an object's fields.
fn check_fields(
    prefix: &str,
    rules: &[FieldRule],
    object: &Map<String, Value>,
    out: &mut Vec<Violation>,
) {
    for rule in rules {
        let path = join_path(prefix, &rule.name);
        match object.get(&rule.name) {
            None if rule.required => out.push(Violation::new(path, ViolationKind::MissingField)),
            None => {}
            Some(value) => check_rule(&path, rule, value, out),
        }
    }
}

/// Checks a present value against its rule.
fn check_rule(path: &str, rule: &FieldRule, value: &Value, out: &mut Vec<Violation>) {
    if !check_type(path, &rule.field_type, value, out) {
        return;
    }
    if let Some(allowed) = &rule.allowed
        && !allowed.iter().any(|candidate| values_equal(candidate, value))
    {
        out.push(Violation::new(
            path,
            ViolationKind::NotAllowed {
                found: value.clone(),
                allowed: allowed.clone(),
            },
        ));
    }
    if let Some(bound) = rule.bound {
        check_bound(path, bound, value, out);
    }
}

/// Checks a value's runtime type, recursing into objects and arrays.
///
/// Returns false when the value itself has the wrong type.
fn check_type(path: &str, field_type: &FieldType, value: &Value, out: &mut Vec<Violation>) -> bool {
    let matches = match (field_type, value) {
        (FieldType::String, Value::String(_))
        | (FieldType::Number, Value::Number(_))
        | (FieldType::Boolean, Value::Bool(_)) => true,
        (FieldType::Integer, Value::Number(_)) => is_integral(value),
        (FieldType::Object(fields), Value::Object(map)) => {
            check_fields(path, fields, map, out);
            true
        }
        (FieldType::Array(element), Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                check_type(&item_path, element, item, out);
            }
            true
        }
        _ => false,
    };
    if !matches {
        out.push(Violation::new(
            path,
            ViolationKind::TypeMismatch {
                expected: field_type.label(),
                found: json_type_name(value),
            },
        ));
    }
    matches
}

/// Checks a numeric lower bound; non-numbers are left to the type check.
fn check_bound(path: &str, bound: NumericBound, value: &Value, out: &mut Vec<Violation>) {
    let Some(number) = value.as_f64() else {
        return;
    };
    match bound {
        NumericBound::NonNegative if number < 0.0 => {
            out.push(Violation::new(
                path,
                ViolationKind::Negative {
                    found: value.clone(),
                },
            ));
        }
        NumericBound::Positive if number <= 0.0 => {
            out.push(Violation::new(
                path,
                ViolationKind::NotPositive {
                    found: value.clone(),
                },
            ));
        }
        _ => {}
    }
}

// ============================================================================
// SECTION: JSON Schema Rendering
// ============================================================================

/// Renders an object schema for a rule list.
fn object_schema(rules: &[FieldRule]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for rule in rules {
        properties.insert(rule.name.clone(), rule_schema(rule));
        if rule.required {
            required.push(Value::String(rule.name.clone()));
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Renders the schema for a single rule.
fn rule_schema(rule: &FieldRule) -> Value {
    let mut schema = type_schema(&rule.field_type);
    if let Value::Object(map) = &mut schema {
        if let Some(allowed) = &rule.allowed {
            map.insert("enum".to_string(), Value::Array(allowed.clone()));
        }
        match rule.bound {
            Some(NumericBound::NonNegative) => {
                map.insert("minimum".to_string(), json!(0));
            }
            Some(NumericBound::Positive) => {
                map.insert("exclusiveMinimum".to_string(), json!(0));
            }
            None => {}
        }
    }
    schema
}

/// Renders the schema for a field type.
fn type_schema(field_type: &FieldType) -> Value {
    match field_type {
        FieldType::Object(fields) => object_schema(fields),
        FieldType::Array(element) => json!({
            "type": "array",
            "items": type_schema(element),
        }),
        scalar => json!({ "type": scalar.label() }),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Joins a field name onto a dotted path.
fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() { name.to_string() } else { format!("{prefix}.{name}") }
}

/// Returns true when a JSON number has no fractional part.
fn is_integral(value: &Value) -> bool {
    match value {
        Value::Number(number) => {
            number.is_i64()
                || number.is_u64()
                || number.as_f64().is_some_and(|float| float.is_finite() && float.fract() == 0.0)
        }
        _ => false,
    }
}

/// Compares JSON values, treating numerically equal numbers as equal.
///
/// Integers compare exactly; floating-point comparison applies only when one
/// side is a float, so large ids never collapse through `f64` rounding.
pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                return a == b;
            }
            if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                return a == b;
            }
            if !a.is_f64() && !b.is_f64() {
                return false;
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => (a - b).abs() < f64::EPSILON,
                _ => false,
            }
        }
        _ => left == right,
    }
}

/// Returns the JSON type name of a value.
#[must_use]
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
