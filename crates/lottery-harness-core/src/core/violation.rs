// crates/lottery-harness-core/src/core/violation.rs
// ============================================================================
// Module: Contract Violations
// Description: Field-level mismatches found while checking a scenario.
// Purpose: Report every mismatch with its location and reason.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Violation`] pairs a field path (for example `data[2].inventory`) with
//! a [`ViolationKind`]. Validation collects violations instead of stopping
//! at the first one, so a failing report lists everything that was wrong.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Path used for violations that concern the whole payload.
pub const ROOT_PATH: &str = "$";

/// Reason a field failed its contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is absent.
    MissingField,
    /// The runtime type differs from the declared type.
    TypeMismatch {
        /// Declared type.
        expected: &'static str,
        /// Observed JSON type.
        found: &'static str,
    },
    /// The value is outside the declared enumeration.
    NotAllowed {
        /// Observed value.
        found: Value,
        /// Declared value set.
        allowed: Vec<Value>,
    },
    /// A non-negative field holds a negative number.
    Negative {
        /// Observed value.
        found: Value,
    },
    /// A positive field holds zero or a negative number.
    NotPositive {
        /// Observed value.
        found: Value,
    },
    /// The transport answered with an unexpected status.
    TransportStatus {
        /// Expected status.
        expected: u16,
        /// Observed status.
        found: u16,
    },
    /// The transport failed before a response was received.
    TransportFailure {
        /// Failure description.
        message: String,
    },
    /// No response body was received.
    MissingBody,
    /// A response field does not echo the request value.
    EchoMismatch {
        /// Request value.
        expected: Value,
        /// Response value, if present.
        found: Option<Value>,
    },
}

/// A field-level contract mismatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Location of the field within the body.
    pub path: String,
    /// Reason the field failed.
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    /// Creates a violation at the given path.
    #[must_use]
    pub fn new(path: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::MissingField => write!(f, "{}: required field is missing", self.path),
            ViolationKind::TypeMismatch {
                expected,
                found,
            } => write!(f, "{}: expected {expected}, found {found}", self.path),
            ViolationKind::NotAllowed {
                found,
                allowed,
            } => {
                let allowed =
                    allowed.iter().map(Value::to_string).collect::<Vec<String>>().join(", ");
                write!(f, "{}: {found} is not one of [{allowed}]", self.path)
            }
            ViolationKind::Negative {
                found,
            } => write!(f, "{}: {found} must be >= 0", self.path),
            ViolationKind::NotPositive {
                found,
            } => write!(f, "{}: {found} must be > 0", self.path),
            ViolationKind::TransportStatus {
                expected,
                found,
            } => write!(f, "{}: transport status {found}, expected {expected}", self.path),
            ViolationKind::TransportFailure {
                message,
            } => write!(f, "{}: transport failure: {message}", self.path),
            ViolationKind::MissingBody => write!(f, "{}: response body is empty", self.path),
            ViolationKind::EchoMismatch {
                expected,
                found: Some(found),
            } => write!(f, "{}: expected echo of {expected}, found {found}", self.path),
            ViolationKind::EchoMismatch {
                expected,
                found: None,
            } => write!(f, "{}: expected echo of {expected}, field is missing", self.path),
        }
    }
}
