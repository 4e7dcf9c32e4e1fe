// crates/lottery-harness-core/src/core/overrides.rs
// ============================================================================
// Module: Request Overrides
// Description: Per-scenario deltas layered over endpoint defaults.
// Purpose: Keep "key absent" and "key present with a bad value" distinct.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each request section (query, body, headers, path parameters) gets a
//! [`SectionOverrides`]: a [`SectionBase`] that picks the starting map and an
//! ordered list of [`FieldPatch`] edits. `Remove` deletes a key from the
//! outgoing request; `Set` replaces or adds it. The target service reports a
//! missing key and a wrong-typed key with different error codes, so the two
//! edits must never collapse into one another.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::endpoint::FieldMap;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Edit applied to one request field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum FieldPatch {
    /// Sets the field to the given value; the override wins over defaults.
    Set(Value),
    /// Deletes the field from the outgoing request.
    Remove,
}

/// Starting point for a request section before patches apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionBase {
    /// Start from the endpoint defaults.
    #[default]
    Inherit,
    /// Start from an empty map (an empty body is still sent as `{}`).
    Empty,
    /// Omit the section entirely; patches are ignored.
    Absent,
}

/// Overrides for a single request section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionOverrides {
    /// Starting map selection.
    #[serde(default)]
    pub base: SectionBase,
    /// Ordered field edits.
    #[serde(default)]
    pub patches: Vec<(String, FieldPatch)>,
}

impl SectionOverrides {
    /// Returns true when the section leaves the defaults untouched.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.base == SectionBase::Inherit && self.patches.is_empty()
    }

    /// Merges this section over the given defaults.
    ///
    /// Returns `None` when the section is absent from the outgoing request.
    #[must_use]
    pub fn apply(&self, defaults: Option<&FieldMap>) -> Option<FieldMap> {
        let mut merged = match self.base {
            SectionBase::Inherit => defaults.cloned(),
            SectionBase::Empty => Some(FieldMap::new()),
            SectionBase::Absent => return None,
        };
        if self.patches.is_empty() {
            return merged;
        }
        let map = merged.get_or_insert_with(FieldMap::new);
        for (name, patch) in &self.patches {
            match patch {
                FieldPatch::Set(value) => {
                    map.insert(name.clone(), value.clone());
                }
                FieldPatch::Remove => {
                    map.remove(name);
                }
            }
        }
        merged
    }

    /// Appends a patch.
    fn push(&mut self, name: impl Into<String>, patch: FieldPatch) {
        self.patches.push((name.into(), patch));
    }
}

/// Overrides for every request section of one scenario.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestOverrides {
    /// Query parameter overrides.
    #[serde(default)]
    pub query: SectionOverrides,
    /// JSON body overrides.
    #[serde(default)]
    pub body: SectionOverrides,
    /// Header overrides.
    #[serde(default)]
    pub headers: SectionOverrides,
    /// Path parameter overrides.
    #[serde(default)]
    pub path_params: SectionOverrides,
}

impl RequestOverrides {
    /// Creates overrides that leave every default untouched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no section changes the defaults.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.query.is_identity()
            && self.body.is_identity()
            && self.headers.is_identity()
            && self.path_params.is_identity()
    }

    /// Sets a query parameter.
    #[must_use]
    pub fn set_query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.push(name, FieldPatch::Set(value.into()));
        self
    }

    /// Deletes a query parameter from the outgoing request.
    #[must_use]
    pub fn remove_query(mut self, name: impl Into<String>) -> Self {
        self.query.push(name, FieldPatch::Remove);
        self
    }

    /// Starts the query from an empty map.
    #[must_use]
    pub fn empty_query(mut self) -> Self {
        self.query.base = SectionBase::Empty;
        self
    }

    /// Omits the query string entirely.
    #[must_use]
    pub fn omit_query(mut self) -> Self {
        self.query = SectionOverrides {
            base: SectionBase::Absent,
            patches: Vec::new(),
        };
        self
    }

    /// Sets a body field.
    #[must_use]
    pub fn set_body(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.push(name, FieldPatch::Set(value.into()));
        self
    }

    /// Deletes a body field.
    #[must_use]
    pub fn remove_body(mut self, name: impl Into<String>) -> Self {
        self.body.push(name, FieldPatch::Remove);
        self
    }

    /// Sends `{}` as the body.
    #[must_use]
    pub fn empty_body(mut self) -> Self {
        self.body.base = SectionBase::Empty;
        self
    }

    /// Sends no body at all.
    #[must_use]
    pub fn omit_body(mut self) -> Self {
        self.body = SectionOverrides {
            base: SectionBase::Absent,
            patches: Vec::new(),
        };
        self
    }

    /// Sets a header value (may use `{access_token}`).
    #[must_use]
    pub fn set_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(name, FieldPatch::Set(Value::String(value.into())));
        self
    }

    /// Deletes a header from the outgoing request.
    #[must_use]
    pub fn remove_header(mut self, name: impl Into<String>) -> Self {
        self.headers.push(name, FieldPatch::Remove);
        self
    }

    /// Sets a path parameter.
    #[must_use]
    pub fn set_path_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.path_params.push(name, FieldPatch::Set(value.into()));
        self
    }
}
