// crates/lottery-harness-core/src/core/endpoint.rs
// ============================================================================
// Module: Endpoint Descriptors
// Description: Immutable request defaults for one endpoint under contract.
// Purpose: Define method, path template, headers, query, and body defaults.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! An [`EndpointDescriptor`] is built once per endpoint and shared by every
//! scenario that targets it. Scenarios never edit a descriptor; they layer
//! [`crate::RequestOverrides`] on top of its defaults at invocation time.
//!
//! Header values may contain the `{access_token}` placeholder and path
//! templates may contain `{name}` placeholders filled from path parameters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::EndpointId;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Ordered map of request field names to JSON values.
pub type FieldMap = BTreeMap<String, Value>;

/// HTTP method supported by the harness transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
}

impl HttpMethod {
    /// Returns the canonical method token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request defaults for one endpoint under contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Endpoint identifier.
    pub id: EndpointId,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template relative to the configured base URL.
    pub path: String,
    /// Default headers (values may use `{access_token}`).
    #[serde(default)]
    pub headers: FieldMap,
    /// Default query parameters.
    #[serde(default)]
    pub query: FieldMap,
    /// Default path parameters for `{name}` placeholders.
    #[serde(default)]
    pub path_params: FieldMap,
    /// Default JSON object body, if the endpoint takes one.
    #[serde(default)]
    pub body: Option<FieldMap>,
}

impl EndpointDescriptor {
    /// Creates a descriptor with no default headers, query, or body.
    #[must_use]
    pub fn new(id: impl Into<EndpointId>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            method,
            path: path.into(),
            headers: FieldMap::new(),
            query: FieldMap::new(),
            path_params: FieldMap::new(),
            body: None,
        }
    }

    /// Adds a default header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), Value::String(value.into()));
        self
    }

    /// Adds the `Authorization: Bearer {access_token}` default header.
    #[must_use]
    pub fn with_bearer_auth(self) -> Self {
        self.with_header("Authorization", "Bearer {access_token}")
    }

    /// Adds a default query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Adds a default path parameter.
    #[must_use]
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    /// Adds a default body field, creating the body when absent.
    #[must_use]
    pub fn with_body_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.get_or_insert_with(FieldMap::new).insert(name.into(), value.into());
        self
    }

    /// Returns a short `METHOD path` label for reports.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}
