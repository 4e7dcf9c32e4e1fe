// crates/lottery-harness-core/src/runtime/invoker.rs
// ============================================================================
// Module: Request Invoker
// Description: Builds and sends one HTTP request per scenario.
// Purpose: Merge overrides, render placeholders, and absorb transport errors.
// Dependencies: crate::{core, interfaces}, serde_json
// ============================================================================

//! ## Overview
//! The invoker merges a scenario's [`RequestOverrides`] onto the endpoint
//! defaults, renders `{access_token}` and `{name}` placeholders, encodes the
//! query for the wire, and sends the request through a [`Transport`].
//!
//! Invariants:
//! - A transport error or a non-JSON body never escapes; it becomes an
//!   [`InvocationResult`] with [`crate::TRANSPORT_FAILURE_STATUS`].
//! - An empty body keeps the status and yields `body: None`.
//! - The resolved request recorded on the result carries redacted headers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::core::EndpointDescriptor;
use crate::core::FieldMap;
use crate::core::InvocationResult;
use crate::core::InvocationSource;
use crate::core::RequestOverrides;
use crate::core::ResolvedRequest;
use crate::interfaces::PreparedRequest;
use crate::interfaces::Transport;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header placeholder replaced by the configured bearer credential.
pub const ACCESS_TOKEN_PLACEHOLDER: &str = "{access_token}";

// ============================================================================
// SECTION: Invoker
// ============================================================================

/// Sends scenario requests through a transport.
pub struct RequestInvoker {
    /// Base URL without a trailing slash.
    base_url: String,
    /// Bearer credential substituted into headers.
    access_token: Option<String>,
    /// Transport used for every request.
    transport: Arc<dyn Transport>,
}

impl RequestInvoker {
    /// Creates an invoker for the given base URL and credential.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        access_token: Option<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            access_token,
            transport,
        }
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Merges overrides onto the descriptor and renders the wire request.
    #[must_use]
    pub fn prepare(
        &self,
        descriptor: &EndpointDescriptor,
        overrides: &RequestOverrides,
    ) -> (PreparedRequest, ResolvedRequest) {
        prepare_request(&self.base_url, self.access_token.as_deref(), descriptor, overrides)
    }

    /// Sends the merged request and normalizes the outcome.
    #[must_use]
    pub fn invoke(
        &self,
        descriptor: &EndpointDescriptor,
        overrides: &RequestOverrides,
    ) -> InvocationResult {
        let (prepared, resolved) = self.prepare(descriptor, overrides);
        let response = match self.transport.send(&prepared) {
            Ok(response) => response,
            Err(err) => {
                return InvocationResult::failed(
                    InvocationSource::Live,
                    err.to_string(),
                    Some(resolved),
                );
            }
        };
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return InvocationResult::live(response.status, None, resolved);
        }
        match serde_json::from_slice::<Value>(&response.body) {
            Ok(body) => InvocationResult::live(response.status, Some(body), resolved),
            Err(err) => InvocationResult::failed(
                InvocationSource::Live,
                format!("response body is not JSON (status {}): {err}", response.status),
                Some(resolved),
            ),
        }
    }
}

// ============================================================================
// SECTION: Request Merging
// ============================================================================

/// Resolves the request a scenario would send, without sending it.
///
/// Used where no transport is involved, such as fixture runs, so that checks
/// against request fields see the same merged values as a live run. The
/// URL is the rendered path and credential headers are redacted.
#[must_use]
pub fn resolve_request(
    descriptor: &EndpointDescriptor,
    overrides: &RequestOverrides,
) -> ResolvedRequest {
    prepare_request("", None, descriptor, overrides).1
}

/// Merges overrides onto the descriptor defaults for `base_url`.
fn prepare_request(
    base_url: &str,
    access_token: Option<&str>,
    descriptor: &EndpointDescriptor,
    overrides: &RequestOverrides,
) -> (PreparedRequest, ResolvedRequest) {
    let query = overrides.query.apply(Some(&descriptor.query));
    let body = overrides.body.apply(descriptor.body.as_ref());
    let path_params =
        overrides.path_params.apply(Some(&descriptor.path_params)).unwrap_or_default();
    let raw_headers = overrides.headers.apply(Some(&descriptor.headers)).unwrap_or_default();

    let headers: BTreeMap<String, String> = raw_headers
        .iter()
        .map(|(name, value)| (name.clone(), render_header(value, access_token)))
        .collect();
    let path = render_path(&descriptor.path, &path_params);
    let url = if path.starts_with('/') || base_url.is_empty() {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}/{path}")
    };
    let query_pairs = query
        .as_ref()
        .map(|map| {
            map.iter().map(|(name, value)| (name.clone(), encode_query_value(value))).collect()
        })
        .unwrap_or_default();

    let prepared = PreparedRequest {
        method: descriptor.method,
        url: url.clone(),
        headers,
        query: query_pairs,
        body: body.as_ref().map(|map| Value::Object(map.clone().into_iter().collect())),
    };
    let resolved = ResolvedRequest {
        url,
        path,
        headers: prepared.redacted().headers,
        query,
        body,
        path_params,
    };
    (prepared, resolved)
}

/// Renders a header value, substituting the credential placeholder.
fn render_header(value: &Value, access_token: Option<&str>) -> String {
    encode_query_value(value).replace(ACCESS_TOKEN_PLACEHOLDER, access_token.unwrap_or_default())
}

// ============================================================================
// SECTION: Encoding
// ============================================================================

/// Encodes a JSON value as a query string value.
///
/// Strings are verbatim, numbers are decimal, booleans are `true`/`false`,
/// null is empty, and arrays and objects are compact JSON.
#[must_use]
pub fn encode_query_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Fills `{name}` placeholders from path parameters.
///
/// Unknown placeholders render as empty strings. An unmatched `{` is copied
/// through unchanged.
fn render_path(template: &str, params: &FieldMap) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        rendered.push_str(&rest[..start]);
        let name = &rest[start + 1..start + len];
        if let Some(value) = params.get(name) {
            rendered.push_str(&encode_query_value(value));
        }
        rest = &rest[start + len + 1..];
    }
    rendered.push_str(rest);
    rendered
}

// ============================================================================
// SECTION: Tests
// ============================================================================
