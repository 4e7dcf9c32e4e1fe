// crates/lottery-harness-core/src/interfaces/mod.rs
// ============================================================================
// Module: Lottery Harness Interfaces
// Description: Transport seam between the harness and an HTTP client.
// Purpose: Keep the runtime free of any concrete HTTP implementation.
// Dependencies: crate::core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The runtime builds a [`PreparedRequest`] and hands it to a [`Transport`].
//! Implementations only move bytes: they report the status and raw body and
//! leave JSON parsing and contract checks to the harness. Implementations
//! must enforce their own timeout and size limits and fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::endpoint::HttpMethod;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Replacement for credential-bearing header values in logs.
pub const REDACTED: &str = "<redacted>";

/// Header names whose values are redacted.
const SENSITIVE_HEADERS: &[&str] = &["authorization", "access_token", "cookie"];

// ============================================================================
// SECTION: Requests and Responses
// ============================================================================

/// Fully rendered request ready for the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub url: String,
    /// Header values after placeholder rendering.
    pub headers: BTreeMap<String, String>,
    /// Wire-encoded query pairs in key order.
    pub query: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl PreparedRequest {
    /// Returns a copy with credential headers replaced by [`REDACTED`].
    #[must_use]
    pub fn redacted(&self) -> Self {
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| {
                let sensitive = SENSITIVE_HEADERS
                    .iter()
                    .any(|candidate| name.eq_ignore_ascii_case(candidate));
                let value = if sensitive { REDACTED.to_string() } else { value.clone() };
                (name.clone(), value)
            })
            .collect();
        Self {
            headers,
            ..self.clone()
        }
    }
}

/// Raw response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Transport errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Request could not be built (bad URL, bad header).
    #[error("request build error: {0}")]
    Build(String),
    /// Connection or protocol failure.
    #[error("request error: {0}")]
    Request(String),
    /// Request exceeded the timeout.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Response body could not be read or exceeded limits.
    #[error("response body error: {0}")]
    Body(String),
}

/// Sends prepared requests to the service under test.
pub trait Transport: Send + Sync {
    /// Sends a request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no complete response was received.
    fn send(&self, request: &PreparedRequest) -> Result<TransportResponse, TransportError>;
}
