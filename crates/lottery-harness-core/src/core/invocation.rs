// crates/lottery-harness-core/src/core/invocation.rs
// ============================================================================
// Module: Invocation Results
// Description: Normalized outcome of a live call or a fixture lookup.
// Purpose: Give the runner one shape to validate regardless of mode.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! An [`InvocationResult`] is produced and consumed within one scenario run.
//! Transport failures are folded in as a sentinel status with no body, so a
//! flaky network call shows up as a failed assertion instead of an abort.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::core::endpoint::FieldMap;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Sentinel status recorded when the transport fails before a response.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;
/// Status reported for fixture lookups.
pub const FIXTURE_STATUS: u16 = 200;
/// Transport status the target service uses for every domain outcome.
pub const EXPECTED_TRANSPORT_STATUS: u16 = 200;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Where an invocation result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationSource {
    /// A real request through the transport.
    Live,
    /// A canned payload from the fixture store.
    Fixture,
}

/// Request fields after overrides were merged, before wire encoding.
///
/// Credential headers are redacted so the value is safe to log.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResolvedRequest {
    /// Absolute URL without the query string.
    pub url: String,
    /// Final path after placeholder rendering.
    pub path: String,
    /// Redacted header values.
    pub headers: BTreeMap<String, String>,
    /// Query parameters, or `None` when omitted.
    pub query: Option<FieldMap>,
    /// JSON body fields, or `None` when no body is sent.
    pub body: Option<FieldMap>,
    /// Path parameters used for rendering.
    pub path_params: FieldMap,
}

/// Normalized outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationResult {
    /// Result origin.
    pub source: InvocationSource,
    /// Transport status, or [`TRANSPORT_FAILURE_STATUS`].
    pub status: u16,
    /// Parsed JSON body, if any.
    pub body: Option<Value>,
    /// Transport failure description, if the call did not complete.
    pub failure: Option<String>,
    /// Merged request fields. Fixture results carry the request the scenario
    /// would have sent.
    #[serde(skip)]
    pub request: Option<ResolvedRequest>,
}

impl InvocationResult {
    /// Builds a result for a fixture payload.
    #[must_use]
    pub const fn fixture(payload: Value, request: ResolvedRequest) -> Self {
        Self {
            source: InvocationSource::Fixture,
            status: FIXTURE_STATUS,
            body: Some(payload),
            failure: None,
            request: Some(request),
        }
    }

    /// Builds a result for a completed live response.
    #[must_use]
    pub const fn live(status: u16, body: Option<Value>, request: ResolvedRequest) -> Self {
        Self {
            source: InvocationSource::Live,
            status,
            body,
            failure: None,
            request: Some(request),
        }
    }

    /// Builds a degraded result for a call that never produced a response.
    #[must_use]
    pub fn failed(
        source: InvocationSource,
        message: impl Into<String>,
        request: Option<ResolvedRequest>,
    ) -> Self {
        Self {
            source,
            status: TRANSPORT_FAILURE_STATUS,
            body: None,
            failure: Some(message.into()),
            request,
        }
    }

    /// Returns true when the call did not complete.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}
