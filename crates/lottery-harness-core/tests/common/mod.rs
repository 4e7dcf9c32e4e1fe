// crates/lottery-harness-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared transports, sinks, and schemas for core tests.
// Purpose: Exercise the runtime without a network or the lottery catalog.
// Dependencies: lottery-harness-core
// ============================================================================

//! ## Overview
//! Provides a scripted [`MockTransport`] that records every request, an
//! in-memory audit sink, and a small "widget" contract used across tests.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use lottery_harness_core::ContractRegistry;
use lottery_harness_core::ContractSchema;
use lottery_harness_core::EndpointDescriptor;
use lottery_harness_core::FieldRule;
use lottery_harness_core::FieldType;
use lottery_harness_core::HttpMethod;
use lottery_harness_core::PreparedRequest;
use lottery_harness_core::RunAuditSink;
use lottery_harness_core::ScenarioAuditEvent;
use lottery_harness_core::StatusCategory;
use lottery_harness_core::SuiteAuditEvent;
use lottery_harness_core::Transport;
use lottery_harness_core::TransportError;
use lottery_harness_core::TransportFailureAuditEvent;
use lottery_harness_core::TransportResponse;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Scripted reply for the mock transport.
type Responder =
    dyn Fn(&PreparedRequest) -> Result<TransportResponse, TransportError> + Send + Sync;

/// Transport that records requests and answers from a closure.
pub struct MockTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl MockTransport {
    /// Creates a transport that answers every request with the given closure.
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&PreparedRequest) -> Result<TransportResponse, TransportError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a transport that always returns the given JSON with status 200.
    pub fn json(body: Value) -> Self {
        Self::new(move |_| {
            Ok(TransportResponse {
                status: 200,
                body: serde_json::to_vec(&body).unwrap(),
            })
        })
    }

    /// Creates a transport that always fails with the given error.
    pub fn failing(error: TransportError) -> Self {
        Self::new(move |_| Err(error.clone()))
    }

    /// Returns every request seen so far.
    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> PreparedRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &PreparedRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(request)
    }
}

// ============================================================================
// SECTION: Audit Sink
// ============================================================================

/// Audit sink that keeps events in memory.
#[derive(Default)]
pub struct MemoryAuditSink {
    pub scenarios: Mutex<Vec<ScenarioAuditEvent>>,
    pub failures: Mutex<Vec<TransportFailureAuditEvent>>,
    pub suites: Mutex<Vec<SuiteAuditEvent>>,
}

impl RunAuditSink for MemoryAuditSink {
    fn record_scenario(&self, event: &ScenarioAuditEvent) {
        self.scenarios.lock().unwrap().push(event.clone());
    }

    fn record_transport_failure(&self, event: &TransportFailureAuditEvent) {
        self.failures.lock().unwrap().push(event.clone());
    }

    fn record_suite(&self, event: &SuiteAuditEvent) {
        self.suites.lock().unwrap().push(event.clone());
    }
}

// ============================================================================
// SECTION: Sample Contracts
// ============================================================================

pub const WIDGET_LIST: &str = "widget-list";
pub const WIDGET_ERROR: &str = "widget-error";

/// `GET /widgets` with an `id` query default and bearer auth.
pub fn widget_endpoint() -> Arc<EndpointDescriptor> {
    Arc::new(
        EndpointDescriptor::new("widgets", HttpMethod::Get, "/widgets")
            .with_bearer_auth()
            .with_query("id", 1),
    )
}

/// `PUT /widgets/{widget_id}` with a JSON body.
pub fn widget_update_endpoint() -> Arc<EndpointDescriptor> {
    Arc::new(
        EndpointDescriptor::new("widget-update", HttpMethod::Put, "/widgets/{widget_id}")
            .with_bearer_auth()
            .with_path_param("widget_id", 7)
            .with_query("id", 7)
            .with_body_field("enabled", true),
    )
}

/// Success contract: `{code: 200, message, data: [{name, stock >= 0, kind}]}`.
pub fn widget_list_schema() -> ContractSchema {
    ContractSchema::new(WIDGET_LIST, StatusCategory::Success)
        .field(FieldRule::required("code", FieldType::Integer).exactly(200))
        .field(FieldRule::required("message", FieldType::String))
        .field(FieldRule::required(
            "data",
            FieldType::array_of_objects(vec![
                FieldRule::required("name", FieldType::String),
                FieldRule::required("stock", FieldType::Integer).non_negative(),
                FieldRule::optional("kind", FieldType::String).one_of(["small", "large"]),
            ]),
        ))
}

/// Failure contract: `{code: 1001, message}`.
pub fn widget_error_schema() -> ContractSchema {
    ContractSchema::new(WIDGET_ERROR, StatusCategory::Failure)
        .field(FieldRule::required("code", FieldType::Integer).exactly(1001))
        .field(FieldRule::required("message", FieldType::String))
}

pub fn widget_registry() -> ContractRegistry {
    let mut registry = ContractRegistry::new();
    registry.register(widget_list_schema()).unwrap();
    registry.register(widget_error_schema()).unwrap();
    registry
}

pub fn widget_list_payload() -> Value {
    json!({
        "code": 200,
        "message": "ok",
        "data": [
            {"name": "bolt", "stock": 3, "kind": "small"},
            {"name": "gear", "stock": 0}
        ]
    })
}

pub fn widget_error_payload() -> Value {
    json!({"code": 1001, "message": "bad token"})
}
