// system-tests/tests/helpers/lottery_stub.rs
// ============================================================================
// Module: Lottery Service Stub
// Description: Minimal lottery API over tiny_http for live-mode system tests.
// Purpose: Exercise the full live path without a deployed service.
// Dependencies: lottery-harness-contract, tiny_http, url
// ============================================================================

//! ## Overview
//! The stub serves the five lottery endpoints under `/api/v1`. Every answer
//! is HTTP 200 with a JSON envelope. Checks run in a fixed order: credential,
//! then presence of required inputs, then their types and ranges. Payloads
//! come from the contract crate so a conforming run passes in both modes.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use lottery_harness_contract::LotteryStatus;
use lottery_harness_contract::StatusCatalog;
use lottery_harness_contract::fixtures;
use lottery_harness_contract::suite::NO_DISCOUNT_MEMBER_ID;
use serde_json::Value;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;
use url::Url;

/// Path prefix the stub serves.
const API_PREFIX: &str = "/api/v1";

/// One request as the stub received it.
#[derive(Clone, Debug)]
pub struct StubRequest {
    /// HTTP method.
    pub method: String,
    /// Request path without the query string.
    pub path: String,
    /// Decoded query pairs.
    pub query: BTreeMap<String, String>,
    /// Authorization header, if sent.
    pub authorization: Option<String>,
    /// Raw request body.
    pub body: String,
}

/// Shared state for the request loop.
struct StubState {
    /// Credential accepted as `Bearer <token>`.
    token: String,
    /// Status table used for envelopes.
    catalog: StatusCatalog,
    /// Requests in arrival order.
    requests: Mutex<Vec<StubRequest>>,
}

/// Handle for the running stub service. Stops the server on drop.
pub struct LotteryStub {
    /// Base URL including the API prefix.
    base_url: String,
    /// Server shared with the request loop.
    server: Arc<Server>,
    /// Shared state.
    state: Arc<StubState>,
    /// Request loop thread.
    join: Option<thread::JoinHandle<()>>,
}

impl LotteryStub {
    /// Starts a stub with the built-in status table.
    pub fn spawn(token: &str) -> Self {
        Self::spawn_with(token, StatusCatalog::default())
    }

    /// Starts a stub answering with `catalog`.
    pub fn spawn_with(token: &str, catalog: StatusCatalog) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind stub"));
        let addr = server.server_addr().to_ip().expect("stub address");
        let state = Arc::new(StubState {
            token: token.to_string(),
            catalog,
            requests: Mutex::new(Vec::new()),
        });
        let loop_server = Arc::clone(&server);
        let loop_state = Arc::clone(&state);
        let join = thread::spawn(move || {
            for request in loop_server.incoming_requests() {
                handle(&loop_state, request);
            }
        });
        Self {
            base_url: format!("http://{addr}{API_PREFIX}"),
            server,
            state,
            join: Some(join),
        }
    }

    /// Returns the base URL to configure the harness with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the captured requests.
    pub fn requests(&self) -> Vec<StubRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }
}

impl Drop for LotteryStub {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

// ============================================================================
// SECTION: Request Handling
// ============================================================================

/// Records and answers one request.
fn handle(state: &StubState, mut request: Request) {
    let mut raw = String::new();
    let _ = request.as_reader().read_to_string(&mut raw);
    let url = Url::parse(&format!("http://stub{}", request.url())).expect("request url");
    let captured = StubRequest {
        method: request.method().to_string(),
        path: url.path().to_string(),
        query: url.query_pairs().into_owned().collect(),
        authorization: request
            .headers()
            .iter()
            .find(|header| header.field.equiv("Authorization"))
            .map(|header| header.value.as_str().to_string()),
        body: raw,
    };
    let (status, payload) = respond(state, &captured);
    state.requests.lock().expect("requests lock").push(captured);
    let content_type = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("content type header");
    let response = Response::from_string(payload.to_string())
        .with_status_code(status)
        .with_header(content_type);
    let _ = request.respond(response);
}

/// Routes a request to its endpoint and renders the envelope.
fn respond(state: &StubState, request: &StubRequest) -> (u16, Value) {
    let catalog = &state.catalog;
    let path = request.path.strip_prefix(API_PREFIX).unwrap_or("");
    let body = serde_json::from_str::<Value>(&request.body).ok();
    let outcome = match (request.method.as_str(), path) {
        ("GET", "/lottery/event") => authorize(state, request).and_then(|()| {
            positive_id(required_query(request, "event_id")?)?;
            Ok(fixtures::event_list_payload(catalog))
        }),
        ("GET", "/lottery/member") => authorize(state, request).and_then(|()| {
            let member_id = integer(required_query(request, "member_id")?)?;
            if member_id == NO_DISCOUNT_MEMBER_ID {
                return Err(LotteryStatus::MemberNoDiscountError);
            }
            Ok(fixtures::member_list_payload(catalog))
        }),
        ("PUT", "/lottery/inventory") => authorize(state, request).and_then(|()| {
            let raw_id = required_query(request, "discount_id")?;
            let increase = required_body(body.as_ref(), "increase")?;
            let discount_id = positive_id(raw_id)?;
            boolean(increase)?;
            if let Some(coupon) = body.as_ref().and_then(|body| body.get("coupon")) {
                string(coupon)?;
            }
            Ok(fixtures::inventory_update_payload(catalog, discount_id))
        }),
        ("PUT", "/lottery/receive") => authorize(state, request).and_then(|()| {
            let raw_id = required_query(request, "lottery_id")?;
            let is_receive = required_body(body.as_ref(), "is_receive")?;
            let lottery_id = positive_id(raw_id)?;
            boolean(is_receive)?;
            Ok(fixtures::receive_update_payload(catalog, lottery_id))
        }),
        ("GET", "/admin/lottery") => admin_list(request, catalog),
        _ => return (404, json!({"code": 404, "message": "not found"})),
    };
    match outcome {
        Ok(payload) => (200, payload),
        Err(kind) => (200, fixtures::error_payload(catalog, kind)),
    }
}

/// Admin listing; both paging inputs must be present before either is parsed.
fn admin_list(request: &StubRequest, catalog: &StatusCatalog) -> Result<Value, LotteryStatus> {
    let paging = required_query(request, "paging")?;
    let amount = required_query(request, "amount")?;
    positive_id(paging)?;
    positive_id(amount)?;
    Ok(fixtures::admin_list_payload(catalog))
}

// ============================================================================
// SECTION: Checks
// ============================================================================

/// Accepts only `Bearer <token>`.
fn authorize(state: &StubState, request: &StubRequest) -> Result<(), LotteryStatus> {
    let expected = format!("Bearer {}", state.token);
    match request.authorization.as_deref() {
        Some(value) if value == expected => Ok(()),
        _ => Err(LotteryStatus::AccessTokenError),
    }
}

/// Returns a query value or the query-required status.
fn required_query<'a>(request: &'a StubRequest, name: &str) -> Result<&'a str, LotteryStatus> {
    request.query.get(name).map(String::as_str).ok_or(LotteryStatus::QueryRequiredError)
}

/// Returns a body field or the query-required status.
fn required_body<'a>(body: Option<&'a Value>, name: &str) -> Result<&'a Value, LotteryStatus> {
    body.and_then(|body| body.get(name)).ok_or(LotteryStatus::QueryRequiredError)
}

/// Parses an integer query value.
fn integer(raw: &str) -> Result<i64, LotteryStatus> {
    raw.parse().map_err(|_| LotteryStatus::InputValueInvalidError)
}

/// Parses a strictly positive integer query value.
fn positive_id(raw: &str) -> Result<i64, LotteryStatus> {
    let value = integer(raw)?;
    if value > 0 { Ok(value) } else { Err(LotteryStatus::InputValueInvalidError) }
}

/// Requires a JSON boolean.
fn boolean(value: &Value) -> Result<(), LotteryStatus> {
    if value.is_boolean() { Ok(()) } else { Err(LotteryStatus::InputValueInvalidError) }
}

/// Requires a JSON string.
fn string(value: &Value) -> Result<(), LotteryStatus> {
    if value.is_string() { Ok(()) } else { Err(LotteryStatus::InputValueInvalidError) }
}
