// crates/lottery-harness-http/src/transport.rs
// ============================================================================
// Module: Reqwest Transport
// Description: Blocking HTTP transport for live contract runs.
// Purpose: Send prepared requests and return raw status and body bytes.
// Dependencies: lottery-harness-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! The transport issues one blocking request per call. Query pairs are
//! encoded through [`Url::query_pairs_mut`], JSON bodies are serialized up
//! front, redirects are disabled, and response bodies are read through a
//! byte limit. Any failure maps onto [`TransportError`]; the transport never
//! interprets the body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use lottery_harness_core::HttpMethod;
use lottery_harness_core::PreparedRequest;
use lottery_harness_core::Transport;
use lottery_harness_core::TransportError;
use lottery_harness_core::TransportResponse;
use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use url::Url;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the live transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransportConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_response_bytes: 1024 * 1024,
            user_agent: "lottery-harness/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Transport Implementation
// ============================================================================

/// Live transport backed by a blocking reqwest client.
pub struct ReqwestTransport {
    /// Transport configuration, including limits.
    config: HttpTransportConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] when the HTTP client cannot be created.
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| TransportError::Build(format!("http client build failed: {err}")))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Returns the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpTransportConfig {
        &self.config
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &PreparedRequest) -> Result<TransportResponse, TransportError> {
        let url = build_url(request)?;
        let mut builder = self
            .client
            .request(method_of(request.method), url)
            .header(ACCEPT, "application/json");
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body)
                .map_err(|err| TransportError::Build(format!("body serialization failed: {err}")))?;
            builder = builder.header(CONTENT_TYPE, "application/json").body(bytes);
        }
        let mut response = builder.send().map_err(map_send_error)?;
        let status = response.status().as_u16();
        let body = read_response_limited(&mut response, self.config.max_response_bytes)?;
        Ok(TransportResponse {
            status,
            body,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses the request URL and appends the encoded query pairs.
fn build_url(request: &PreparedRequest) -> Result<Url, TransportError> {
    let mut url = Url::parse(&request.url)
        .map_err(|err| TransportError::Build(format!("invalid url {}: {err}", request.url)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::Build(format!("unsupported url scheme: {}", url.scheme())));
    }
    if !request.query.is_empty() {
        url.query_pairs_mut().extend_pairs(request.query.iter());
    }
    Ok(url)
}

/// Maps the harness method onto the reqwest method.
const fn method_of(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Classifies a send failure.
fn map_send_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_builder() {
        TransportError::Build(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    response: &mut Response,
    max_bytes: usize,
) -> Result<Vec<u8>, TransportError> {
    let expected_len = response.content_length();
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| TransportError::Body("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err(TransportError::Body("http response exceeds size limit".to_string()));
    }
    let mut buf = Vec::new();
    let limit = max_bytes_u64.saturating_add(1);
    let mut handle = response.take(limit);
    handle.read_to_end(&mut buf).map_err(|err| {
        TransportError::Body(format!("failed to read response: {err}"))
    })?;
    if buf.len() > max_bytes {
        return Err(TransportError::Body("http response exceeds size limit".to_string()));
    }
    if let Some(expected) = expected_len {
        let expected = usize::try_from(expected)
            .map_err(|_| TransportError::Body("invalid response length".to_string()))?;
        if buf.len() < expected {
            return Err(TransportError::Body("http response truncated".to_string()));
        }
    }
    Ok(buf)
}
