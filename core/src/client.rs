//! The biblioteca API client and its generic request primitive.
//!
//! # Design
//! `BibliotecaApi` holds only a base address and a transport. Every endpoint
//! has a pure `build_*` method producing an `HttpRequest`, and an async
//! method that sends it and normalizes the answer with [`parse_response`].
//! Nothing escapes as an `Err`: transport failures, HTTP errors and bad JSON
//! all come back as [`ApiResponse::Failure`].

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::http::{merge_headers, HttpMethod, HttpRequest, HttpResponse, RequestOptions};
use crate::transport::{ReqwestTransport, Transport};

/// Async client for the biblioteca REST API.
#[derive(Debug, Clone)]
pub struct BibliotecaApi<T = ReqwestTransport> {
    base_url: String,
    transport: T,
}

impl BibliotecaApi<ReqwestTransport> {
    /// Client on `base_url` using a default `reqwest` transport.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::from_config(&ClientConfig::with_base_url(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config.user_agent)?;
        Ok(Self::with_transport(&config.base_url, transport))
    }
}

impl<T: Transport> BibliotecaApi<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `path` without sending it.
    pub fn build_request(&self, path: &str, options: RequestOptions) -> HttpRequest {
        HttpRequest {
            method: options.method,
            url: format!("{}{path}", self.base_url),
            headers: merge_headers(options.headers),
            body: options.body,
        }
    }

    /// Issue a request to `base_url + path` and normalize the outcome.
    pub async fn request(&self, path: &str, options: RequestOptions) -> ApiResponse<Value> {
        self.send(self.build_request(path, options)).await
    }

    /// Send a prepared request through the transport.
    pub async fn send(&self, request: HttpRequest) -> ApiResponse<Value> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let envelope = match self.transport.execute(request).await {
            Ok(response) => {
                debug!(status = response.status, "received response");
                parse_response(response)
            }
            Err(err) => ApiResponse::from_error(&err),
        };

        if let ApiResponse::Failure { error, status } = &envelope {
            warn!(status, error = %error, "request failed");
        }
        envelope
    }

    /// Send a request whose construction may have failed locally.
    pub(crate) async fn send_built(
        &self,
        request: Result<HttpRequest, ApiError>,
    ) -> ApiResponse<Value> {
        match request {
            Ok(request) => self.send(request).await,
            Err(err) => {
                warn!(error = %err, "request rejected before sending");
                ApiResponse::from_error(&err)
            }
        }
    }

    /// Build a request carrying `payload` as its JSON body.
    pub(crate) fn build_json<P: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload)?;
        Ok(self.build_request(path, RequestOptions::with_method(method).body(body)))
    }

    // ---------------------------------------------------------------------
    // System
    // ---------------------------------------------------------------------

    pub fn build_health(&self) -> HttpRequest {
        self.build_request("/health", RequestOptions::get())
    }

    pub fn build_info(&self) -> HttpRequest {
        self.build_request("/", RequestOptions::get())
    }

    /// Liveness check.
    pub async fn health(&self) -> ApiResponse<Value> {
        self.send(self.build_health()).await
    }

    /// General API information.
    pub async fn info(&self) -> ApiResponse<Value> {
        self.send(self.build_info()).await
    }
}

/// Normalize a raw response into an envelope.
///
/// - 2xx: the body parsed as JSON (an empty body becomes `null`).
/// - other statuses: the body's `error` field when present, otherwise
///   `"HTTP {status}: {status text}"`, with the real status.
/// - a 2xx body that is not JSON is a failure with status 500.
pub fn parse_response(response: HttpResponse) -> ApiResponse<Value> {
    if response.is_success() {
        if response.body.trim().is_empty() {
            return ApiResponse::success(Value::Null, response.status);
        }
        return match serde_json::from_str(&response.body) {
            Ok(data) => ApiResponse::success(data, response.status),
            Err(e) => ApiResponse::from_error(&ApiError::Deserialization(e.to_string())),
        };
    }

    let message = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| error_field(&body))
        .unwrap_or_else(|| status_message(response.status, &response.status_text));
    ApiResponse::failure(message, response.status)
}

fn error_field(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn status_message(status: u16, status_text: &str) -> String {
    if status_text.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {status_text}")
    }
}
