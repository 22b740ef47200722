//! HTTP request/response values exchanged with a [`Transport`].
//!
//! # Design
//! Requests and responses are plain data. `BibliotecaApi` builds
//! `HttpRequest` values and normalizes `HttpResponse` values without knowing
//! how the bytes travel; the transport in between is the only place that
//! touches the network.
//!
//! [`Transport`]: crate::transport::Transport

/// Header set on every request unless the caller supplies its own value.
pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute: the client joins its base address and the endpoint
/// path before handing the request to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase, e.g. `"Not Found"`. Empty when unknown.
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: String::new(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Per-call options for [`BibliotecaApi::request`].
///
/// [`BibliotecaApi::request`]: crate::client::BibliotecaApi::request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: HttpMethod::Delete,
            ..Self::default()
        }
    }

    pub fn with_method(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Merge the default JSON content type with caller headers.
///
/// Caller headers win over the default, compared case-insensitively.
pub(crate) fn merge_headers(extra: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(extra.len() + 1);
    if !extra.iter().any(|(key, _)| key.eq_ignore_ascii_case(CONTENT_TYPE)) {
        headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
    }
    headers.extend(extra);
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_content_type_is_added() {
        let headers = merge_headers(Vec::new());
        assert_eq!(
            headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn caller_content_type_overrides_default() {
        let headers = merge_headers(vec![("Content-Type".to_string(), "text/plain".to_string())]);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].1, "text/plain");
    }

    #[test]
    fn extra_headers_are_kept_alongside_default() {
        let headers = merge_headers(vec![("x-trace".to_string(), "abc".to_string())]);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1], ("x-trace".to_string(), "abc".to_string()));
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(300, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }
}
