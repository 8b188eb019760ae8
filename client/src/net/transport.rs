//! HTTP transport seam.
//!
//! `ApiClient` builds fully-resolved requests and hands them to an
//! [`HttpTransport`]. The browser build uses `gloo-net` (`hydrate`); the CLI
//! plugs in a `reqwest` transport; tests use an in-memory fake.
//!
//! Futures are not required to be `Send`: browser fetch futures are bound to
//! the JS event loop.

/// HTTP methods used by the ledger API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A fully-resolved outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body, if any.
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response: status code and unparsed body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Transport-level failure: the request never produced an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request build failed: {0}")]
    Build(String),
    #[error("request send failed: {0}")]
    Send(String),
    #[error("response read failed: {0}")]
    Read(String),
}

#[async_trait::async_trait(?Send)]
pub trait HttpTransport {
    /// Perform one request. No retry or timeout is applied at this layer.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =============================================================================
// BROWSER TRANSPORT
// =============================================================================

/// `fetch`-backed transport for the browser.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
#[async_trait::async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        use gloo_net::http::Request;

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let outgoing = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Build(e.to_string()))?;

        let resp = outgoing
            .send()
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .binary()
            .await
            .map_err(|e| TransportError::Read(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
