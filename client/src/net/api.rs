//! REST client for the certificate ledger backend.
//!
//! One low-level [`ApiClient::request`] builds the URL, attaches the JSON
//! content type and the bearer token from the session, sends through the
//! transport, and normalizes the response. Typed wrappers per endpoint are
//! thin calls through it.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Status`] carrying the backend's
//! `message` field when the body is JSON with one, else `API error: <code>`.
//! A bare 401 maps to [`ApiError::SessionExpired`] but the stored session is
//! left alone. Every failure is logged once and returned; there is no retry,
//! backoff, or timeout.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use super::transport::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
use super::types::{
    AuthResponse, Certificate, CertificateRequest, LoginRequest, RegisterRequest, RegisterResponse, Verification,
};
use crate::config::ClientConfig;
use crate::state::session::SessionStore;
use crate::state::storage::SessionStorage;

const JSON_CONTENT_TYPE: &str = "application/json";

// =============================================================================
// ERRORS
// =============================================================================

/// Errors surfaced by API calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP status.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The backend answered 401 without an explanatory message.
    #[error("Session expired (API error: 401). Please log in again.")]
    SessionExpired,

    /// A success body could not be decoded as the expected type.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The request could not be constructed (bad base URL, unserializable body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status behind this error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::SessionExpired => Some(401),
            _ => None,
        }
    }
}

fn api_error_message(status: u16) -> String {
    format!("API error: {status}")
}

/// Map a non-success response to an [`ApiError`].
pub fn error_from_response(status: u16, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(ToOwned::to_owned))
        .filter(|message| !message.is_empty());

    match (message, status) {
        (Some(message), _) => ApiError::Status { status, message },
        (None, 401) => ApiError::SessionExpired,
        (None, _) => ApiError::Status { status, message: api_error_message(status) },
    }
}

// =============================================================================
// RESPONSE PAYLOAD
// =============================================================================

/// Normalized success body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 204: the body was never read.
    Empty,
    Json(Value),
}

impl Payload {
    /// Decode into `T`. `Empty` decodes as the empty object `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = match self {
            Self::Empty => Value::Object(Map::new()),
            Self::Json(value) => value,
        };
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Turn a raw response into a payload or an error.
///
/// # Errors
///
/// Returns a status error for non-2xx responses and [`ApiError::Decode`]
/// when a success body is not JSON.
pub fn interpret_response(response: &HttpResponse) -> Result<Payload, ApiError> {
    let status = response.status;
    if !(200..300).contains(&status) {
        return Err(error_from_response(status, &response.body));
    }
    if status == 204 {
        return Ok(Payload::Empty);
    }
    serde_json::from_slice(&response.body)
        .map(Payload::Json)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Join percent-encoded `segments` onto the base URL's path.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] if the base URL does not parse or
/// cannot carry a path.
pub fn endpoint_url(base_url: &str, segments: &[&str]) -> Result<String, ApiError> {
    let mut url =
        Url::parse(base_url).map_err(|e| ApiError::InvalidRequest(format!("invalid base URL {base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ApiError::InvalidRequest(format!("base URL cannot carry a path: {base_url}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct ApiClient<T, S> {
    transport: T,
    session: SessionStore<S>,
    base_url: String,
}

impl<T: HttpTransport, S: SessionStorage> ApiClient<T, S> {
    pub fn new(config: &ClientConfig, transport: T, session: SessionStore<S>) -> Self {
        Self { transport, session, base_url: config.api_base_url.clone() }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(&self, method: Method, segments: &[&str], body: Option<Value>) -> Result<HttpRequest, ApiError> {
        let url = endpoint_url(&self.base_url, segments)?;
        let mut headers = vec![("Content-Type".to_owned(), JSON_CONTENT_TYPE.to_owned())];
        if let Some(token) = self.session.token() {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        Ok(HttpRequest { method, url, headers, body: body.map(|value| value.to_string()) })
    }

    async fn send(&self, method: Method, segments: &[&str], body: Option<Value>) -> Result<Payload, ApiError> {
        let request = self.build_request(method, segments, body)?;
        let response = self.transport.send(request).await?;
        interpret_response(&response)
    }

    /// Send one request to `segments` under the base URL.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`]; it has already been logged.
    pub async fn request(&self, method: Method, segments: &[&str], body: Option<Value>) -> Result<Payload, ApiError> {
        self.send(method, segments, body)
            .await
            .inspect_err(|e| log_failure(method, segments, e))
    }

    async fn get<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R, ApiError> {
        self.request(Method::Get, segments, None)
            .await?
            .decode()
            .inspect_err(|e| log_failure(Method::Get, segments, e))
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, segments: &[&str], body: &B) -> Result<R, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.request(Method::Post, segments, Some(value))
            .await?
            .decode()
            .inspect_err(|e| log_failure(Method::Post, segments, e))
    }

    // -------------------------------------------------------------------------
    // Certificates
    // -------------------------------------------------------------------------

    /// `POST /certificates`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn create_certificate(&self, request: &CertificateRequest) -> Result<Certificate, ApiError> {
        self.post(&["certificates"], request).await
    }

    /// `GET /certificates/{id}`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn get_certificate(&self, id: &str) -> Result<Certificate, ApiError> {
        self.get(&["certificates", id]).await
    }

    /// `GET /certificates/verify/{hash}`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn verify_certificate(&self, hash: &str) -> Result<Verification, ApiError> {
        self.get(&["certificates", "verify", hash]).await
    }

    /// `GET /certificates`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn get_all_certificates(&self) -> Result<Vec<Certificate>, ApiError> {
        self.get(&["certificates"]).await
    }

    /// `GET /users/{user_id}/certificates`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn get_user_certificates(&self, user_id: &str) -> Result<Vec<Certificate>, ApiError> {
        self.get(&["users", user_id, "certificates"]).await
    }

    /// Certificates issued by `user_id`, filtered from the full list.
    ///
    /// # Errors
    ///
    /// Propagates the failure of the underlying list call.
    pub async fn get_user_issued_certificates(&self, user_id: &str) -> Result<Vec<Certificate>, ApiError> {
        Ok(issued_by(self.get_all_certificates().await?, user_id))
    }

    /// Certificates addressed to `email`, filtered from the full list.
    ///
    /// # Errors
    ///
    /// Propagates the failure of the underlying list call.
    pub async fn get_user_received_certificates(&self, email: &str) -> Result<Vec<Certificate>, ApiError> {
        Ok(received_by(self.get_all_certificates().await?, email))
    }

    // -------------------------------------------------------------------------
    // Auth
    // -------------------------------------------------------------------------

    /// `POST /auth/login`. Does not touch the session; callers persist it.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post(&["auth", "login"], credentials).await
    }

    /// `POST /auth/register`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn register(&self, user: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.post(&["auth", "register"], user).await
    }
}

fn log_failure(method: Method, segments: &[&str], error: &ApiError) {
    log::error!("API request failed: {} /{}: {error}", method.as_str(), segments.join("/"));
}

/// Keep certificates whose `issuerId` equals `user_id`.
pub fn issued_by(certificates: Vec<Certificate>, user_id: &str) -> Vec<Certificate> {
    certificates
        .into_iter()
        .filter(|cert| cert.issuer_id.as_deref() == Some(user_id))
        .collect()
}

/// Keep certificates whose `recipientEmail` equals `email`.
pub fn received_by(certificates: Vec<Certificate>, email: &str) -> Vec<Certificate> {
    certificates
        .into_iter()
        .filter(|cert| cert.recipient_email == email)
        .collect()
}
