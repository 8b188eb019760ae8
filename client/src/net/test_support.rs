//! Test doubles for the HTTP seam.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::api::ApiClient;
use super::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use super::types::{Certificate, User};
use crate::config::ClientConfig;
use crate::state::session::SessionStore;
use crate::state::storage::MemoryStorage;

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub(crate) fn push_json(&self, status: u16, value: serde_json::Value) {
        self.push_raw(status, value.to_string().as_bytes());
    }

    pub(crate) fn push_raw(&self, status: u16, body: &[u8]) {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse { status, body: body.to_vec() }));
    }

    pub(crate) fn push_error(&self, error: TransportError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests.borrow().last().cloned().expect("no request sent")
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Send("no response queued".to_owned())))
    }
}

pub(crate) type FakeClient = ApiClient<FakeTransport, MemoryStorage>;

pub(crate) fn fake_client() -> FakeClient {
    ApiClient::new(
        &ClientConfig::default(),
        FakeTransport::default(),
        SessionStore::new(MemoryStorage::new()),
    )
}

pub(crate) fn sample_user() -> User {
    User {
        id: "u1".to_owned(),
        name: "Alice".to_owned(),
        email: "alice@example.com".to_owned(),
        role: None,
        created_at: "2024-01-01T00:00:00Z".to_owned(),
        updated_at: "2024-01-01T00:00:00Z".to_owned(),
    }
}

pub(crate) fn sample_certificate(id: &str, hash: &str) -> Certificate {
    Certificate {
        id: id.to_owned(),
        hash: hash.to_owned(),
        recipient_name: "Bob".to_owned(),
        recipient_email: "bob@example.com".to_owned(),
        certificate_title: "Rust 101".to_owned(),
        issue_date: "2024-05-01T00:00:00Z".to_owned(),
        issuer_id: Some("u1".to_owned()),
        issuer_name: "Acme Academy".to_owned(),
        description: "Completed the course".to_owned(),
        block_number: 3,
        timestamp: "2024-05-01T10:00:00Z".to_owned(),
    }
}

pub(crate) fn certificate_json(cert: &Certificate) -> serde_json::Value {
    serde_json::to_value(cert).expect("certificate serializes")
}
