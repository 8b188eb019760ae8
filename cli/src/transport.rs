//! `reqwest` implementation of the client transport seam.
//!
//! No request timeout is configured: a hung backend hangs the command, the
//! same as the browser client.

use ledger_client::net::transport::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.http.request(reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;
        let status = response.status().as_u16();
        if status == 204 {
            return Ok(HttpResponse { status, body: Vec::new() });
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Read(e.to_string()))?;
        Ok(HttpResponse { status, body: body.to_vec() })
    }
}
