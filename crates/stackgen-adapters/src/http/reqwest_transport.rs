//! `reqwest`-backed implementation of the [`HttpTransport`] port.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use thiserror::Error;
use tracing::{debug, trace};

use stackgen_core::application::ports::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
#[error("Failed to create HTTP client: {0}")]
pub struct TransportBuildError(#[from] reqwest::Error);

/// Sends requests with a shared [`reqwest::Client`].
///
/// Every response is returned as-is, whatever its status. Only connection,
/// timeout and body-read failures become [`TransportError`]s.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportBuildError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        debug!(%method, url = %request.url, "Sending request");

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(describe)?;

        let status = response.status().as_u16();
        let mut out = HttpResponse::new(status);
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                out = out.with_header(name.as_str(), value);
            }
        }
        let body = response.bytes().await.map_err(describe)?;
        trace!(status, bytes = body.len(), "Response received");

        Ok(out.with_body(body.to_vec()))
    }
}

/// Flatten a reqwest error and its sources into one readable message.
fn describe(error: reqwest::Error) -> TransportError {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    TransportError::new(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_custom_settings() {
        assert!(ReqwestTransport::new(Duration::from_secs(5), "stackgen-test/0").is_ok());
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        let transport = ReqwestTransport::new(Duration::from_secs(2), "stackgen-test/0").unwrap();
        // Port 9 (discard) on localhost is closed in test sandboxes.
        let err = transport
            .send(HttpRequest::get("http://127.0.0.1:9/"))
            .await
            .unwrap_err();
        assert!(!err.message().is_empty());
    }
}
