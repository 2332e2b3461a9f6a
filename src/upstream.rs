//! Outbound calls to the embeddings provider.

use crate::collector::collect_body;
use crate::config::RelayConfig;
use crate::error::{RelayError, Result};

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use std::time::Duration;

/// A fully buffered upstream reply.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Fixed-endpoint client. Cheap to clone; the inner reqwest client pools connections.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    url: String,
    auth: HeaderValue,
}

impl UpstreamClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>, api_key: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| RelayError::config("API key contains characters not allowed in a header"))?;
        auth.set_sensitive(true);

        Ok(Self {
            client,
            url: url.into(),
            auth,
        })
    }

    /// Build the reqwest client and upstream endpoint from config.
    pub fn from_config(config: &RelayConfig, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .build()
            .map_err(|e| RelayError::config(format!("Failed to build HTTP client: {}", e)))?;

        Self::new(client, config.upstream.url.clone(), api_key)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST an already translated JSON body. Exactly one attempt is made;
    /// transport failures and body read failures are both `BadGateway`.
    pub async fn send(&self, body: Vec<u8>) -> Result<UpstreamResponse> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.auth.clone())
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(RelayError::bad_gateway)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = collect_body(response.bytes_stream())
            .await
            .map_err(RelayError::bad_gateway)?;

        tracing::debug!(status = status.as_u16(), body_len = body.len(), "upstream replied");

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
