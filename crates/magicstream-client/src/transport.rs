// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

use async_trait::async_trait;
use magicstream_core::{codec, ApiResponse, Error, RequestConfig, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// Sends one request and reports the response for any status code.
/// Dropping the returned future aborts the call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestConfig) -> Result<ApiResponse>;
}

/// `reqwest` transport. The cookie store carries the session credential the
/// backend sets on login and refresh.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestConfig) -> Result<ApiResponse> {
        let url = self.resolve(&request.url);
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| Error::InvalidRequest(format!("invalid method: {}", e)))?;

        let mut req_builder = self
            .client
            .request(method, &url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| Error::Transport(format!("request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("failed to read response body: {}", e)))?;

        tracing::debug!("{} {} -> {}", request.method, url, status);

        Ok(ApiResponse::new(status, codec::decode_body(&body_bytes)))
    }
}
