//! HTTP client for the agricultural records REST API

use agriweb_core::{ApiRequest, ApiResponse, CoreError, CoreResult, Method, ResourceApi};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;

/// `ResourceApi` over HTTP
#[derive(Clone, Debug)]
pub struct HttpResourceApi {
    http: Client,
    base_url: String,
}

impl HttpResourceApi {
    /// Create a client for the API rooted at `base_url` (e.g. `http://127.0.0.1:5000`)
    ///
    /// Requests that take longer than `timeout` fail as transport errors.
    pub fn new(base_url: &str, timeout: Duration) -> CoreResult<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| CoreError::Transport {
            message: format!("Failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ResourceApi for HttpResourceApi {
    async fn send(&self, request: ApiRequest) -> CoreResult<ApiResponse> {
        let url = self.url(&request.path);
        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CoreError::Transport { message: e.to_string() })?;

        let status = response.status().as_u16();
        log::debug!("{} {} -> {}", request.method, request.path, status);

        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Transport { message: e.to_string() })?;

        Ok(ApiResponse::new(status, body))
    }
}
