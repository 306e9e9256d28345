//! HTTP advisor client.
//!
//! Talks to an external slot-advisory service over JSON: one POST per
//! placement decision, request and response bodies as defined in
//! [`super::advisory`]. The transport carries its own request timeout in
//! addition to the selector-level deadline.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::AdvisorError;

use super::advisory::{Advisor, AdvisoryRequest, AdvisoryResponse};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const SELECT_SLOT_PATH: &str = "/select-slot";

/// Advisor backed by an HTTP service.
pub struct HttpAdvisor {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpAdvisor {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AdvisorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: None,
        })
    }

    /// Sets the API key sent with each request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SELECT_SLOT_PATH)
    }
}

#[async_trait]
impl Advisor for HttpAdvisor {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn advise(&self, request: &AdvisoryRequest) -> Result<AdvisoryResponse, AdvisorError> {
        let mut http_request = self
            .client
            .post(self.endpoint())
            .header("content-type", "application/json")
            .json(request);
        if let Some(key) = &self.api_key {
            http_request = http_request.header("x-api-key", key);
        }

        let response = http_request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: AdvisoryResponse = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}
