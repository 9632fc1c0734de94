// src/core/scanner/fetcher.rs

use crate::core::error::ReconError;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "BundleRecon/0.1";

/// Retrieves a document by URL.
///
/// Every failure mode collapses into `None`: callers only care whether a body
/// came back, never why it did not.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// `reqwest`-backed fetcher. Certificate verification is disabled because the
/// target list is supplied, and trusted, by the operator.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ReconError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(res) => res,
            Err(e) => {
                debug!(url, error = %e, "Request failed.");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!(url, status = %response.status(), "Non-200 response.");
            return None;
        }

        match response.text().await {
            Ok(body) => {
                debug!(url, bytes = body.len(), "Fetched document.");
                Some(body)
            }
            Err(e) => {
                debug!(url, error = %e, "Failed to read response body.");
                None
            }
        }
    }
}
