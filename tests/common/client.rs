//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all release lookup endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

/// HTTP test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET /
    pub async fn get_stats(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Get stats request failed")
    }

    // ========================================================================
    // Release Endpoints
    // ========================================================================

    /// GET /v1/release/details?id={id}
    pub async fn get_release_details(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/v1/release/details", self.base_url))
            .query(&[("id", id)])
            .send()
            .await
            .expect("Get release details request failed")
    }

    /// GET /v1/release/details without the id parameter
    pub async fn get_release_details_without_id(&self) -> Response {
        self.client
            .get(format!("{}/v1/release/details", self.base_url))
            .send()
            .await
            .expect("Get release details request failed")
    }

    /// GET /v1/release/resolve?id={id}
    pub async fn resolve_release(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/v1/release/resolve", self.base_url))
            .query(&[("id", id)])
            .send()
            .await
            .expect("Resolve release request failed")
    }
}
