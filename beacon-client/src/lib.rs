//! Beacon HTTP Client
//!
//! A small, type-safe client for the node's JSON:API job endpoints.
//!
//! The client only fetches and deserializes; turning resources into
//! presentable jobs is left to `beacon-core`.
//!
//! # Example
//!
//! ```no_run
//! use beacon_client::NodeClient;
//! use beacon_core::domain::job::Job;
//!
//! # async fn example() -> beacon_client::Result<()> {
//! let client = NodeClient::new("http://localhost:6688");
//! let document = client.list_jobs(1, 25).await?;
//!
//! for resource in document.data {
//!     let job = Job::from(resource);
//!     println!("{}", job.friendly_created_at());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// HTTP client for the node API
#[derive(Debug, Clone)]
pub struct NodeClient {
    /// Base URL of the node (e.g., "http://localhost:6688")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl NodeClient {
    /// Create a new node client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the node API (e.g., "http://localhost:6688")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new node client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use beacon_client::NodeClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = NodeClient::with_client("http://localhost:6688", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the node
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded as one segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Send a GET request and deserialize the JSON response
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(status = status.as_u16(), "node API request failed");
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let body = response.text().await?;
        parse_body(&body)
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| ClientError::ParseError(e.to_string()))
}
