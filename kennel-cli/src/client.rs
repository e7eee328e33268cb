//! HTTP client for a running Kennel server.

use anyhow::{bail, Context, Result};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use kennel_api::{RegisterRequest, RegisterResponse, SearchRequest, SearchResponse};

/// Thin wrapper over the register and search endpoints.
pub struct KennelClient {
    http: reqwest::Client,
    base_url: String,
}

impl KennelClient {
    /// Creates a client for the server at `base_url`. A trailing slash is
    /// ignored.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Registers a pet. Validation failures come back as a response
    /// with a non-zero status code, not as an error.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        let url = format!("{}/api/v1/pets", self.base_url);
        debug!(%url, "POST register");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.base_url))?;

        match response.status() {
            StatusCode::OK | StatusCode::UNPROCESSABLE_ENTITY => response
                .json::<RegisterResponse>()
                .await
                .context("Invalid register response"),
            status => bail!("Register failed ({status}): {}", error_message(response).await),
        }
    }

    /// Runs a search. A malformed filter or an interrupted query is an
    /// error carrying the server's message.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let url = format!("{}/api/v1/pets/search", self.base_url);
        debug!(%url, "POST search");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.base_url))?;

        if !response.status().is_success() {
            let status = response.status();
            bail!("Search failed ({status}): {}", error_message(response).await);
        }

        response
            .json::<SearchResponse>()
            .await
            .context("Invalid search response")
    }
}

/// Pulls `error.message` out of an error body, falling back to the raw text.
async fn error_message(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| body["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(text)
}
