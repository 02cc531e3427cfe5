//! HTTP-backed ScenarioRepository implementation.
//!
//! Talks to a running `bragi-server` so that front ends can use the same
//! repository contract as the server itself.

use async_trait::async_trait;
use bragi_core::api::{ApiResponse, SAVE_PATH, SCENARIOS_PATH};
use bragi_core::error::{BragiError, Result};
use bragi_core::scenario::ScenarioRepository;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Default server location, matching the server's default bind address.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Scenario repository that forwards every call to the HTTP API.
#[derive(Debug, Clone)]
pub struct HttpScenarioClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScenarioClient {
    /// Creates a client for the server at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decodes the response envelope and turns failures into errors.
    ///
    /// `fallback` is reported when a failure envelope carries no message.
    async fn read_envelope<T: DeserializeOwned>(
        response: Response,
        fallback: &str,
    ) -> Result<T> {
        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
            BragiError::transport(format!("Invalid response body ({}): {}", status, e))
        })?;

        if !status.is_success() || !envelope.success {
            return Err(envelope_error(status, envelope.message, fallback));
        }

        envelope
            .data
            .ok_or_else(|| BragiError::transport("Response envelope has no data"))
    }
}

/// Maps a failure envelope to an error: rejections are the caller's fault.
fn envelope_error(status: StatusCode, message: Option<String>, fallback: &str) -> BragiError {
    let message = message.unwrap_or_else(|| fallback.to_string());
    if status == StatusCode::BAD_REQUEST {
        BragiError::InvalidInput(message)
    } else {
        BragiError::Remote {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ScenarioRepository for HttpScenarioClient {
    async fn list_all(&self) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(self.url(SCENARIOS_PATH))
            .send()
            .await
            .map_err(|e| BragiError::transport(format!("Failed to list scenarios: {}", e)))?;

        Self::read_envelope(response, "An error occurred while listing scenarios.").await
    }

    async fn save(&self, document: Value) -> Result<Value> {
        tracing::debug!("[HttpScenarioClient] POST {}", self.url(SAVE_PATH));
        let response = self
            .client
            .post(self.url(SAVE_PATH))
            .json(&document)
            .send()
            .await
            .map_err(|e| BragiError::transport(format!("Failed to save scenario: {}", e)))?;

        Self::read_envelope(response, "An error occurred while saving.").await
    }
}
