//! HTTP client for the knowledge-base backend.
//!
//! Every call builds its own `reqwest::Client` bounded by the configured
//! timeout, issues exactly one request and drops the client afterwards.
//! There is no retry and no connection reuse between calls.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::KbConfig;
use crate::error::BackendError;

fn application_json() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// Thin JSON-over-HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    timeout: std::time::Duration,
}

impl BackendClient {
    /// Creates a client from configuration.
    #[must_use]
    pub fn new(config: &KbConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        }
    }

    /// Returns the absolute URL for a backend path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn http(&self) -> Result<reqwest::Client, BackendError> {
        Ok(reqwest::Client::builder().timeout(self.timeout).build()?)
    }

    /// POSTs `body` as JSON and decodes a JSON object response.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Status`] for 4xx/5xx responses, and the other
    /// variants for transport, decoding or shape failures.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Map<String, Value>, BackendError> {
        let url = self.url(path);
        debug!(method = "POST", %url, "Sending backend request");

        let response = self
            .http()?
            .post(&url)
            .header(CONTENT_TYPE, application_json())
            .header(ACCEPT, application_json())
            .json(body)
            .send()
            .await?;

        match Self::decode(response).await? {
            Value::Object(map) => Ok(map),
            _ => Err(BackendError::UnexpectedShape {
                expected: "JSON object",
            }),
        }
    }

    /// GETs `path` and decodes any JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Status`] for 4xx/5xx responses, and the other
    /// variants for transport or decoding failures.
    pub async fn get_json(&self, path: &str) -> Result<Value, BackendError> {
        let url = self.url(path);
        debug!(method = "GET", %url, "Sending backend request");

        let response = self
            .http()?
            .get(&url)
            .header(ACCEPT, application_json())
            .send()
            .await?;

        Self::decode(response).await
    }

    /// GETs `path` and returns the raw status and body, without treating
    /// error statuses as failures. Used by connectivity probes.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Request`] if the backend cannot be reached.
    pub async fn probe(&self, path: &str) -> Result<(StatusCode, String), BackendError> {
        let response = self.http()?.get(self.url(path)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    async fn decode(response: reqwest::Response) -> Result<Value, BackendError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_client_error() || status.is_server_error() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
