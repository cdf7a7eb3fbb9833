// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP client for an external numerical simulation service.
//!
//! [`SimulationClient`] abstracts the two calls the remote backend makes so the
//! backend can be tested without a network. [`ReqwestClient`] is the
//! production implementation with exponential backoff and optional bearer
//! token authentication.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::backend::r#trait::ComplexNumber;
use crate::config::RemoteConfig;
use crate::error::BackendError;

/// Body of `POST {base}/simulate`.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteSimulateRequest {
    /// Qiskit program text
    pub code: String,
    pub shots: u32,
}

/// Response of `POST {base}/simulate`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSimulateResponse {
    pub counts: BTreeMap<String, u32>,
    #[serde(default)]
    pub probabilities: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub statevector: Option<Vec<ComplexNumber>>,
}

/// Abstract HTTP client for the simulation service.
#[async_trait]
pub trait SimulationClient: Send + Sync {
    /// Submit a program and wait for its counts.
    async fn simulate(
        &self,
        request: &RemoteSimulateRequest,
    ) -> Result<RemoteSimulateResponse, BackendError>;

    /// Whether the service answers its health endpoint.
    async fn health_check(&self) -> Result<bool, BackendError>;
}

/// Production HTTP client using reqwest with retry logic.
pub struct ReqwestClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<SecretString>,
    max_retries: u32,
    retry_base_delay_ms: u64,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("base_url", &self.base_url)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("max_retries", &self.max_retries)
            .field("retry_base_delay_ms", &self.retry_base_delay_ms)
            .finish()
    }
}

impl ReqwestClient {
    /// Create a client from remote backend configuration.
    pub fn from_config(config: &RemoteConfig) -> Result<Self, BackendError> {
        if config.base_url.trim().is_empty() {
            return Err(BackendError::InvalidRequest(
                "Remote base URL not configured. Set QDOCS_REMOTE_URL or \
                 config.backends.remote.base_url"
                    .to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .build()
            .map_err(|e| BackendError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone().map(SecretString::from),
            max_retries: config.max_retries,
            retry_base_delay_ms: config.retry_base_delay_ms,
        })
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Delay before retry number `attempt + 1`.
    ///
    /// `min(base * 2^attempt, 30s)` plus 25% on odd attempts.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = self
            .retry_base_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt));
        let capped = base.min(30_000);
        let jitter = capped / 4 * (attempt as u64 % 2);
        Duration::from_millis(capped + jitter)
    }

    /// Execute an HTTP request with exponential backoff retry.
    ///
    /// Retries on 429, 503, 504 and connect/timeout errors. 400, 401, 403 and
    /// 404 fail immediately.
    async fn request_with_retry<F, Fut, T>(
        &self,
        operation: &str,
        make_request: F,
    ) -> Result<T, BackendError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
        T: serde::de::DeserializeOwned,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match make_request().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return response.json::<T>().await.map_err(|e| {
                            BackendError::Http(format!("Failed to parse {operation} response: {e}"))
                        });
                    }

                    let body = response.text().await.unwrap_or_default();
                    match status {
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                            return Err(BackendError::AuthenticationFailed(format!(
                                "{operation} auth failed ({status}): {body}"
                            )));
                        }
                        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                            return Err(BackendError::Http(format!(
                                "{operation} failed ({status}): {body}"
                            )));
                        }
                        StatusCode::TOO_MANY_REQUESTS
                        | StatusCode::SERVICE_UNAVAILABLE
                        | StatusCode::GATEWAY_TIMEOUT => {
                            last_error = Some(BackendError::Http(format!(
                                "{operation} failed ({status}): {body}"
                            )));
                        }
                        _ => {
                            return Err(BackendError::ExecutionFailed(format!(
                                "{operation} failed ({status}): {body}"
                            )));
                        }
                    }
                }
                Err(e) if e.is_connect() || e.is_timeout() => {
                    last_error = Some(BackendError::Unavailable(format!(
                        "{operation} request error: {e}"
                    )));
                }
                Err(e) => {
                    return Err(BackendError::Http(format!(
                        "{operation} request error: {e}"
                    )));
                }
            }

            if attempt < self.max_retries {
                let delay = self.backoff_delay(attempt);
                warn!(
                    attempt = attempt + 1,
                    max = self.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "{operation} failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            BackendError::Http(format!(
                "{operation} failed after {} retries",
                self.max_retries
            ))
        }))
    }
}

#[async_trait]
impl SimulationClient for ReqwestClient {
    async fn simulate(
        &self,
        request: &RemoteSimulateRequest,
    ) -> Result<RemoteSimulateResponse, BackendError> {
        let url = format!("{}/simulate", self.base_url);

        let response: RemoteSimulateResponse = self
            .request_with_retry("simulate", || {
                self.authorize(self.client.post(&url)).json(request).send()
            })
            .await?;

        debug!(outcomes = response.counts.len(), "Remote simulation complete");
        Ok(response)
    }

    async fn health_check(&self) -> Result<bool, BackendError> {
        let url = format!("{}/health", self.base_url);

        match self.authorize(self.client.get(&url)).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => Err(BackendError::Http(format!("Health check failed: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_empty_url() {
        let config = RemoteConfig {
            base_url: "  ".to_string(),
            ..Default::default()
        };
        let err = ReqwestClient::from_config(&config).unwrap_err();
        assert!(matches!(err, BackendError::InvalidRequest(_)));
    }

    #[test]
    fn test_from_config_trims_trailing_slash() {
        let config = RemoteConfig {
            base_url: "http://localhost:5000/api/".to_string(),
            max_retries: 5,
            retry_base_delay_ms: 100,
            ..Default::default()
        };
        let client = ReqwestClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:5000/api");
        assert_eq!(client.max_retries, 5);
        assert!(client.auth_token.is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = RemoteConfig {
            auth_token: Some("super-secret".to_string()),
            ..Default::default()
        };
        let client = ReqwestClient::from_config(&config).unwrap();
        let rendered = format!("{client:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_backoff_delay_is_capped() {
        let config = RemoteConfig {
            retry_base_delay_ms: 500,
            ..Default::default()
        };
        let client = ReqwestClient::from_config(&config).unwrap();
        assert_eq!(client.backoff_delay(0), Duration::from_millis(500));
        assert_eq!(client.backoff_delay(1), Duration::from_millis(1250));
        assert_eq!(client.backoff_delay(10), Duration::from_millis(30_000));
        assert_eq!(client.backoff_delay(11), Duration::from_millis(37_500));
    }

    #[test]
    fn test_response_optional_fields() {
        let response: RemoteSimulateResponse =
            serde_json::from_str(r#"{"counts": {"00": 10}}"#).unwrap();
        assert_eq!(response.counts.get("00"), Some(&10));
        assert!(response.probabilities.is_none());
        assert!(response.statevector.is_none());

        let response: RemoteSimulateResponse = serde_json::from_str(
            r#"{"counts": {"0": 1}, "statevector": [{"real": 1.0, "imaginary": 0.0}]}"#,
        )
        .unwrap();
        assert_eq!(response.statevector.unwrap()[0].real, 1.0);
    }
}
