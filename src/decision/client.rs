//! Decision service client.
//!
//! One outbound call per evaluation: the policy query is POSTed to the
//! configured endpoint and the verdict parsed out of the JSON response.
//! The call runs under a hard deadline; when the deadline fires the
//! in-flight future is dropped, which aborts the underlying connection,
//! so no late response can be observed.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::DecisionConfig;
use crate::decision::types::{PolicyQuery, Verdict};

/// Failure to obtain a verdict. Every variant is fail-closed.
#[derive(Debug, Error)]
pub enum DecisionError {
    /// Network-level failure: connection refused, DNS, reset, etc.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The deadline elapsed before a response arrived.
    #[error("no verdict within {0:?}")]
    Timeout(Duration),

    /// The decision service answered outside the success range.
    #[error("decision service returned status {status}")]
    UpstreamStatus { status: u16, body: String },

    /// The response body was not a parseable verdict.
    #[error("unparseable verdict body: {0}")]
    InvalidBody(String),
}

impl DecisionError {
    /// Transport-level failures may be transient; a protocol failure is a
    /// deterministic answer and retrying it only duplicates load.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DecisionError::Transport(_) | DecisionError::Timeout(_))
    }
}

/// Trait for decision service implementations.
///
/// The gate depends on this seam so tests can substitute a scripted oracle.
#[async_trait]
pub trait DecisionClient: Send + Sync {
    /// Obtain a verdict for one policy query.
    async fn decide(&self, query: &PolicyQuery) -> Result<Verdict, DecisionError>;
}

/// HTTP client for an OPA-style decision endpoint.
pub struct HttpDecisionClient {
    config: DecisionConfig,
    client: Client,
}

impl HttpDecisionClient {
    /// Create a new client from configuration.
    pub fn new(config: DecisionConfig) -> Result<Self, DecisionError> {
        // The deadline is enforced per attempt in `decide`; the builder only
        // carries a connect timeout so dead endpoints fail fast.
        let client = Client::builder()
            .connect_timeout(config.timeout())
            .build()?;

        Ok(Self { config, client })
    }

    /// One request/response exchange, deadline not yet applied.
    async fn exchange(&self, query: &PolicyQuery) -> Result<Verdict, DecisionError> {
        let response = self
            .client
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .json(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DecisionError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DecisionError::InvalidBody(e.to_string()))
    }

    /// One attempt under the hard deadline.
    async fn attempt(&self, query: &PolicyQuery) -> Result<Verdict, DecisionError> {
        let deadline = self.config.timeout();
        tokio::time::timeout(deadline, self.exchange(query))
            .await
            .map_err(|_| DecisionError::Timeout(deadline))?
    }
}

#[async_trait]
impl DecisionClient for HttpDecisionClient {
    async fn decide(&self, query: &PolicyQuery) -> Result<Verdict, DecisionError> {
        let mut attempt_no = 0u32;
        loop {
            match self.attempt(query).await {
                Ok(verdict) => return Ok(verdict),
                Err(e) if e.is_retryable() && attempt_no < self.config.max_retries => {
                    attempt_no += 1;
                    tracing::warn!(
                        error = %e,
                        attempt = attempt_no,
                        max_retries = self.config.max_retries,
                        "Retrying decision service call"
                    );
                    tokio::time::sleep(self.config.retry_backoff()).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
