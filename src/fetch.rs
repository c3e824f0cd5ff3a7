//! HTTP fetching behind a small trait.
//!
//! The pipeline only talks to the [`Fetch`] trait, so tests can replace the
//! network with a scripted implementation.
//!
//! - [`Fetch`]: Core trait, one GET returning the response body
//! - [`HttpFetcher`]: `reqwest` implementation with a fixed timeout and user agent
//! - [`FetchError`]: Why a source produced nothing
//!
//! There is no retry: a failed request is reported once and the source
//! section stays empty.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Why a source produced no records.
///
/// Stored on the report section, so it is serializable.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("server answered with HTTP {status}")]
    Status { status: u16 },
    #[error("network error: {message}")]
    Network { message: String },
    #[error("unexpected response shape: {message}")]
    Parse { message: String },
}

impl FetchError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if let Some(status) = e.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else {
            Self::Network {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::parse(e.to_string())
    }
}

/// Trait for issuing one GET request.
///
/// Implementors return the response body as text, or a [`FetchError`].
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`Fetch`] implementation backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with a per-request `timeout` and a static `user_agent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Non-success status");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(
            %url,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched body"
        );
        Ok(body)
    }
}
