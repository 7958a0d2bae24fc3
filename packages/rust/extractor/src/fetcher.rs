//! Single-shot page fetching with classified failures.
//!
//! One GET per call, bounded by the configured timeout, no retries. Non-2xx
//! responses are failures and their bodies are never read.

use std::error::Error as _;
use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use anchorprobe_shared::{AnchorProbeError, Document, FetchOptions, Result};

// ---------------------------------------------------------------------------
// PageSource
// ---------------------------------------------------------------------------

/// Anything that can turn a URL into a [`Document`].
///
/// The pipeline depends on this seam rather than on the HTTP client, so
/// wrappers (caching, fixtures) can be layered around [`HttpFetcher`].
pub trait PageSource: Send + Sync {
    /// Fetch `url` once and return its body as text.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Document>> + Send;
}

// ---------------------------------------------------------------------------
// HttpFetcher
// ---------------------------------------------------------------------------

/// reqwest-backed [`PageSource`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher with the given timeout, redirect limit and User-Agent.
    pub fn new(opts: &FetchOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(opts.max_redirects))
            .timeout(opts.timeout)
            .build()
            .map_err(|e| AnchorProbeError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout: opts.timeout,
        })
    }
}

impl PageSource for HttpFetcher {
    #[instrument(skip(self), fields(timeout_ms = self.timeout.as_millis() as u64))]
    async fn fetch(&self, url: &str) -> Result<Document> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AnchorProbeError::validation("URL must not be empty"));
        }

        debug!("sending GET request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, &e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "server returned error status");
            return Err(AnchorProbeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| classify(url, &e, self.timeout))?;

        info!(
            status = status.as_u16(),
            final_url = %final_url,
            content_len = body.len(),
            "page fetched"
        );

        Ok(Document::new(final_url, body))
    }
}

// ---------------------------------------------------------------------------
// Error classification
// ---------------------------------------------------------------------------

/// Map a transport error onto the fetch error taxonomy.
fn classify(url: &str, err: &reqwest::Error, timeout: Duration) -> AnchorProbeError {
    if err.is_timeout() {
        AnchorProbeError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else if err.is_connect() {
        AnchorProbeError::ConnectionFailure {
            url: url.to_string(),
            detail: error_chain(err),
        }
    } else {
        AnchorProbeError::Request {
            url: url.to_string(),
            detail: error_chain(err),
        }
    }
}

/// reqwest's top-level message is terse; append the source chain.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
