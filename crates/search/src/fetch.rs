//! Outbound page fetching.
//!
//! Engine adapters never talk to `reqwest` directly; they go through
//! [`PageFetcher`] so tests can serve canned pages or inject failures.

use crate::error::SearchError;
use std::time::Duration;

/// A single GET for a results page.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

/// Fetches a page body, failing on network errors, timeouts and
/// non-success statuses.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<String, SearchError>;
}

/// [`PageFetcher`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build the fetcher, following at most 10 redirects.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the client cannot be constructed.
    pub fn new() -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<String, SearchError> {
        let mut builder = self.client.get(&request.url).timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| classify(e, request))?;

        let status = response.status();
        if !status.is_success() {
            let host = response
                .url()
                .host_str()
                .unwrap_or("unknown host")
                .to_string();
            return Err(SearchError::Status {
                engine: host,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify(e, request))
    }
}

fn classify(err: reqwest::Error, request: &FetchRequest) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout(format!("no response within {:?}", request.timeout))
    } else {
        SearchError::Http(err.without_url().to_string())
    }
}
