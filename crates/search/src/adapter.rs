//! Per-engine search adapter.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::fetch::{FetchRequest, PageFetcher};
use crate::parser;
use crate::types::{EngineShape, SearchResult};
use std::sync::Arc;

/// One search engine the orchestrator can query.
///
/// Implementations must surface every fetch failure as an error. Zero results
/// is a successful, empty answer.
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    /// Fetch up to `max_results` results for `query`.
    async fn fetch_results(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError>;

    /// Which engine this backend talks to.
    fn shape(&self) -> EngineShape;
}

/// [`SearchBackend`] that fetches an engine's HTML page and parses it.
pub struct EngineAdapter {
    shape: EngineShape,
    fetcher: Arc<dyn PageFetcher>,
    config: SearchConfig,
}

impl EngineAdapter {
    pub fn new(shape: EngineShape, fetcher: Arc<dyn PageFetcher>, config: SearchConfig) -> Self {
        Self {
            shape,
            fetcher,
            config,
        }
    }

    fn request_for(&self, query: &str) -> FetchRequest {
        FetchRequest {
            url: self.shape.search_url(query),
            headers: vec![
                ("User-Agent".to_string(), self.config.user_agent().to_string()),
                (
                    "Accept-Language".to_string(),
                    "zh-CN,zh;q=0.9,en;q=0.8".to_string(),
                ),
            ],
            timeout: self.config.timeout,
        }
    }
}

#[async_trait::async_trait]
impl SearchBackend for EngineAdapter {
    async fn fetch_results(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let request = self.request_for(query);
        tracing::debug!(engine = %self.shape, url = %request.url, "Fetching result page");

        let body = self.fetcher.fetch(&request).await?;
        tracing::trace!(engine = %self.shape, bytes = body.len(), "Result page received");

        let mut results = parser::parse(&body, self.shape)?;
        results.truncate(max_results);
        Ok(results)
    }

    fn shape(&self) -> EngineShape {
        self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Serves one canned body (or error) and records every request.
    struct CannedFetcher {
        body: Result<String, fn() -> SearchError>,
        seen: Mutex<Vec<FetchRequest>>,
    }

    impl CannedFetcher {
        fn ok(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: fn() -> SearchError) -> Self {
            Self {
                body: Err(err),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl PageFetcher for CannedFetcher {
        async fn fetch(&self, request: &FetchRequest) -> Result<String, SearchError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.body {
                Ok(body) => Ok(body.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn bing_page(n: usize) -> String {
        let blocks: String = (1..=n)
            .map(|i| {
                format!(
                    r#"<li class="b_algo"><h2><a href="https://r{i}.example/">Result {i}</a></h2><div class="b_caption"><p>Snippet {i}</p></div></li>"#
                )
            })
            .collect();
        format!("<html><body><ol>{blocks}</ol></body></html>")
    }

    #[tokio::test]
    async fn builds_request_from_shape_and_config() {
        let fetcher = Arc::new(CannedFetcher::ok(""));
        let config = SearchConfig {
            timeout: Duration::from_secs(4),
            ..SearchConfig::default()
        };
        let adapter = EngineAdapter::new(EngineShape::DuckDuckGo, fetcher.clone(), config);

        adapter.fetch_results("rust lang", 3).await.unwrap();

        let seen = fetcher.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "https://duckduckgo.com/html/?q=rust+lang");
        assert_eq!(seen[0].timeout, Duration::from_secs(4));
        assert!(seen[0]
            .headers
            .iter()
            .any(|(name, value)| name == "User-Agent" && value.contains("Mozilla")));
    }

    #[tokio::test]
    async fn caps_results() {
        let fetcher = Arc::new(CannedFetcher::ok(&bing_page(5)));
        let adapter = EngineAdapter::new(EngineShape::Bing, fetcher, SearchConfig::default());

        let results = adapter.fetch_results("tokio", 3).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Result 1");
        assert_eq!(results[2].url, "https://r3.example/");
    }

    #[tokio::test]
    async fn empty_page_is_success() {
        let fetcher = Arc::new(CannedFetcher::ok("<html></html>"));
        let adapter = EngineAdapter::new(EngineShape::Bing, fetcher, SearchConfig::default());
        assert!(adapter.fetch_results("x", 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let fetcher = Arc::new(CannedFetcher::failing(|| SearchError::Status {
            engine: "duckduckgo.com".into(),
            status: 503,
        }));
        let adapter =
            EngineAdapter::new(EngineShape::DuckDuckGo, fetcher, SearchConfig::default());

        let err = adapter.fetch_results("x", 3).await.unwrap_err();
        assert!(matches!(err, SearchError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn reports_shape() {
        let fetcher = Arc::new(CannedFetcher::ok(""));
        let adapter = EngineAdapter::new(EngineShape::Bing, fetcher, SearchConfig::default());
        assert_eq!(adapter.shape(), EngineShape::Bing);
    }
}
