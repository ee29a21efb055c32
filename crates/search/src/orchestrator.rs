//! Primary/secondary search with a single fallback hop.

use crate::adapter::{EngineAdapter, SearchBackend};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::types::{EngineShape, SearchResult};
use std::sync::Arc;

/// Web search entry point used by the chat pipeline and the caller surfaces.
///
/// DuckDuckGo is queried first. Only when it answers successfully with no
/// results is Bing consulted. Failures never escape [`WebSearch::search_web`];
/// they come back as a single synthetic [`SearchResult`].
#[derive(Clone)]
pub struct WebSearch {
    primary: Arc<dyn SearchBackend>,
    secondary: Arc<dyn SearchBackend>,
    default_max_results: usize,
}

impl WebSearch {
    /// Build from two backends.
    pub fn new(
        primary: Arc<dyn SearchBackend>,
        secondary: Arc<dyn SearchBackend>,
        default_max_results: usize,
    ) -> Self {
        Self {
            primary,
            secondary,
            default_max_results,
        }
    }

    /// DuckDuckGo then Bing over a real HTTP fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for a zero timeout and
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        if config.timeout.is_zero() {
            return Err(SearchError::Config("timeout must be greater than zero".into()));
        }
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new()?);
        Ok(Self::with_fetcher(fetcher, config))
    }

    /// DuckDuckGo then Bing over the given fetcher.
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, config: &SearchConfig) -> Self {
        let primary = EngineAdapter::new(EngineShape::DuckDuckGo, fetcher.clone(), config.clone());
        let secondary = EngineAdapter::new(EngineShape::Bing, fetcher, config.clone());
        Self::new(Arc::new(primary), Arc::new(secondary), config.max_results)
    }

    /// Result count used when callers do not pass one.
    pub fn default_max_results(&self) -> usize {
        self.default_max_results
    }

    /// Search the web, never failing.
    ///
    /// - primary error: one "搜索失败" result carrying the error text
    /// - primary empty: the secondary's results, or one "搜索不可用" result
    ///   if the secondary fails
    ///
    /// Results are truncated to `max_results`.
    pub async fn search_web(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        let mut results = match self.primary.fetch_results(query, max_results).await {
            Err(e) => {
                tracing::warn!(engine = %self.primary.shape(), error = %e, "Primary search failed");
                return vec![SearchResult::failure(e)];
            }
            Ok(results) if !results.is_empty() => results,
            Ok(_) => {
                tracing::debug!(
                    primary = %self.primary.shape(),
                    secondary = %self.secondary.shape(),
                    "Primary returned no results, falling back"
                );
                match self.secondary.fetch_results(query, max_results).await {
                    Ok(results) => results,
                    Err(e) => {
                        tracing::warn!(engine = %self.secondary.shape(), error = %e, "Fallback search failed");
                        return vec![SearchResult::unavailable()];
                    }
                }
            }
        };

        results.truncate(max_results);
        tracing::debug!(query, count = results.len(), "Search complete");
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FAILURE_TITLE, UNAVAILABLE_TITLE};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend returning a fixed outcome and counting calls.
    struct MockBackend {
        shape: EngineShape,
        outcome: Result<Vec<SearchResult>, String>,
        calls: AtomicUsize,
    }

    impl MockBackend {
        fn returning(shape: EngineShape, results: Vec<SearchResult>) -> Arc<Self> {
            Arc::new(Self {
                shape,
                outcome: Ok(results),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(shape: EngineShape, message: &str) -> Arc<Self> {
            Arc::new(Self {
                shape,
                outcome: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl SearchBackend for MockBackend {
        async fn fetch_results(
            &self,
            _query: &str,
            _max_results: usize,
        ) -> Result<Vec<SearchResult>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone().map_err(SearchError::Http)
        }

        fn shape(&self) -> EngineShape {
            self.shape
        }
    }

    fn results(n: usize) -> Vec<SearchResult> {
        (1..=n)
            .map(|i| SearchResult::new(format!("T{i}"), format!("https://{i}.example"), format!("S{i}")))
            .collect()
    }

    #[tokio::test]
    async fn primary_failure_yields_failure_marker() {
        let primary = MockBackend::failing(EngineShape::DuckDuckGo, "connection refused");
        let secondary = MockBackend::returning(EngineShape::Bing, results(2));
        let search = WebSearch::new(primary.clone(), secondary.clone(), 3);

        let out = search.search_web("bitcoin price", 3).await;

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, FAILURE_TITLE);
        assert!(out[0].url.is_empty());
        assert!(out[0].snippet.contains("connection refused"));
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn empty_primary_falls_back_to_secondary() {
        let primary = MockBackend::returning(EngineShape::DuckDuckGo, vec![]);
        let secondary = MockBackend::returning(EngineShape::Bing, results(2));
        let search = WebSearch::new(primary.clone(), secondary.clone(), 3);

        let out = search.search_web("obscure query", 3).await;

        assert_eq!(out, results(2));
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn secondary_failure_yields_unavailable_marker() {
        let primary = MockBackend::returning(EngineShape::DuckDuckGo, vec![]);
        let secondary = MockBackend::failing(EngineShape::Bing, "timeout");
        let search = WebSearch::new(primary, secondary, 3);

        let out = search.search_web("x", 3).await;

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, UNAVAILABLE_TITLE);
        assert!(out[0].url.is_empty());
    }

    #[tokio::test]
    async fn both_empty_yields_empty() {
        let primary = MockBackend::returning(EngineShape::DuckDuckGo, vec![]);
        let secondary = MockBackend::returning(EngineShape::Bing, vec![]);
        let search = WebSearch::new(primary, secondary, 3);

        assert!(search.search_web("x", 3).await.is_empty());
    }

    #[tokio::test]
    async fn primary_results_skip_secondary() {
        let primary = MockBackend::returning(EngineShape::DuckDuckGo, results(1));
        let secondary = MockBackend::returning(EngineShape::Bing, results(3));
        let search = WebSearch::new(primary, secondary.clone(), 3);

        let out = search.search_web("x", 3).await;

        assert_eq!(out, results(1));
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn results_are_truncated() {
        let primary = MockBackend::returning(EngineShape::DuckDuckGo, results(5));
        let secondary = MockBackend::returning(EngineShape::Bing, vec![]);
        let search = WebSearch::new(primary, secondary, 3);

        assert_eq!(search.search_web("x", 2).await.len(), 2);
    }

    #[test]
    fn from_config_rejects_zero_timeout() {
        let config = SearchConfig {
            timeout: std::time::Duration::ZERO,
            ..SearchConfig::default()
        };
        assert!(matches!(
            WebSearch::from_config(&config),
            Err(SearchError::Config(_))
        ));
    }

    #[test]
    fn from_config_uses_default_count() {
        let search = WebSearch::from_config(&SearchConfig::default()).unwrap();
        assert_eq!(search.default_max_results(), 3);
    }

    #[tokio::test]
    #[ignore] // requires network access
    async fn live_search() {
        let search = WebSearch::from_config(&SearchConfig::default()).unwrap();
        let out = search.search_web("rust programming language", 3).await;
        assert!(!out.is_empty());
        assert!(out.len() <= 3);
    }
}
