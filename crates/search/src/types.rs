//! Core search types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title of the synthetic result returned when the primary engine fails.
pub const FAILURE_TITLE: &str = "搜索失败";

/// Title of the synthetic result returned when the fallback engine fails.
pub const UNAVAILABLE_TITLE: &str = "搜索不可用";

const UNAVAILABLE_SNIPPET: &str = "当前无法进行网络搜索，请稍后再试。";

/// A single search result.
///
/// Parsed results always have a non-empty title and snippet; `url` is empty
/// only for synthetic failure results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }

    /// Placeholder for a failed primary search, embedding the error text.
    pub fn failure(error: impl fmt::Display) -> Self {
        Self::new(
            FAILURE_TITLE,
            "",
            format!("很抱歉，无法完成网络搜索。错误信息: {error}"),
        )
    }

    /// Placeholder for a failed fallback search.
    pub fn unavailable() -> Self {
        Self::new(UNAVAILABLE_TITLE, "", UNAVAILABLE_SNIPPET)
    }

    /// Whether this is one of the placeholders above.
    pub fn is_synthetic(&self) -> bool {
        self.url.is_empty() && (self.title == FAILURE_TITLE || self.title == UNAVAILABLE_TITLE)
    }
}

/// Markup shape of a supported engine's result page.
///
/// Each variant fixes the search URL template, the origin used to resolve
/// relative links and the extraction rules in [`crate::parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineShape {
    DuckDuckGo,
    Bing,
}

impl EngineShape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Bing",
        }
    }

    /// Prefix the percent-encoded query is appended to.
    pub fn url_template(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "https://duckduckgo.com/html/?q=",
            Self::Bing => "https://www.bing.com/search?q=",
        }
    }

    /// Origin that relative result links are resolved against.
    pub fn origin(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "https://duckduckgo.com",
            Self::Bing => "https://www.bing.com",
        }
    }

    /// Full results-page URL for `query`.
    pub fn search_url(&self, query: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!("{}{}", self.url_template(), encoded)
    }
}

impl fmt::Display for EngineShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_query() {
        assert_eq!(
            EngineShape::DuckDuckGo.search_url("bitcoin price"),
            "https://duckduckgo.com/html/?q=bitcoin+price"
        );
        assert_eq!(
            EngineShape::Bing.search_url("a&b=c"),
            "https://www.bing.com/search?q=a%26b%3Dc"
        );
        assert_eq!(
            EngineShape::Bing.search_url("天气"),
            "https://www.bing.com/search?q=%E5%A4%A9%E6%B0%94"
        );
    }

    #[test]
    fn failure_result_embeds_error() {
        let result = SearchResult::failure("connection reset");
        assert_eq!(result.title, FAILURE_TITLE);
        assert!(result.url.is_empty());
        assert!(result.snippet.contains("connection reset"));
        assert!(result.is_synthetic());
    }

    #[test]
    fn unavailable_result_is_distinct() {
        let result = SearchResult::unavailable();
        assert_eq!(result.title, UNAVAILABLE_TITLE);
        assert_ne!(result.title, FAILURE_TITLE);
        assert!(result.is_synthetic());
    }

    #[test]
    fn parsed_result_is_not_synthetic() {
        let result = SearchResult::new("A", "https://a.example", "s");
        assert!(!result.is_synthetic());
    }

    #[test]
    fn result_serializes_to_json() {
        let json = serde_json::to_value(SearchResult::new("A", "http://x", "s")).unwrap();
        assert_eq!(json["title"], "A");
        assert_eq!(json["url"], "http://x");
        assert_eq!(json["snippet"], "s");
    }
}
