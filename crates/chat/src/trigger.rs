//! Retrieval trigger: decides whether an utterance needs fresh web results.
//!
//! Matching is a case-insensitive substring test against a static keyword
//! table. It is deliberately loose: "谁" matches inside longer words and
//! "price" matches inside "priceless".

use std::fmt;

/// Why an utterance was routed to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// Dates and relative time ("today", "最新").
    Temporal,
    /// News and events ("news", "发生").
    News,
    /// Values that change in real time ("weather", "股价").
    RealTime,
    /// Explicit requests to look something up ("search", "哪里").
    SearchIntent,
    /// Companies, products and assets that are frequently in the news.
    Entity,
    /// Keywords added through configuration.
    Custom,
}

impl KeywordCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temporal => "temporal",
            Self::News => "news",
            Self::RealTime => "real_time",
            Self::SearchIntent => "search_intent",
            Self::Entity => "entity",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in keyword table, grouped by category. Entries are lowercase.
pub static KEYWORD_GROUPS: &[(KeywordCategory, &[&str])] = &[
    (
        KeywordCategory::Temporal,
        &[
            "今天", "昨天", "最新", "现在", "目前", "当前", "最近", "2024", "2025", "今年", "去年",
            "today", "yesterday", "latest", "right now", "nowadays", "currently", "recent",
            "this year", "last year",
        ],
    ),
    (
        KeywordCategory::News,
        &[
            "新闻", "事件", "发生", "消息", "报道", "宣布", "news", "happened", "happening",
            "announce", "report",
        ],
    ),
    (
        KeywordCategory::RealTime,
        &[
            "天气", "股价", "汇率", "价格", "状态", "weather", "stock price", "exchange rate",
            "price", "status",
        ],
    ),
    (
        KeywordCategory::SearchIntent,
        &[
            "搜索", "查找", "寻找", "哪里", "什么时候", "谁", "search", "look up", "find",
            "where is", "when is", "who is",
        ],
    ),
    (
        KeywordCategory::Entity,
        &[
            "苹果", "iphone", "chatgpt", "openai", "google", "微软", "特斯拉", "比特币", "股票",
            "apple", "microsoft", "tesla", "bitcoin", "stock",
        ],
    ),
];

/// Whether `utterance` should be answered with web results, using the
/// built-in table only.
///
/// ```
/// use scout_chat::should_search;
///
/// assert!(should_search("今天天气怎么样"));
/// assert!(should_search("what happened today"));
/// assert!(!should_search("你好"));
/// ```
pub fn should_search(utterance: &str) -> bool {
    builtin_match(&utterance.to_lowercase()).is_some()
}

fn builtin_match(lowered: &str) -> Option<KeywordCategory> {
    if lowered.is_empty() {
        return None;
    }
    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(category, _)| *category)
}

/// Keyword classifier with optional configured extras.
#[derive(Debug, Clone, Default)]
pub struct RetrievalTrigger {
    extra: Vec<String>,
}

impl RetrievalTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add keywords on top of the built-in table. Blank entries are ignored.
    pub fn with_extra_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra.extend(
            keywords
                .into_iter()
                .map(|kw| kw.as_ref().trim().to_lowercase())
                .filter(|kw| !kw.is_empty()),
        );
        self
    }

    pub fn should_search(&self, utterance: &str) -> bool {
        self.matched_category(utterance).is_some()
    }

    /// First category whose keywords occur in `utterance`.
    pub fn matched_category(&self, utterance: &str) -> Option<KeywordCategory> {
        let lowered = utterance.to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        builtin_match(&lowered).or_else(|| {
            self.extra
                .iter()
                .any(|kw| lowered.contains(kw.as_str()))
                .then_some(KeywordCategory::Custom)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chinese_temporal_and_realtime() {
        assert!(should_search("今天天气怎么样"));
        assert!(should_search("比特币最新价格"));
        assert!(should_search("特斯拉股价"));
    }

    #[test]
    fn greeting_does_not_trigger() {
        assert!(!should_search("你好"));
        assert!(!should_search("讲个笑话"));
    }

    #[test]
    fn empty_input_is_false() {
        assert!(!should_search(""));
        assert!(!RetrievalTrigger::new().should_search(""));
    }

    #[test]
    fn english_keywords() {
        assert!(should_search("what happened today"));
        assert!(should_search("Bitcoin price?"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(should_search("Tell me about CHATGPT"));
        assert!(should_search("new IPHONE rumours"));
        assert!(should_search("OpenAI"));
    }

    #[test]
    fn matching_is_substring_based() {
        // "谁" inside a longer phrase still matches
        assert!(should_search("他是谁啊"));
        assert!(should_search("priceless"));
    }

    #[test]
    fn everyday_english_does_not_trigger() {
        assert!(!should_search("I don't know how to cook rice"));
        assert!(!should_search("Let it snow"));
        assert!(!should_search("how do I prevent merge conflicts"));
        assert!(should_search("is it raining right now"));
        assert!(should_search("what do people use nowadays"));
    }

    #[test]
    fn matched_category_reports_first_group() {
        let trigger = RetrievalTrigger::new();
        assert_eq!(
            trigger.matched_category("今天有什么新闻"),
            Some(KeywordCategory::Temporal)
        );
        assert_eq!(
            trigger.matched_category("新闻"),
            Some(KeywordCategory::News)
        );
        assert_eq!(
            trigger.matched_category("比特币"),
            Some(KeywordCategory::Entity)
        );
        assert_eq!(trigger.matched_category("你好"), None);
    }

    #[test]
    fn extra_keywords_extend_table() {
        let trigger = RetrievalTrigger::new().with_extra_keywords(["Rust 1.85", "  ", "版本"]);
        assert_eq!(
            trigger.matched_category("rust 1.85 changes"),
            Some(KeywordCategory::Custom)
        );
        assert!(trigger.should_search("最新版本"));
        assert!(!trigger.should_search("你好"));
    }

    #[test]
    fn free_function_ignores_extras() {
        assert!(!should_search("rust 1.85 changes"));
    }

    #[test]
    fn table_entries_are_lowercase() {
        for (_, keywords) in KEYWORD_GROUPS {
            for kw in *keywords {
                assert_eq!(*kw, kw.to_lowercase(), "keyword {kw:?} must be lowercase");
            }
        }
    }
}
