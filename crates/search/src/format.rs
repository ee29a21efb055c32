//! Text rendering of search results.

use crate::types::SearchResult;
use std::fmt::Write;

/// Output for an empty result list.
pub const NO_RESULTS_TEXT: &str = "没有找到相关搜索结果。";

const HEADER: &str = "🌐 搜索结果：";

/// Render results as a numbered block list for prompts and terminals.
///
/// Each block is `N. **title**`, the indented snippet and, when the result
/// has one, an indented `🔗 url` line. Blocks are separated by a blank line.
pub fn format_search_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS_TEXT.to_string();
    }

    let mut out = format!("{HEADER}\n\n");
    for (i, result) in results.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{}. **{}**", i + 1, result.title);
        let _ = writeln!(out, "   {}", result.snippet);
        if !result.url.is_empty() {
            let _ = writeln!(out, "   🔗 {}", result.url);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_results() {
        assert_eq!(format_search_results(&[]), "没有找到相关搜索结果。");
    }

    #[test]
    fn single_result_order() {
        let text = format_search_results(&[SearchResult::new("A", "http://x", "s")]);

        assert!(text.starts_with("🌐 搜索结果："));
        let title_at = text.find("1. **A**").unwrap();
        let snippet_at = text.find("   s\n").unwrap();
        let url_at = text.find("http://x").unwrap();
        assert!(title_at < snippet_at && snippet_at < url_at);
        assert_eq!(
            text,
            "🌐 搜索结果：\n\n1. **A**\n   s\n   🔗 http://x\n\n"
        );
    }

    #[test]
    fn synthetic_result_has_no_link_line() {
        let text = format_search_results(&[SearchResult::unavailable()]);
        assert!(text.contains("1. **搜索不可用**"));
        assert!(!text.contains("🔗"));
    }

    #[test]
    fn numbering_is_one_based_and_sequential() {
        let results = vec![
            SearchResult::new("A", "http://a", "sa"),
            SearchResult::new("B", "http://b", "sb"),
            SearchResult::new("C", "", "sc"),
        ];
        let text = format_search_results(&results);
        assert!(text.contains("1. **A**"));
        assert!(text.contains("2. **B**"));
        assert!(text.contains("3. **C**\n   sc\n\n"));
    }
}
