//! Result-page parsing.
//!
//! One entry point, [`parse`], dispatched over [`EngineShape`]. Extraction is
//! kept free of I/O so it can be exercised against canned HTML.

use crate::error::SearchError;
use crate::types::{EngineShape, SearchResult};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// CSS selectors describing one engine's result markup.
struct Selectors {
    block: Selector,
    link: Selector,
    snippet: Selector,
}

impl Selectors {
    fn for_shape(shape: EngineShape) -> Result<Self, SearchError> {
        let (block, link, snippet) = match shape {
            EngineShape::DuckDuckGo => (
                ".result:not(.result--ad)",
                ".result__title a",
                ".result__snippet",
            ),
            EngineShape::Bing => (".b_algo", "h2 a", ".b_caption p"),
        };

        Ok(Self {
            block: compile(block)?,
            link: compile(link)?,
            snippet: compile(snippet)?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector, SearchError> {
    Selector::parse(selector)
        .map_err(|e| SearchError::Parse(format!("invalid selector {selector:?}: {e:?}")))
}

/// Extract results from a results page.
///
/// Blocks missing a title, link or snippet are skipped. Whitespace inside
/// titles and snippets is collapsed to single spaces.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] only if a built-in selector fails to
/// compile. A page with no recognizable blocks parses to an empty list.
pub fn parse(body: &str, shape: EngineShape) -> Result<Vec<SearchResult>, SearchError> {
    let selectors = Selectors::for_shape(shape)?;
    let document = Html::parse_document(body);

    let results: Vec<SearchResult> = document
        .select(&selectors.block)
        .filter_map(|block| extract(block, &selectors, shape))
        .collect();

    tracing::debug!(engine = %shape, count = results.len(), "Parsed result page");
    Ok(results)
}

fn extract(block: ElementRef<'_>, selectors: &Selectors, shape: EngineShape) -> Option<SearchResult> {
    let link = block.select(&selectors.link).next()?;

    let title = collapse_whitespace(&link.text().collect::<String>());
    if title.is_empty() {
        return None;
    }

    let href = link.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    let url = resolve_link(href, shape)?;

    let snippet = block
        .select(&selectors.snippet)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))?;
    if snippet.is_empty() {
        return None;
    }

    Some(SearchResult { title, url, snippet })
}

/// Turn a raw `href` into an absolute target URL.
///
/// Protocol-relative links get `https:`, relative links are joined onto the
/// engine origin and DuckDuckGo `/l/?uddg=` redirects are unwrapped.
fn resolve_link(href: &str, shape: EngineShape) -> Option<String> {
    let base = Url::parse(shape.origin()).ok()?;
    let absolute = if href.starts_with("//") {
        Url::parse(&format!("https:{href}")).ok()?
    } else {
        base.join(href).ok()?
    };

    if shape == EngineShape::DuckDuckGo && is_ddg_redirect(&absolute) {
        return absolute
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, value)| value.into_owned())
            .filter(|target| !target.is_empty());
    }

    Some(absolute.to_string())
}

fn is_ddg_redirect(url: &Url) -> bool {
    matches!(url.host_str(), Some("duckduckgo.com" | "html.duckduckgo.com"))
        && url.path().starts_with("/l/")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_DDG_HTML: &str = r##"
    <html><body>
      <div class="result results_links results_links_deep web-result">
        <h2 class="result__title">
          <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2F&amp;rut=abc">
            Rust   Programming
            Language
          </a>
        </h2>
        <a class="result__snippet" href="#">A language empowering
           everyone to build reliable software.</a>
      </div>
      <div class="result result--ad">
        <h2 class="result__title"><a href="https://ads.example.com/">Sponsored</a></h2>
        <a class="result__snippet">Buy now</a>
      </div>
      <div class="result">
        <h2 class="result__title"><a href="https://doc.rust-lang.org/book/">The Book</a></h2>
        <a class="result__snippet">Learn Rust from the ground up.</a>
      </div>
      <div class="result">
        <h2 class="result__title"><a href="https://no-snippet.example/">No snippet</a></h2>
      </div>
      <div class="result">
        <h2 class="result__title"><a>No link</a></h2>
        <a class="result__snippet">Orphan snippet</a>
      </div>
    </body></html>
    "##;

    const MOCK_BING_HTML: &str = r#"
    <html><body>
      <ol id="b_results">
        <li class="b_algo">
          <h2><a href="https://tokio.rs/">Tokio - An asynchronous Rust runtime</a></h2>
          <div class="b_caption"><p>Tokio is an event-driven,   non-blocking I/O platform.</p></div>
        </li>
        <li class="b_algo">
          <h2><a href="/ck/a?u=abc">Relative link</a></h2>
          <div class="b_caption"><p>Resolved against Bing.</p></div>
        </li>
        <li class="b_algo">
          <h2><a href="https://empty-snippet.example/">Empty</a></h2>
          <div class="b_caption"><p>   </p></div>
        </li>
        <li class="b_ad">
          <h2><a href="https://ad.example/">Ad</a></h2>
          <div class="b_caption"><p>Not organic.</p></div>
        </li>
      </ol>
    </body></html>
    "#;

    #[test]
    fn parse_ddg_results() {
        let results = parse(MOCK_DDG_HTML, EngineShape::DuckDuckGo).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].title, "Rust Programming Language");
        assert_eq!(results[0].url, "https://www.rust-lang.org/");
        assert_eq!(
            results[0].snippet,
            "A language empowering everyone to build reliable software."
        );

        assert_eq!(results[1].title, "The Book");
        assert_eq!(results[1].url, "https://doc.rust-lang.org/book/");
    }

    #[test]
    fn parse_ddg_skips_ads_and_incomplete_blocks() {
        let results = parse(MOCK_DDG_HTML, EngineShape::DuckDuckGo).unwrap();
        assert!(results.iter().all(|r| r.title != "Sponsored"));
        assert!(results.iter().all(|r| r.title != "No snippet"));
        assert!(results.iter().all(|r| r.snippet != "Orphan snippet"));
    }

    #[test]
    fn parse_bing_results() {
        let results = parse(MOCK_BING_HTML, EngineShape::Bing).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].title, "Tokio - An asynchronous Rust runtime");
        assert_eq!(results[0].url, "https://tokio.rs/");
        assert_eq!(
            results[0].snippet,
            "Tokio is an event-driven, non-blocking I/O platform."
        );

        assert_eq!(results[1].url, "https://www.bing.com/ck/a?u=abc");
    }

    #[test]
    fn parse_uses_shape_specific_markup() {
        assert!(parse(MOCK_BING_HTML, EngineShape::DuckDuckGo)
            .unwrap()
            .is_empty());
        assert!(parse(MOCK_DDG_HTML, EngineShape::Bing).unwrap().is_empty());
    }

    #[test]
    fn parse_empty_page() {
        let results = parse("<html><body></body></html>", EngineShape::DuckDuckGo).unwrap();
        assert!(results.is_empty());
        assert!(parse("", EngineShape::Bing).unwrap().is_empty());
    }

    #[test]
    fn resolve_protocol_relative_link() {
        assert_eq!(
            resolve_link("//example.com/page", EngineShape::Bing).as_deref(),
            Some("https://example.com/page")
        );
    }

    #[test]
    fn resolve_ddg_redirect_without_target() {
        assert_eq!(
            resolve_link("//duckduckgo.com/l/?rut=abc", EngineShape::DuckDuckGo),
            None
        );
    }

    #[test]
    fn collapse_whitespace_trims_and_joins() {
        assert_eq!(collapse_whitespace("  a \n\t b  c "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
