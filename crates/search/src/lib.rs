//! Keyless web search for Scout.
//!
//! Scrapes public HTML result pages, so no API keys are needed:
//!
//! - [`parser`] extracts results from a page for a given [`EngineShape`]
//! - [`adapter`] fetches one engine's page and parses it
//! - [`orchestrator`] runs the primary engine and, when it finds nothing,
//!   a single fallback hop to the secondary engine
//! - [`format`] renders results as text for prompts and terminals
//!
//! # Example
//!
//! ```no_run
//! use scout_search::{format_search_results, SearchConfig, WebSearch};
//!
//! # async fn example() -> Result<(), scout_search::SearchError> {
//! let search = WebSearch::from_config(&SearchConfig::default())?;
//! let results = search.search_web("rust async", 3).await;
//! println!("{}", format_search_results(&results));
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod orchestrator;
pub mod parser;
pub mod types;

pub use adapter::{EngineAdapter, SearchBackend};
pub use config::SearchConfig;
pub use error::SearchError;
pub use fetch::{FetchRequest, HttpFetcher, PageFetcher};
pub use format::{format_search_results, NO_RESULTS_TEXT};
pub use orchestrator::WebSearch;
pub use types::{EngineShape, SearchResult};
