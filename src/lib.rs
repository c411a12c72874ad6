use scraper::Html;
use std::fmt;

pub mod coindesk;
pub mod config;
pub mod poller;
pub mod source;
pub mod ticker;

mod error;
mod utils;

pub use config::Config;
pub use error::{ConfigError, ExtractError, PollError, Stage};
pub use poller::{PollEvent, Poller, PollerState, SchedulerState};
pub use source::HttpSource;
pub use ticker::{CountedTicker, IntervalTicker};
pub use utils::{absolutize, site_origin};

/// The top article as seen during one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSighting {
    pub title: String,
    /// Absolute link; the article's identity.
    pub link: String,
}

impl fmt::Display for ArticleSighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title : {}", self.title)?;
        write!(f, "Link  : {}", self.link)
    }
}

pub trait Extractor {
    fn extract(&self, doc: &Html) -> Result<ArticleSighting, ExtractError>;

    /// Parses `html` (possibly truncated) and extracts from it. The parsed tree
    /// does not outlive the call.
    fn extract_str(&self, html: &str) -> Result<ArticleSighting, ExtractError> {
        let doc = Html::parse_document(html);
        self.extract(&doc)
    }
}

/// Where the poller gets its bytes from.
#[async_trait::async_trait]
pub trait PageSource {
    /// Seconds the page has spent in the edge cache, 0 when unknown.
    async fn cache_age(&self) -> Result<u64, PollError>;

    /// At most `max_bytes` of the page body, decoded as UTF-8.
    async fn fetch_prefix(&self, max_bytes: usize) -> Result<String, PollError>;
}

/// Drives repeated poll cycles.
#[async_trait::async_trait]
pub trait Ticker {
    /// Waits for the next tick. Returns `false` once no more ticks will come.
    async fn tick(&mut self) -> bool;
}
