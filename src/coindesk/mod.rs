mod extractor;
mod strategies;

pub use extractor::CoindeskExtractor;
pub use strategies::{Probe, Strategy, STRATEGIES};

pub const DEFAULT_TARGET_URL: &str = "https://www.coindesk.com/latest-crypto-news";
