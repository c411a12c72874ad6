use crate::{coindesk::DEFAULT_TARGET_URL, ConfigError};
use clap::{ArgAction, Parser};
use reqwest::Url;
use std::time::Duration;

/// Startup configuration; every option can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "coindesk-top-watch", version, about = "Log whenever the top article of a news page changes")]
pub struct Config {
    /// Spacing between poll cycles, in milliseconds
    #[arg(long, env = "POLL_INTERVAL_MS", default_value_t = 2000)]
    pub poll_interval_ms: u64,

    /// How many bytes of the page to request per fetch
    #[arg(long, env = "MAX_BYTES", default_value_t = 32 * 1024)]
    pub max_bytes: usize,

    /// Page to poll
    #[arg(long, env = "TARGET_URL", default_value = DEFAULT_TARGET_URL)]
    pub target_url: String,

    /// Skip the fetch when a HEAD shows the edge cache has not been refreshed
    #[arg(long, env = "USE_FRESHNESS_CHECK", default_value_t = true, action = ArgAction::Set)]
    pub use_freshness_check: bool,

    #[arg(long, env = "HEAD_TIMEOUT_MS", default_value_t = 3000)]
    pub head_timeout_ms: u64,

    #[arg(long, env = "FETCH_TIMEOUT_MS", default_value_t = 5000)]
    pub fetch_timeout_ms: u64,

    /// Run a single poll cycle and exit
    #[arg(long)]
    pub once: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            poll_interval_ms: 2000,
            max_bytes: 32 * 1024,
            target_url: DEFAULT_TARGET_URL.to_string(),
            use_freshness_check: true,
            head_timeout_ms: 3000,
            fetch_timeout_ms: 5000,
            once: false,
        }
    }
}

impl Config {
    /// Checks the options and returns the parsed target url.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        for (name, value) in [
            ("poll interval", self.poll_interval_ms),
            ("max bytes", self.max_bytes as u64),
            ("head timeout", self.head_timeout_ms),
            ("fetch timeout", self.fetch_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero(name));
            }
        }

        let url = Url::parse(&self.target_url).map_err(|e| ConfigError::TargetUrl {
            url: self.target_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::TargetUrl {
                url: self.target_url.clone(),
                reason: "scheme must be http or https".to_string(),
            });
        }
        Ok(url)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
