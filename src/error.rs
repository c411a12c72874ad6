use std::fmt;

/// Which request of a poll cycle produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Freshness,
    Fetch,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Freshness => write!(f, "HEAD"),
            Stage::Fetch => write!(f, "GET"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("top container not found")]
    NotFound,
    #[error("incomplete anchor ({0})")]
    Incomplete(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("rate limited (429) on {stage}")]
    RateLimited { stage: Stage },
    #[error("unexpected status {status} on {stage}")]
    UnexpectedStatus {
        stage: Stage,
        status: reqwest::StatusCode,
    },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl PollError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, PollError::RateLimited { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("invalid target url {url:?}: {reason}")]
    TargetUrl { url: String, reason: String },
}
