use crate::{error::Stage, Config, PageSource, PollError};
use reqwest::{
    header::{HeaderValue, AGE, RANGE},
    Client, StatusCode, Url,
};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Reads the polled page over HTTP: a HEAD for the cache age and a ranged GET
/// for the head of the document.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: Url,
    head_timeout: Duration,
    fetch_timeout: Duration,
}

impl HttpSource {
    pub fn new(url: Url) -> Result<Self, PollError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(HttpSource {
            client,
            url,
            head_timeout: Duration::from_millis(3000),
            fetch_timeout: Duration::from_millis(5000),
        })
    }

    pub fn from_config(cfg: &Config, url: Url) -> Result<Self, PollError> {
        Ok(HttpSource::new(url)?.with_timeouts(
            Duration::from_millis(cfg.head_timeout_ms),
            Duration::from_millis(cfg.fetch_timeout_ms),
        ))
    }

    pub fn with_timeouts(mut self, head: Duration, fetch: Duration) -> Self {
        self.head_timeout = head;
        self.fetch_timeout = fetch;
        self
    }
}

fn check_status(
    stage: Stage,
    status: StatusCode,
    accepted: fn(StatusCode) -> bool,
) -> Result<(), PollError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        Err(PollError::RateLimited { stage })
    } else if accepted(status) {
        Ok(())
    } else {
        Err(PollError::UnexpectedStatus { stage, status })
    }
}

fn head_ok(status: StatusCode) -> bool {
    status.is_success()
}

fn range_ok(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::PARTIAL_CONTENT
}

fn parse_age(value: Option<&HeaderValue>) -> u64 {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

#[async_trait::async_trait]
impl PageSource for HttpSource {
    async fn cache_age(&self) -> Result<u64, PollError> {
        let resp = self
            .client
            .head(self.url.clone())
            .timeout(self.head_timeout)
            .send()
            .await?;

        check_status(Stage::Freshness, resp.status(), head_ok)?;
        Ok(parse_age(resp.headers().get(AGE)))
    }

    async fn fetch_prefix(&self, max_bytes: usize) -> Result<String, PollError> {
        if max_bytes == 0 {
            return Ok(String::new());
        }

        let mut resp = self
            .client
            .get(self.url.clone())
            .header(RANGE, format!("bytes=0-{}", max_bytes - 1))
            .timeout(self.fetch_timeout)
            .send()
            .await?;

        check_status(Stage::Fetch, resp.status(), range_ok)?;

        // Servers that ignore Range send the whole page; stop reading at the budget.
        let mut body = Vec::with_capacity(max_bytes.min(64 * 1024));
        while let Some(chunk) = resp.chunk().await? {
            let room = max_bytes - body.len();
            body.extend_from_slice(&chunk[..chunk.len().min(room)]);
            if body.len() >= max_bytes {
                break;
            }
        }

        debug!(status = %resp.status(), bytes = body.len(), "fetched page prefix");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
