use crate::{
    coindesk::CoindeskExtractor,
    error::{ExtractError, PollError},
    utils::get_now,
    ArticleSighting, Extractor, PageSource, Ticker,
};
use chrono::{DateTime, FixedOffset};
use tracing::{error, info, warn};

/// What the poller remembers between cycles. Lives as long as the process.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PollerState {
    /// Cache age seen by the last HEAD.
    pub last_seen_age: Option<u64>,
    /// Link of the last reported top article.
    pub last_seen_link: Option<String>,
    pub last_changed_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Active,
    /// Terminal; nothing restarts a stopped poller.
    Stopped,
}

/// Outcome of a successful cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// The edge cache has not been refreshed; nothing was fetched.
    CacheUnchanged { age: u64 },
    NewArticle(ArticleSighting),
    NoChange(ArticleSighting),
}

pub struct Poller<S, E = CoindeskExtractor> {
    source: S,
    extractor: E,
    max_bytes: usize,
    use_freshness_check: bool,
    state: PollerState,
    scheduler: SchedulerState,
}

impl<S, E> Poller<S, E>
where
    S: PageSource,
    E: Extractor,
{
    pub fn new(source: S, extractor: E, max_bytes: usize) -> Self {
        Poller {
            source,
            extractor,
            max_bytes,
            use_freshness_check: true,
            state: PollerState::default(),
            scheduler: SchedulerState::Active,
        }
    }

    pub fn with_freshness_check(mut self, enabled: bool) -> Self {
        self.use_freshness_check = enabled;
        self
    }

    pub fn with_state(mut self, state: PollerState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &PollerState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler
    }

    pub fn is_stopped(&self) -> bool {
        self.scheduler == SchedulerState::Stopped
    }

    pub fn stop(&mut self) {
        self.scheduler = SchedulerState::Stopped;
    }

    /// Polls once right away, then once per tick until stopped or the ticker
    /// runs dry. Each cycle finishes before the next tick is awaited.
    pub async fn run<T: Ticker + Send>(&mut self, ticker: &mut T) {
        if self.is_stopped() {
            return;
        }

        self.poll().await;
        while !self.is_stopped() && ticker.tick().await {
            self.poll().await;
        }

        if self.is_stopped() {
            info!("poller stopped");
        }
    }

    /// Runs one cycle. Every failure is logged here and never escapes; a rate
    /// limit stops the poller.
    pub async fn poll(&mut self) -> Option<PollEvent> {
        if self.is_stopped() {
            return None;
        }

        match self.try_poll().await {
            Ok(event) => {
                self.report(&event);
                Some(event)
            }
            Err(err) => {
                self.handle_error(err);
                None
            }
        }
    }

    async fn try_poll(&mut self) -> Result<PollEvent, PollError> {
        if self.use_freshness_check {
            let age = self.source.cache_age().await?;
            let unchanged = matches!(self.state.last_seen_age, Some(prev) if age >= prev);
            self.state.last_seen_age = Some(age);
            if unchanged {
                return Ok(PollEvent::CacheUnchanged { age });
            }
            info!(
                age,
                max_bytes = self.max_bytes,
                "cache refreshed, fetching page prefix"
            );
        } else {
            info!(max_bytes = self.max_bytes, "fetching page prefix");
        }

        let html = self.source.fetch_prefix(self.max_bytes).await?;
        let sighting = self.extractor.extract_str(&html)?;

        if sighting.title.is_empty() {
            warn!(link = %sighting.link, "degraded sighting: empty title");
        }

        if self.state.last_seen_link.as_deref() == Some(sighting.link.as_str()) {
            return Ok(PollEvent::NoChange(sighting));
        }

        self.state.last_seen_link = Some(sighting.link.clone());
        self.state.last_changed_at = Some(get_now());
        Ok(PollEvent::NewArticle(sighting))
    }

    fn report(&self, event: &PollEvent) {
        match event {
            PollEvent::CacheUnchanged { age } => {
                info!(age, "cache age not lower than last seen, no change");
            }
            PollEvent::NewArticle(sighting) => {
                info!(title = %sighting.title, link = %sighting.link, "new top article");
            }
            PollEvent::NoChange(sighting) => {
                info!(
                    title = %sighting.title,
                    link = %sighting.link,
                    since = ?self.state.last_changed_at,
                    "top article unchanged"
                );
            }
        }
    }

    fn handle_error(&mut self, err: PollError) {
        if let PollError::RateLimited { stage } = err {
            warn!(%stage, "rate limited (429), stopping poll");
            self.stop();
            return;
        }

        // Force a full fetch next cycle.
        self.state.last_seen_age = None;

        match err {
            PollError::Extract(ExtractError::NotFound) => {
                warn!(
                    max_bytes = self.max_bytes,
                    "top article selector not found in fetched bytes"
                );
            }
            PollError::Extract(ExtractError::Incomplete(reason)) => {
                warn!(reason, "incomplete anchor in fetched bytes");
            }
            err => error!(error = %err, "poll failed"),
        }
    }
}
