use crate::Ticker;
use tokio::time::{self, Duration, Instant, Interval, MissedTickBehavior};

/// Wall-clock ticker. Ticks missed while a cycle is still running are skipped,
/// so cycles never pile up behind a slow request.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    /// The first tick fires one `period` from now; the immediate poll is the
    /// caller's job.
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        IntervalTicker { interval }
    }
}

#[async_trait::async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Ticks a fixed number of times without waiting.
#[derive(Debug, Default)]
pub struct CountedTicker {
    remaining: usize,
    pub ticked: usize,
}

impl CountedTicker {
    pub fn new(ticks: usize) -> Self {
        CountedTicker {
            remaining: ticks,
            ticked: 0,
        }
    }
}

#[async_trait::async_trait]
impl Ticker for CountedTicker {
    async fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.ticked += 1;
        true
    }
}
