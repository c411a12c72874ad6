use clap::Parser;
use coindesk_top_watch::{
    coindesk::CoindeskExtractor, Config, CountedTicker, HttpSource, IntervalTicker, Poller,
};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let cfg = Config::parse();
    let url = cfg.validate()?;

    let source = HttpSource::from_config(&cfg, url.clone())?;
    let mut poller = Poller::new(source, CoindeskExtractor::new(&url), cfg.max_bytes)
        .with_freshness_check(cfg.use_freshness_check);

    if cfg.once {
        poller.run(&mut CountedTicker::new(0)).await;
        return Ok(());
    }

    info!(
        url = %url,
        interval_ms = cfg.poll_interval_ms,
        max_bytes = cfg.max_bytes,
        freshness_check = cfg.use_freshness_check,
        "starting poller"
    );

    let mut ticker = IntervalTicker::new(cfg.poll_interval());
    tokio::select! {
        _ = poller.run(&mut ticker) => {}
        res = tokio::signal::ctrl_c() => {
            res?;
            info!("interrupted, shutting down");
        }
    }

    Ok(())
}
