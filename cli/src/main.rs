mod args;
mod dns;
mod logging;
mod output;
mod view;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use dns::DnsCache;
use logging::Logging;
use nats_top::client::MonitoringClient;
use nats_top::http::client::HttpClient;
use nats_top::monitor::{MonitorOptions, StatsMonitor};
use output::DisplayOptions;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut logging = Logging::new();
    logging.init(args.output.is_none(), &args.debug);

    let client =
        HttpClient::create(args.http_config()).context("cannot create the monitoring client")?;

    // One throwaway request up front turns an unreachable or misconfigured
    // server into a clean startup error instead of an endlessly failing view.
    client
        .get_varz()
        .await
        .with_context(|| format!("/varz smoke test failed for {}", args.api_url()))?;
    info!("monitoring {}", args.api_url());

    let monitor_options = Arc::new(MonitorOptions::new(
        args.delay,
        args.conns,
        args.sort,
        args.display_subscriptions,
    ));
    let mut monitor = StatsMonitor::new(client, monitor_options.clone());

    if let Some(target) = &args.output {
        let stats = monitor.fetch_stats().await;
        let options = DisplayOptions::from_args(&args);
        let mut dns = DnsCache::new();
        let text = match &args.delimiter {
            Some(delimiter) => output::csv(&stats, &options, &mut dns, delimiter),
            None => output::plain_text(&stats, &options, &mut dns),
        };
        if target == "-" {
            print!("{text}");
        } else {
            std::fs::write(target, &text).with_context(|| format!("cannot write {target}"))?;
        }
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (stats_rx, monitor_task) = monitor.spawn(shutdown_rx);

    view::run(&args, monitor_options, stats_rx).await?;

    shutdown_tx.send(true).ok();
    monitor_task.await.context("monitor task failed")?;
    Ok(())
}
