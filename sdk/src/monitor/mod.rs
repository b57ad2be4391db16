pub mod engine;

use crate::client::MonitoringClient;
use crate::models::connz::{ConnzQuery, SortOption};
use crate::models::stats::Stats;
use self::engine::StatsEngine;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error};

/// The value published after every poll cycle. `None` until the first cycle
/// completes.
pub type SharedStats = Option<Arc<Stats>>;

/// Runtime options of the poll scheduler. The subscriptions flag is shared
/// with the display layer, which toggles it while the poller is running;
/// interval, limit and sort key are fixed at startup.
#[derive(Debug)]
pub struct MonitorOptions {
    pub interval: Duration,
    pub limit: u32,
    pub sort: SortOption,
    display_subs: AtomicBool,
}

impl MonitorOptions {
    pub fn new(interval: Duration, limit: u32, sort: SortOption, display_subs: bool) -> Self {
        MonitorOptions {
            interval,
            limit,
            sort,
            display_subs: AtomicBool::new(display_subs),
        }
    }

    pub fn display_subs(&self) -> bool {
        self.display_subs.load(Ordering::Relaxed)
    }

    pub fn set_display_subs(&self, value: bool) {
        self.display_subs.store(value, Ordering::Relaxed);
    }

    /// The `/connz` query for the next cycle.
    pub fn connz_query(&self) -> ConnzQuery {
        ConnzQuery {
            limit: self.limit,
            sort: self.sort,
            subs: self.display_subs().then_some(1),
        }
    }
}

impl Default for MonitorOptions {
    fn default() -> Self {
        MonitorOptions::new(Duration::from_secs(1), 1024, SortOption::Cid, false)
    }
}

/// The poll scheduler: drives the fetch→compute→publish cycle on a fixed
/// interval until shut down.
///
/// Each cycle issues the two endpoint fetches concurrently and waits for
/// both; a failure of either makes the whole cycle a failure and no partial
/// snapshot is ever published. The resulting `Stats` is published through a
/// watch channel as a single reference swap, so readers always observe a
/// complete cycle. At most one poll is in flight at a time; the next tick is
/// scheduled a fixed delay after cycle completion.
#[derive(Debug)]
pub struct StatsMonitor<C> {
    client: C,
    options: Arc<MonitorOptions>,
    engine: StatsEngine,
}

impl<C: MonitoringClient + 'static> StatsMonitor<C> {
    pub fn new(client: C, options: Arc<MonitorOptions>) -> Self {
        StatsMonitor {
            client,
            options,
            engine: StatsEngine::new(),
        }
    }

    /// Run a single fetch→compute cycle and return the `Stats` to publish.
    pub async fn fetch_stats(&mut self) -> Arc<Stats> {
        let query = self.options.connz_query();
        let (varz, connz) = tokio::join!(self.client.get_varz(), self.client.get_connz(&query));
        match (varz, connz) {
            (Ok(varz), Ok(connz)) => self.engine.process(varz, connz),
            (Err(cause), _) | (_, Err(cause)) => {
                error!("stats fetch failed: {cause}");
                self.engine.process_error(cause)
            }
        }
    }

    /// Spawn the polling loop on a background task.
    ///
    /// The loop never stops on a failed cycle; it runs until the shutdown
    /// signal fires (observed between cycles, after the publish of the
    /// current one) or until every stats receiver is dropped.
    pub fn spawn(
        mut self,
        mut shutdown: watch::Receiver<bool>,
    ) -> (watch::Receiver<SharedStats>, JoinHandle<()>) {
        let (publisher, stats_rx) = watch::channel(None);
        let interval = self.options.interval;
        let handle = tokio::spawn(async move {
            loop {
                let stats = self.fetch_stats().await;
                if publisher.send(Some(stats)).is_err() {
                    debug!("all stats receivers dropped, stopping the monitor");
                    break;
                }
                tokio::select! {
                    _ = sleep(interval) => {}
                    _ = shutdown.changed() => {
                        debug!("shutdown requested, stopping the monitor");
                        break;
                    }
                }
            }
        });
        (stats_rx, handle)
    }
}
