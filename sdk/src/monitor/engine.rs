use crate::error::MonitorError;
use crate::models::connz::{ConnInfo, Connz};
use crate::models::stats::{ConnRates, Rates, Stats};
use crate::models::varz::Varz;
use ahash::AHashMap;
use std::sync::Arc;

/// The statistics engine: turns raw polled snapshots into derived rates by
/// diffing against a retained baseline.
///
/// The baseline is the last successful server snapshot plus the connection
/// index keyed by `cid`. It is replaced wholesale on every successful poll
/// and left untouched on a failed one, so the next successful poll diffs
/// against the last good data (with the elapsed time spanning the gap)
/// instead of restarting cold.
#[derive(Debug, Default)]
pub struct StatsEngine {
    last_varz: Option<Varz>,
    last_conns: AHashMap<u64, ConnInfo>,
}

impl StatsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the snapshots of a successful poll: compute rates against the
    /// baseline, replace the baseline, and return the `Stats` to publish.
    pub fn process(&mut self, varz: Varz, connz: Connz) -> Arc<Stats> {
        let rates = self.compute_rates(&varz, &connz);
        self.last_varz = Some(varz.clone());
        self.last_conns = connz
            .connections
            .iter()
            .map(|conn| (conn.cid, conn.clone()))
            .collect();
        Arc::new(Stats {
            varz: Some(varz),
            connz: Some(connz),
            rates,
            error: None,
        })
    }

    /// Turn a failed poll into the `Stats` to publish. The diff baseline is
    /// left untouched.
    pub fn process_error(&mut self, error: MonitorError) -> Arc<Stats> {
        Arc::new(Stats {
            varz: None,
            connz: None,
            rates: None,
            error: Some(error.to_string()),
        })
    }

    fn compute_rates(&self, varz: &Varz, connz: &Connz) -> Option<Rates> {
        let last = self.last_varz.as_ref()?;
        let elapsed = (varz.now - last.now).num_milliseconds() as f64 / 1000.0;
        if elapsed <= 0.0 {
            return None;
        }

        let mut connections = AHashMap::with_capacity(connz.connections.len());
        for conn in &connz.connections {
            // A cid without history gets zeroes for this cycle; duplicate
            // cids within one poll take last-write-wins.
            let rates = match self.last_conns.get(&conn.cid) {
                Some(last_conn) => ConnRates {
                    in_msgs_rate: (conn.in_msgs - last_conn.in_msgs) as f64,
                    out_msgs_rate: (conn.out_msgs - last_conn.out_msgs) as f64,
                    in_bytes_rate: (conn.in_bytes - last_conn.in_bytes) as f64,
                    out_bytes_rate: (conn.out_bytes - last_conn.out_bytes) as f64,
                },
                None => ConnRates::default(),
            };
            connections.insert(conn.cid, rates);
        }

        Some(Rates {
            in_msgs_rate: (varz.in_msgs - last.in_msgs) as f64 / elapsed,
            out_msgs_rate: (varz.out_msgs - last.out_msgs) as f64 / elapsed,
            in_bytes_rate: (varz.in_bytes - last.in_bytes) as f64 / elapsed,
            out_bytes_rate: (varz.out_bytes - last.out_bytes) as f64 / elapsed,
            connections,
        })
    }
}
