use crate::models::connz::Connz;
use crate::models::varz::Varz;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// `Stats` is the unit published after every poll cycle. Exactly one of
/// {successful fetch, error} holds: a success carries both snapshots and no
/// error, a failure carries the error message and empty snapshot fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    /// The server-wide snapshot of this cycle.
    pub varz: Option<Varz>,
    /// The per-connection snapshot of this cycle, in server order.
    pub connz: Option<Connz>,
    /// The derived rates. Absent on the first successful poll, on a
    /// non-positive elapsed time and on failed cycles.
    pub rates: Option<Rates>,
    /// The error message of a failed cycle.
    pub error: Option<String>,
}

impl Stats {
    /// The error annotation to display next to the server header, empty on a
    /// successful cycle.
    pub fn error_annotation(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }
}

/// `Rates` holds the throughput derived from two consecutive successful
/// snapshots: server-wide per-second rates plus one `ConnRates` entry for
/// every connection of the current poll, keyed by `cid`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rates {
    /// Messages received per second.
    pub in_msgs_rate: f64,
    /// Messages sent per second.
    pub out_msgs_rate: f64,
    /// Bytes received per second.
    pub in_bytes_rate: f64,
    /// Bytes sent per second.
    pub out_bytes_rate: f64,
    /// Per-connection deltas keyed by connection identifier.
    pub connections: AHashMap<u64, ConnRates>,
}

/// `ConnRates` holds the per-connection counter movement of one poll cycle.
///
/// Unlike the server-wide fields of [`Rates`], these are raw deltas between
/// two consecutive polls and are NOT normalized by elapsed time. The
/// per-connection columns of every output format are defined in terms of
/// these deltas, so the asymmetry is part of the output contract.
///
/// Values can be negative: a counter reset on the server (e.g. a restart)
/// produces a negative delta, which is passed through unmodified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnRates {
    /// Movement of the messages-received counter.
    pub in_msgs_rate: f64,
    /// Movement of the messages-sent counter.
    pub out_msgs_rate: f64,
    /// Movement of the bytes-received counter.
    pub in_bytes_rate: f64,
    /// Movement of the bytes-sent counter.
    pub out_bytes_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_annotation_is_empty_on_success() {
        let stats = Stats::default();
        assert_eq!(stats.error_annotation(), "");

        let stats = Stats {
            error: Some("connection refused".to_string()),
            ..Stats::default()
        };
        assert_eq!(stats.error_annotation(), "connection refused");
    }
}
