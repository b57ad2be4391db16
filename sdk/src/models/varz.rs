use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `Varz` represents the server-wide statistics of the monitored NATS server,
/// decoded from the `/varz` monitoring endpoint. Immutable once decoded.
///
/// The message and byte counters are cumulative since server start; rates are
/// derived from the difference between two consecutive snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Varz {
    /// The CPU usage of the server process, in percent.
    #[serde(default)]
    pub cpu: f32,
    /// The memory usage of the server process, in bytes.
    #[serde(default)]
    pub mem: i64,
    /// The human-readable uptime of the server, e.g. `1d2h3m4s`.
    #[serde(default)]
    pub uptime: String,
    /// The cumulative number of messages received by the server.
    #[serde(default)]
    pub in_msgs: i64,
    /// The cumulative number of messages sent by the server.
    #[serde(default)]
    pub out_msgs: i64,
    /// The cumulative number of bytes received by the server.
    #[serde(default)]
    pub in_bytes: i64,
    /// The cumulative number of bytes sent by the server.
    #[serde(default)]
    pub out_bytes: i64,
    /// The number of connections closed for not keeping up with the server.
    #[serde(default)]
    pub slow_consumers: i64,
    /// The unique identifier of the server.
    #[serde(default)]
    pub server_id: String,
    /// The version of the server.
    #[serde(default)]
    pub version: String,
    /// The configured name of the server.
    #[serde(default)]
    pub server_name: String,
    /// The server wall clock at snapshot time. This is the authoritative
    /// clock for rate normalization, not the client's clock.
    pub now: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_varz_wire_format() {
        let json = r#"{
            "server_id": "NCVCNIS2FO4QLK4RZ4PUVVZJEYSBYKWJWTMD5UXF3ILOG6TVOQVTMRHA",
            "server_name": "demo",
            "version": "2.10.7",
            "now": "2024-05-01T12:34:56.789Z",
            "cpu": 1.5,
            "mem": 18132992,
            "uptime": "3d4h11m30s",
            "in_msgs": 1000,
            "out_msgs": 2000,
            "in_bytes": 4096,
            "out_bytes": 8192,
            "slow_consumers": 1,
            "connections": 12,
            "subscriptions": 34
        }"#;

        let varz: Varz = serde_json::from_str(json).unwrap();
        assert_eq!(varz.server_name, "demo");
        assert_eq!(varz.version, "2.10.7");
        assert_eq!(varz.in_msgs, 1000);
        assert_eq!(varz.out_bytes, 8192);
        assert_eq!(varz.slow_consumers, 1);
        assert_eq!(varz.now.timestamp(), 1_714_566_896);
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let json = r#"{"server_id": "X", "now": "2024-05-01T00:00:00Z"}"#;
        let varz: Varz = serde_json::from_str(json).unwrap();
        assert_eq!(varz.in_msgs, 0);
        assert_eq!(varz.mem, 0);
        assert!(varz.server_name.is_empty());
    }
}
