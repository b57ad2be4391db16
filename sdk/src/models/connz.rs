use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// `Connz` represents the per-connection statistics of the monitored NATS
/// server, decoded from the `/connz` monitoring endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Connz {
    /// The number of connections in this snapshot.
    #[serde(default)]
    pub num_connections: u64,
    /// The polled connections, in the order returned by the server.
    #[serde(default)]
    pub connections: Vec<ConnInfo>,
}

/// `ConnInfo` represents a single client connection as reported by `/connz`.
/// Immutable once decoded.
///
/// The `cid` is unique among the currently open connections of one server,
/// but a server restart may reuse or reset identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnInfo {
    /// The connection identifier.
    pub cid: u64,
    /// The remote IP address of the client.
    #[serde(default)]
    pub ip: String,
    /// The remote port of the client.
    #[serde(default)]
    pub port: u16,
    /// The optional client-provided connection name.
    #[serde(default)]
    pub name: Option<String>,
    /// The number of subscriptions held by the connection.
    #[serde(default)]
    pub subscriptions: u64,
    /// The number of bytes pending delivery to the client.
    #[serde(default)]
    pub pending_bytes: i64,
    /// The cumulative number of messages sent to the client.
    #[serde(default)]
    pub out_msgs: i64,
    /// The cumulative number of messages received from the client.
    #[serde(default)]
    pub in_msgs: i64,
    /// The cumulative number of bytes sent to the client.
    #[serde(default)]
    pub out_bytes: i64,
    /// The cumulative number of bytes received from the client.
    #[serde(default)]
    pub in_bytes: i64,
    /// The client library language.
    #[serde(default)]
    pub lang: Option<String>,
    /// The client library version.
    #[serde(default)]
    pub version: Option<String>,
    /// The human-readable uptime of the connection.
    #[serde(default)]
    pub uptime: String,
    /// The timestamp of the last activity on the connection, RFC 3339.
    #[serde(default)]
    pub last_activity: String,
    /// The subscription subjects, present only when requested with `subs=1`.
    #[serde(default)]
    pub subs: Option<Vec<String>>,
}

/// Sort keys accepted by the `/connz` endpoint. Sorting happens on the
/// server; the client forwards the key verbatim and never re-orders the
/// returned connections.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortOption {
    /// By connection identifier.
    #[default]
    Cid,
    /// By subscription count.
    Subs,
    /// By pending bytes.
    Pending,
    /// By messages sent to the client.
    MsgsTo,
    /// By messages received from the client.
    MsgsFrom,
    /// By bytes sent to the client.
    BytesTo,
    /// By bytes received from the client.
    BytesFrom,
    /// By last activity.
    Last,
    /// By idle time.
    Idle,
    /// By connection uptime.
    Uptime,
    /// By connection start time.
    Start,
}

/// Query parameters for the `/connz` endpoint. Caller-supplied configuration,
/// forwarded as-is; the statistics engine never inspects it.
#[derive(Debug, Clone, Serialize)]
pub struct ConnzQuery {
    /// Maximum number of connections the server should return.
    pub limit: u32,
    /// Server-side sort key.
    pub sort: SortOption,
    /// Set to `1` to request subscription subjects per connection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subs: Option<u8>,
}

impl Default for ConnzQuery {
    fn default() -> Self {
        ConnzQuery {
            limit: 1024,
            sort: SortOption::Cid,
            subs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_connz_wire_format() {
        let json = r#"{
            "num_connections": 2,
            "total": 2,
            "offset": 0,
            "connections": [
                {
                    "cid": 53,
                    "ip": "127.0.0.1",
                    "port": 63921,
                    "start": "2024-05-01T10:00:00Z",
                    "last_activity": "2024-05-01T12:34:00Z",
                    "uptime": "2h34m56s",
                    "pending_bytes": 0,
                    "in_msgs": 1000,
                    "out_msgs": 80,
                    "in_bytes": 4096,
                    "out_bytes": 512,
                    "subscriptions": 3,
                    "lang": "go",
                    "version": "1.31.0"
                },
                {
                    "cid": 54,
                    "ip": "10.0.0.7",
                    "port": 4444,
                    "name": "worker-1",
                    "uptime": "5s",
                    "last_activity": "2024-05-01T12:34:30Z",
                    "pending_bytes": 128,
                    "in_msgs": 1,
                    "out_msgs": 2,
                    "in_bytes": 3,
                    "out_bytes": 4,
                    "subscriptions": 1,
                    "subs": ["orders.>", "_INBOX.abc.*"]
                }
            ]
        }"#;

        let connz: Connz = serde_json::from_str(json).unwrap();
        assert_eq!(connz.num_connections, 2);
        assert_eq!(connz.connections.len(), 2);
        assert_eq!(connz.connections[0].cid, 53);
        assert_eq!(connz.connections[0].lang.as_deref(), Some("go"));
        assert!(connz.connections[0].name.is_none());
        assert!(connz.connections[0].subs.is_none());
        assert_eq!(connz.connections[1].name.as_deref(), Some("worker-1"));
        assert_eq!(
            connz.connections[1].subs.as_deref(),
            Some(["orders.>".to_string(), "_INBOX.abc.*".to_string()].as_slice())
        );
    }

    #[test]
    fn sort_options_use_the_server_spelling() {
        assert_eq!(SortOption::Cid.to_string(), "cid");
        assert_eq!(SortOption::MsgsTo.to_string(), "msgs_to");
        assert_eq!(SortOption::BytesFrom.to_string(), "bytes_from");
        assert_eq!("pending".parse::<SortOption>().unwrap(), SortOption::Pending);
        assert!("not-a-key".parse::<SortOption>().is_err());
    }

    #[test]
    fn query_omits_the_subs_flag_unless_requested() {
        let query = ConnzQuery::default();
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["limit"], 1024);
        assert_eq!(value["sort"], "cid");
        assert!(value.get("subs").is_none());

        let query = ConnzQuery {
            subs: Some(1),
            ..ConnzQuery::default()
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["subs"], 1);
    }
}
