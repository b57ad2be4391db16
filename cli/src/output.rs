use crate::dns::DnsCache;
use nats_top::models::connz::ConnInfo;
use nats_top::models::stats::{Rates, Stats};
use nats_top::utils::size::{format_bytes, format_count};
use nats_top::utils::timestamp::format_last_activity;
use std::fmt::Write;

/// Presentation toggles of the display layer. Unlike the poll options these
/// are owned by the foreground loop and never shared with the scheduler,
/// except for the subscriptions flag which is mirrored into the connz query.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DisplayOptions {
    pub raw_bytes: bool,
    pub show_rates: bool,
    pub display_subs: bool,
    pub lookup_dns: bool,
}

impl DisplayOptions {
    pub(crate) fn from_args(args: &crate::args::Args) -> Self {
        DisplayOptions {
            raw_bytes: args.raw_bytes,
            show_rates: false,
            display_subs: args.display_subscriptions,
            lookup_dns: args.lookup,
        }
    }
}

pub(crate) fn connection_host(
    conn: &ConnInfo,
    options: &DisplayOptions,
    dns: &mut DnsCache,
) -> String {
    if options.lookup_dns {
        dns.resolve(&conn.ip)
    } else {
        format!("{}:{}", conn.ip, conn.port)
    }
}

/// The four traffic cells of a connection row: MSGS_TO, MSGS_FROM, BYTES_TO,
/// BYTES_FROM. In rates mode these are the per-cycle deltas; a connection
/// missing from the rate map renders zeroes.
pub(crate) fn traffic_cells(
    conn: &ConnInfo,
    rates: Option<&Rates>,
    options: &DisplayOptions,
) -> [String; 4] {
    if options.show_rates {
        let cr = rates
            .and_then(|rates| rates.connections.get(&conn.cid).copied())
            .unwrap_or_default();
        [
            format_count(options.raw_bytes, cr.out_msgs_rate as i64),
            format_count(options.raw_bytes, cr.in_msgs_rate as i64),
            format_bytes(options.raw_bytes, cr.out_bytes_rate as i64),
            format_bytes(options.raw_bytes, cr.in_bytes_rate as i64),
        ]
    } else {
        [
            format_count(options.raw_bytes, conn.out_msgs),
            format_count(options.raw_bytes, conn.in_msgs),
            format_bytes(options.raw_bytes, conn.out_bytes),
            format_bytes(options.raw_bytes, conn.in_bytes),
        ]
    }
}

pub(crate) fn subscriptions_cell(conn: &ConnInfo) -> String {
    conn.subs.as_deref().unwrap_or_default().join(", ")
}

fn failure_line(stats: &Stats) -> String {
    format!(
        "polling failed: {}\n",
        stats.error.as_deref().unwrap_or("unknown error")
    )
}

/// Server header lines shared by the plain-text output and the live view.
pub(crate) fn server_header(stats: &Stats, options: &DisplayOptions) -> String {
    let Some(varz) = &stats.varz else {
        return failure_line(stats);
    };
    let rates = stats.rates.clone().unwrap_or_default();
    let mut text = String::new();
    let _ = writeln!(
        text,
        "NATS server version {} (uptime: {}) {}",
        varz.version,
        varz.uptime,
        stats.error_annotation()
    );
    let _ = writeln!(text, "Server: {}", varz.server_name);
    let _ = writeln!(text, "  ID:   {}", varz.server_id);
    let _ = writeln!(
        text,
        "  Load: CPU:  {:.1}%  Memory: {}  Slow Consumers: {}",
        varz.cpu,
        format_bytes(false, varz.mem),
        varz.slow_consumers
    );
    let _ = writeln!(
        text,
        "  In:   Msgs: {}  Bytes: {}  Msgs/Sec: {:.1}  Bytes/Sec: {}",
        format_count(options.raw_bytes, varz.in_msgs),
        format_bytes(options.raw_bytes, varz.in_bytes),
        rates.in_msgs_rate,
        format_bytes(options.raw_bytes, rates.in_bytes_rate as i64)
    );
    let _ = writeln!(
        text,
        "  Out:  Msgs: {}  Bytes: {}  Msgs/Sec: {:.1}  Bytes/Sec: {}",
        format_count(options.raw_bytes, varz.out_msgs),
        format_bytes(options.raw_bytes, varz.out_bytes),
        rates.out_msgs_rate,
        format_bytes(options.raw_bytes, rates.out_bytes_rate as i64)
    );
    text
}

/// Render a snapshot as the padded plain-text paragraph used by the one-shot
/// output mode.
pub(crate) fn plain_text(stats: &Stats, options: &DisplayOptions, dns: &mut DnsCache) -> String {
    let Some(connz) = &stats.connz else {
        return failure_line(stats);
    };
    let mut text = server_header(stats, options);
    let _ = writeln!(text);
    let _ = writeln!(text, "Connections Polled: {}", connz.num_connections);

    let hosts: Vec<String> = connz
        .connections
        .iter()
        .map(|conn| connection_host(conn, options, dns))
        .collect();
    let mut host_size: usize = 15;
    let mut name_size: usize = 0;
    for (conn, host) in connz.connections.iter().zip(&hosts) {
        host_size = host_size.max(host.len() + 2);
        if let Some(name) = &conn.name {
            if !name.is_empty() {
                name_size = name_size.max(name.len() + 2);
            }
        }
    }

    let mut header = format!("{:<host_size$} {:<6}", "HOST", "CID");
    if name_size > 0 {
        let _ = write!(header, " {:<name_size$}", "NAME");
    }
    header.push_str(
        "  SUBS  PENDING  MSGS_TO  MSGS_FROM  BYTES_TO  BYTES_FROM  LANG    VERSION  UPTIME         LAST_ACTIVITY",
    );
    if options.display_subs {
        header.push_str("  SUBSCRIPTIONS");
    }
    let _ = writeln!(text, "{header}");

    for (conn, host) in connz.connections.iter().zip(&hosts) {
        let mut row = format!("{:<host_size$} {:<6}", host, conn.cid);
        if name_size > 0 {
            let _ = write!(row, " {:<name_size$}", conn.name.as_deref().unwrap_or(""));
        }
        let [msgs_to, msgs_from, bytes_to, bytes_from] =
            traffic_cells(conn, stats.rates.as_ref(), options);
        let _ = write!(
            row,
            "  {:<5}  {:<7}  {:<8}  {:<9}  {:<9}  {:<10}",
            conn.subscriptions,
            format_count(options.raw_bytes, conn.pending_bytes),
            msgs_to,
            msgs_from,
            bytes_to,
            bytes_from
        );
        let _ = write!(
            row,
            "  {:<6}  {:<7}  {:<14}  {:<14}",
            conn.lang.as_deref().unwrap_or(""),
            conn.version.as_deref().unwrap_or(""),
            conn.uptime,
            format_last_activity(&conn.last_activity)
        );
        if options.display_subs {
            let _ = write!(row, "  {}", subscriptions_cell(conn));
        }
        let _ = writeln!(text, "{}", row.trim_end());
    }
    text
}

/// Render a snapshot with a caller-chosen field delimiter (CSV mode of the
/// one-shot output).
pub(crate) fn csv(
    stats: &Stats,
    options: &DisplayOptions,
    dns: &mut DnsCache,
    delimiter: &str,
) -> String {
    let (Some(varz), Some(connz)) = (&stats.varz, &stats.connz) else {
        return failure_line(stats);
    };
    let rates = stats.rates.clone().unwrap_or_default();
    let d = delimiter;
    let mut text = String::new();
    let _ = writeln!(
        text,
        "NATS server version{d}{}{d}(uptime: {}){d}{}",
        varz.version,
        varz.uptime,
        stats.error_annotation()
    );
    let _ = writeln!(text, "Server:");
    let _ = writeln!(
        text,
        "Load{d}CPU{d}{:.1}%{d}Memory{d}{}{d}Slow Consumers{d}{}",
        varz.cpu,
        format_bytes(false, varz.mem),
        varz.slow_consumers
    );
    let _ = writeln!(
        text,
        "In{d}Msgs{d}{}{d}Bytes{d}{}{d}Msgs/Sec{d}{:.1}{d}Bytes/Sec{d}{}",
        format_count(options.raw_bytes, varz.in_msgs),
        format_bytes(options.raw_bytes, varz.in_bytes),
        rates.in_msgs_rate,
        format_bytes(options.raw_bytes, rates.in_bytes_rate as i64)
    );
    let _ = writeln!(
        text,
        "Out{d}Msgs{d}{}{d}Bytes{d}{}{d}Msgs/Sec{d}{:.1}{d}Bytes/Sec{d}{}",
        format_count(options.raw_bytes, varz.out_msgs),
        format_bytes(options.raw_bytes, varz.out_bytes),
        rates.out_msgs_rate,
        format_bytes(options.raw_bytes, rates.out_bytes_rate as i64)
    );
    let _ = writeln!(text);
    let _ = writeln!(text, "Connections Polled{d}{}", connz.num_connections);

    let mut headers = vec![
        "HOST",
        "CID",
        "NAME",
        "SUBS",
        "PENDING",
        "MSGS_TO",
        "MSGS_FROM",
        "BYTES_TO",
        "BYTES_FROM",
        "LANG",
        "VERSION",
        "UPTIME",
        "LAST_ACTIVITY",
    ];
    if options.display_subs {
        headers.push("SUBSCRIPTIONS");
    }
    let _ = writeln!(text, "{}", headers.join(d));

    for conn in &connz.connections {
        let [msgs_to, msgs_from, bytes_to, bytes_from] =
            traffic_cells(conn, stats.rates.as_ref(), options);
        let mut row = vec![
            connection_host(conn, options, dns),
            conn.cid.to_string(),
            conn.name.clone().unwrap_or_default(),
            conn.subscriptions.to_string(),
            format_count(options.raw_bytes, conn.pending_bytes),
            msgs_to,
            msgs_from,
            bytes_to,
            bytes_from,
            conn.lang.clone().unwrap_or_default(),
            conn.version.clone().unwrap_or_default(),
            conn.uptime.clone(),
            conn.last_activity.clone(),
        ];
        if options.display_subs {
            row.push(subscriptions_cell(conn));
        }
        let _ = writeln!(text, "{}", row.join(d));
    }
    text
}
