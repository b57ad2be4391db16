use crate::args::Args;
use crate::dns::DnsCache;
use crate::output::{self, DisplayOptions};
use anyhow::Result;
use comfy_table::{presets, Table};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use nats_top::models::stats::Stats;
use nats_top::monitor::{MonitorOptions, SharedStats};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

const REDRAW_INTERVAL: Duration = Duration::from_millis(500);

/// Run the interactive view until the user quits, the refresh limit is
/// reached or the stats channel closes. Returns after restoring the
/// terminal.
pub(crate) async fn run(
    args: &Args,
    monitor_options: Arc<MonitorOptions>,
    stats_rx: watch::Receiver<SharedStats>,
) -> Result<()> {
    setup_terminal()?;

    // Restore the terminal even when the render loop panics, so the shell is
    // never left in raw mode.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        original_hook(panic_info);
    }));

    let result = run_loop(args, monitor_options, stats_rx).await;
    restore_terminal()?;
    result
}

fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)?;
    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}

async fn run_loop(
    args: &Args,
    monitor_options: Arc<MonitorOptions>,
    stats_rx: watch::Receiver<SharedStats>,
) -> Result<()> {
    let mut options = DisplayOptions::from_args(args);
    let mut dns = DnsCache::new();
    let mut update_interval = tokio::time::interval(REDRAW_INTERVAL);
    let mut refreshes: u32 = 0;

    loop {
        let stats = stats_rx.borrow().clone();
        if let Some(stats) = stats {
            render(&stats, &options, &mut dns)?;
            refreshes += 1;
            if args.max_refreshes.is_some_and(|max| refreshes >= max) {
                break;
            }
        }

        update_interval.tick().await;

        // Drain pending key presses without blocking the redraw cadence.
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Char(' ') => options.show_rates = !options.show_rates,
                    KeyCode::Char('s') => {
                        options.display_subs = !options.display_subs;
                        monitor_options.set_display_subs(options.display_subs);
                    }
                    KeyCode::Char('d') => options.lookup_dns = !options.lookup_dns,
                    KeyCode::Char('b') => options.raw_bytes = !options.raw_bytes,
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn render(stats: &Stats, options: &DisplayOptions, dns: &mut DnsCache) -> Result<()> {
    let mut text = output::server_header(stats, options);
    if let Some(connz) = &stats.connz {
        text.push('\n');
        text.push_str(&format!("Connections Polled: {}\n", connz.num_connections));
        text.push_str(&connections_table(stats, options, dns).to_string());
        text.push('\n');
    }

    let mut stdout = io::stdout();
    execute!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
    // Raw mode needs explicit carriage returns.
    for line in text.lines() {
        execute!(stdout, Print(line), Print("\r\n"))?;
    }
    stdout.flush()?;
    Ok(())
}

fn connections_table(stats: &Stats, options: &DisplayOptions, dns: &mut DnsCache) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);

    let mut header = vec![
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
        header.push("SUBSCRIPTIONS");
    }
    table.set_header(header);

    let Some(connz) = &stats.connz else {
        return table;
    };
    for conn in &connz.connections {
        let [msgs_to, msgs_from, bytes_to, bytes_from] =
            output::traffic_cells(conn, stats.rates.as_ref(), options);
        let mut row = vec![
            output::connection_host(conn, options, dns),
            conn.cid.to_string(),
            conn.name.clone().unwrap_or_default(),
            conn.subscriptions.to_string(),
            nats_top::utils::size::format_count(options.raw_bytes, conn.pending_bytes),
            msgs_to,
            msgs_from,
            bytes_to,
            bytes_from,
            conn.lang.clone().unwrap_or_default(),
            conn.version.clone().unwrap_or_default(),
            conn.uptime.clone(),
            nats_top::utils::timestamp::format_last_activity(&conn.last_activity),
        ];
        if options.display_subs {
            row.push(output::subscriptions_cell(conn));
        }
        table.add_row(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use nats_top::models::connz::{ConnInfo, Connz};

    fn stats_with_one_connection() -> Stats {
        Stats {
            connz: Some(Connz {
                num_connections: 1,
                connections: vec![ConnInfo {
                    cid: 7,
                    ip: "127.0.0.1".to_string(),
                    port: 4222,
                    name: None,
                    subscriptions: 2,
                    pending_bytes: 0,
                    out_msgs: 10,
                    in_msgs: 20,
                    out_bytes: 30,
                    in_bytes: 40,
                    lang: Some("rust".to_string()),
                    version: None,
                    uptime: "1m".to_string(),
                    last_activity: String::new(),
                    subs: Some(vec!["a.b".to_string()]),
                }],
            }),
            ..Stats::default()
        }
    }

    fn options() -> DisplayOptions {
        DisplayOptions {
            raw_bytes: false,
            show_rates: false,
            display_subs: false,
            lookup_dns: false,
        }
    }

    #[test]
    fn the_table_has_one_row_per_connection() {
        let table = connections_table(&stats_with_one_connection(), &options(), &mut DnsCache::new());
        let rendered = table.to_string();
        assert!(rendered.contains("HOST"));
        assert!(rendered.contains("127.0.0.1:4222"));
        assert!(rendered.contains("rust"));
        assert!(!rendered.contains("SUBSCRIPTIONS"));
    }

    #[test]
    fn the_subscriptions_column_follows_the_toggle() {
        let mut opts = options();
        opts.display_subs = true;
        let table = connections_table(&stats_with_one_connection(), &opts, &mut DnsCache::new());
        let rendered = table.to_string();
        assert!(rendered.contains("SUBSCRIPTIONS"));
        assert!(rendered.contains("a.b"));
    }
}
