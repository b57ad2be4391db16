use clap::Parser;
use nats_top::http::config::{HttpClientConfig, TlsConfig};
use nats_top::models::connz::SortOption;
use std::path::PathBuf;
use std::time::Duration;

/// Top-like monitoring for NATS servers.
#[derive(Parser, Debug, Clone)]
#[command(name = "nats-top", author, version, about, long_about = None)]
pub struct Args {
    /// The NATS server host to monitor
    #[arg(short = 's', long = "server", default_value = "127.0.0.1")]
    pub host: String,

    /// The NATS server monitoring port
    #[arg(short = 'm', long = "http-port", default_value_t = 8222)]
    pub port: u16,

    /// The NATS server monitoring port over HTTPS; takes precedence over the
    /// HTTP port when set
    #[arg(long = "https-port")]
    pub https_port: Option<u16>,

    /// Maximum number of connections to poll
    #[arg(short = 'n', long = "conns", default_value_t = 1024)]
    pub conns: u32,

    /// Delay between polls, e.g. `1s` or `250ms`
    #[arg(short = 'd', long, value_parser = humantime::parse_duration, default_value = "1s")]
    pub delay: Duration,

    /// Sort key for the connections listing, applied by the server
    #[arg(long, default_value_t = SortOption::Cid)]
    pub sort: SortOption,

    /// Display raw counter values instead of scaled ones
    #[arg(short = 'b', long = "raw-bytes")]
    pub raw_bytes: bool,

    /// Display the subscriptions column
    #[arg(short = 'u', long = "display-subscriptions")]
    pub display_subscriptions: bool,

    /// Resolve connection hosts through reverse DNS
    #[arg(long)]
    pub lookup: bool,

    /// Write a single snapshot to the given file (`-` for stdout) and exit
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Field delimiter for the one-shot output (switches it to CSV)
    #[arg(short = 'l', long)]
    pub delimiter: Option<String>,

    /// Exit after the given number of screen refreshes
    #[arg(short = 'r', long = "max-refreshes")]
    pub max_refreshes: Option<u32>,

    /// Client certificate PEM file for mutual TLS
    #[arg(long)]
    pub cert: Option<PathBuf>,

    /// Client private key PEM file for mutual TLS
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Root CA PEM file used to verify the server certificate
    #[arg(long)]
    pub cacert: Option<PathBuf>,

    /// Skip server certificate verification
    #[arg(short = 'k', long)]
    pub insecure: bool,

    /// Write TRACE-level diagnostics to the given file
    #[arg(long)]
    pub debug: Option<PathBuf>,
}

impl Args {
    /// The base URL of the monitoring port, HTTPS when `--https-port` is set.
    pub fn api_url(&self) -> String {
        match self.https_port {
            Some(port) => format!("https://{}:{}", self.host, port),
            None => format!("http://{}:{}", self.host, self.port),
        }
    }

    pub fn http_config(&self) -> HttpClientConfig {
        let tls = self.https_port.map(|_| TlsConfig {
            ca_file: self.cacert.clone(),
            cert_file: self.cert.clone(),
            key_file: self.key.clone(),
            accept_invalid_certs: self.insecure,
        });
        HttpClientConfig {
            api_url: self.api_url(),
            tls,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn the_argument_surface_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let args = Args::parse_from(["nats-top"]);
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 8222);
        assert_eq!(args.conns, 1024);
        assert_eq!(args.delay, Duration::from_secs(1));
        assert_eq!(args.sort, SortOption::Cid);
        assert!(!args.raw_bytes);
        assert_eq!(args.api_url(), "http://127.0.0.1:8222");
    }

    #[test]
    fn the_https_port_switches_the_scheme_and_enables_tls() {
        let args = Args::parse_from(["nats-top", "-s", "nats.example.com", "--https-port", "8223", "-k"]);
        assert_eq!(args.api_url(), "https://nats.example.com:8223");
        let config = args.http_config();
        assert!(config.tls.as_ref().unwrap().accept_invalid_certs);
    }

    #[test]
    fn the_sort_key_parses_the_server_spelling() {
        let args = Args::parse_from(["nats-top", "--sort", "bytes_to"]);
        assert_eq!(args.sort, SortOption::BytesTo);
    }

    #[test]
    fn the_delay_accepts_humantime_values() {
        let args = Args::parse_from(["nats-top", "-d", "250ms"]);
        assert_eq!(args.delay, Duration::from_millis(250));
    }
}
